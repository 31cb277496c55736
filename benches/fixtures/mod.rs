// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic benchmark maps (no RNG).

use mapwright::model::{
    AreaId, Category, Coords, Direction, Door, ExitDef, MapDoc, Room, TerrainKind, Vnum,
};

pub const AREA: &str = "bench";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// 6×6 grid, straight exits only.
    Small,
    /// 24×24 grid with diagonals and doors.
    MediumDense,
    /// 12×12 grid whose exits are declared in the wrong direction, so every edge curves.
    CurveHeavy,
    /// Three 12×12 floors.
    Stacked,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::CurveHeavy => "curve_heavy",
            Self::Stacked => "stacked",
        }
    }
}

pub fn area() -> AreaId {
    AreaId::new(AREA).expect("area id")
}

fn vnum(level: i32, cx: i32, cy: i32) -> Vnum {
    Vnum::new(format!("{level}:{cx}:{cy}")).expect("vnum")
}

const TERRAIN: [TerrainKind; 6] = [
    TerrainKind::City,
    TerrainKind::Inside,
    TerrainKind::Forest,
    TerrainKind::Fields,
    TerrainKind::Hills,
    TerrainKind::Unknown,
];

fn room(level: i32, cx: i32, cy: i32) -> Room {
    let idx = (cx * 7 + cy * 3).unsigned_abs() as usize % TERRAIN.len();
    Room::new(vnum(level, cx, cy), Coords::new(cx, cy, level))
        .with_label(format!("Room {cx} by {cy} on floor {level}"))
        .with_sector(TERRAIN[idx])
        .with_category(Category::area(area()))
}

fn grid(doc: &mut MapDoc, level: i32, size: i32, diagonals: bool, misdeclared: bool) {
    for cy in 0..size {
        for cx in 0..size {
            let mut r = room(level, cx, cy);
            if cx + 1 < size {
                let dir = if misdeclared { Direction::N } else { Direction::E };
                let mut exit = ExitDef::to(vnum(level, cx + 1, cy));
                if (cx + cy) % 5 == 0 {
                    exit = exit.with_door(Door::Simple);
                }
                r = r.with_exit(dir, exit);
            }
            if cx > 0 {
                r = r.with_exit(Direction::W, ExitDef::to(vnum(level, cx - 1, cy)));
            }
            if cy + 1 < size {
                let dir = if misdeclared { Direction::E } else { Direction::S };
                r = r.with_exit(dir, ExitDef::to(vnum(level, cx, cy + 1)));
            }
            if diagonals && cx + 1 < size && cy + 1 < size && (cx + cy) % 2 == 0 {
                r = r.with_exit(Direction::SE, ExitDef::to(vnum(level, cx + 1, cy + 1)).one_way());
            }
            doc.insert_room(r);
        }
    }
}

pub fn fixture(case: Case) -> MapDoc {
    let mut doc = MapDoc::default();
    match case {
        Case::Small => grid(&mut doc, 0, 6, false, false),
        Case::MediumDense => grid(&mut doc, 0, 24, true, false),
        Case::CurveHeavy => grid(&mut doc, 0, 12, false, true),
        Case::Stacked => {
            for level in [-1, 0, 1] {
                grid(&mut doc, level, 12, true, false);
            }
        }
    }
    doc
}
