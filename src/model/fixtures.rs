// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::{Catalog, CatalogArea};
use super::direction::Direction;
use super::document::MapDoc;
use super::ids::{AreaId, Vnum};
use super::room::{Category, Coords, Door, ExitDef, Room, TerrainKind};

pub(crate) fn vnum(value: &str) -> Vnum {
    Vnum::new(value).expect("vnum")
}

pub(crate) fn area(value: &str) -> AreaId {
    AreaId::new(value).expect("area id")
}

fn temple_room(id: &str, label: &str, cx: i32, cy: i32, vz: i32) -> Room {
    Room::new(vnum(id), Coords::new(cx, cy, vz))
        .with_label(label)
        .with_category(Category::area(area("temple")))
}

/// Small three-floor area that exercises every edge flavour:
/// reciprocal pair with a door, missing reciprocal, curved reroute, vertical exits, a dangling
/// exit and one uncatalogued room.
pub(crate) fn temple_doc() -> MapDoc {
    let mut doc = MapDoc::default();

    let mut catalog = Catalog::default();
    catalog.areas.insert(
        area("temple"),
        CatalogArea {
            id: area("temple"),
            name: "Temple of Midgaard".to_owned(),
            world_id: None,
            continent_id: None,
            primary_vnum: Some(vnum("3001")),
        },
    );
    doc.meta.catalog = Some(catalog);

    doc.insert_room(
        temple_room("3001", "Temple Square", 0, 0, 0)
            .with_sector(TerrainKind::City)
            .with_exit(Direction::E, ExitDef::to(vnum("3002")).with_door(Door::Simple))
            .with_exit(Direction::S, ExitDef::to(vnum("3003")))
            .with_exit(Direction::N, ExitDef::to(vnum("3004")))
            .with_exit(Direction::U, ExitDef::to(vnum("3005")))
            .with_exit(Direction::D, ExitDef::to(vnum("3006"))),
    );
    doc.insert_room(
        temple_room("3002", "Temple Altar", 1, 0, 0)
            .with_sector(TerrainKind::Inside)
            .with_exit(Direction::W, ExitDef::to(vnum("3001"))),
    );
    doc.insert_room(temple_room("3003", "Market Street", 0, 1, 0).with_sector(TerrainKind::City));
    doc.insert_room(
        temple_room("3004", "Bell Tower Stair", -2, 0, 0)
            .with_sector(TerrainKind::Inside)
            .with_exit(Direction::S, ExitDef::to(vnum("3001"))),
    );
    doc.insert_room(
        temple_room("3005", "Bell Loft", 0, 0, 1).with_exit(Direction::D, ExitDef::to(vnum("3001"))),
    );
    doc.insert_room(
        temple_room("3006", "Crypt", 0, 0, -1)
            .with_sector(TerrainKind::Underground)
            .with_exit(Direction::U, ExitDef::to(vnum("3001")))
            .with_exit(Direction::E, ExitDef::to(vnum("3999"))),
    );
    doc.insert_room(Room::new(vnum("9001"), Coords::new(5, 5, 0)).with_label("Lost Meadow"));

    doc
}

/// Two rooms side by side; `dir` is the exit declared on `R1`.
pub(crate) fn pair_doc(dir: Direction, exit: ExitDef) -> MapDoc {
    let mut doc = MapDoc::default();
    doc.insert_room(
        Room::new(vnum("R1"), Coords::new(0, 0, 0))
            .with_category(Category::area(area("a")))
            .with_exit(dir, exit),
    );
    doc.insert_room(Room::new(vnum("R2"), Coords::new(1, 0, 0)).with_category(Category::area(area("a"))));
    doc
}
