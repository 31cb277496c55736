// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid → pixel mapping.
//!
//! Two strategies share one affine mapper: *viewport* mode places a chosen grid center in the
//! middle of a fixed canvas, *content* mode sizes the canvas to the rooms' bounding box plus
//! padding.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::config::RenderConfig;
use crate::model::{Room, Vnum};

use super::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Fixed canvas with a stable focal point.
    Viewport,
    /// Canvas tightly bounds the content.
    #[default]
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPoint {
    cx: i32,
    cy: i32,
}

impl GridPoint {
    pub fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    pub fn cx(&self) -> i32 {
        self.cx
    }

    pub fn cy(&self) -> i32 {
        self.cy
    }

    pub fn of(room: &Room) -> Self {
        Self::new(room.coords.cx, room.coords.cy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGridPointError {
    input: String,
}

impl fmt::Display for ParseGridPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected CX,CY grid coordinates, got {:?}", self.input)
    }
}

impl std::error::Error for ParseGridPointError {}

impl FromStr for GridPoint {
    type Err = ParseGridPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseGridPointError { input: s.to_owned() };
        let (cx, cy) = s.split_once(',').ok_or_else(err)?;
        let cx = cx.trim().parse::<i32>().map_err(|_| err())?;
        let cy = cy.trim().parse::<i32>().map_err(|_| err())?;
        Ok(Self::new(cx, cy))
    }
}

/// Picks the grid center for viewport mode: explicit override, then the focused room, then the
/// primary room, then the first room in scope, then the origin.
pub fn choose_center(
    rooms: &[&Room],
    explicit: Option<GridPoint>,
    focus: Option<&Vnum>,
    primary: Option<&Vnum>,
) -> GridPoint {
    if let Some(center) = explicit {
        return center;
    }
    let find = |vnum: &Vnum| rooms.iter().find(|room| &room.vnum == vnum).copied();
    focus
        .and_then(find)
        .or_else(|| primary.and_then(find))
        .or_else(|| rooms.first().copied())
        .map(GridPoint::of)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    fit: FitMode,
    anchor: GridPoint,
    origin: Point,
    pitch: f64,
    width: f64,
    height: f64,
    placeholder: bool,
}

impl CoordinateMapper {
    /// Viewport mode: `center` lands on the canvas midpoint; positions snap to whole pixels.
    pub fn centered(center: GridPoint, width: f64, height: f64, cfg: &RenderConfig) -> Self {
        Self {
            fit: FitMode::Viewport,
            anchor: center,
            origin: Point::new(width / 2.0, height / 2.0),
            pitch: cfg.pitch(),
            width,
            height,
            placeholder: false,
        }
    }

    /// Content mode: the top-left grid cell sits at `pad + tile/2`. With no rooms the canvas is a
    /// `2·pad + tile` square holding a single placeholder position.
    pub fn content_fit(rooms: &[&Room], cfg: &RenderConfig) -> Self {
        let pad = cfg.content_pad;
        let half = cfg.half_tile();
        let pitch = cfg.pitch();

        let Some(bounds) = GridBounds::of(rooms) else {
            let side = pad * 2.0 + cfg.tile;
            return Self {
                fit: FitMode::Content,
                anchor: GridPoint::default(),
                origin: Point::new(pad + half, pad + half),
                pitch,
                width: side,
                height: side,
                placeholder: true,
            };
        };

        let content_w = f64::from(bounds.cols()) * pitch;
        let content_h = f64::from(bounds.rows()) * pitch;
        Self {
            fit: FitMode::Content,
            anchor: GridPoint::new(bounds.min_cx, bounds.min_cy),
            origin: Point::new(pad + half, pad + half),
            pitch,
            width: cfg.min_canvas_width.max((content_w + pad * 2.0).round()),
            height: cfg.min_canvas_height.max((content_h + pad * 2.0).round()),
            placeholder: false,
        }
    }

    pub fn for_fit(
        fit: FitMode,
        rooms: &[&Room],
        center: GridPoint,
        viewport: (f64, f64),
        cfg: &RenderConfig,
    ) -> Self {
        match fit {
            FitMode::Viewport => Self::centered(center, viewport.0, viewport.1, cfg),
            FitMode::Content => Self::content_fit(rooms, cfg),
        }
    }

    pub fn fit(&self) -> FitMode {
        self.fit
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn map(&self, cx: i32, cy: i32) -> Point {
        if self.placeholder {
            return self.origin;
        }
        let dx = f64::from(cx) - f64::from(self.anchor.cx);
        let dy = f64::from(cy) - f64::from(self.anchor.cy);
        let x = self.origin.x + dx * self.pitch;
        let y = self.origin.y + dy * self.pitch;
        match self.fit {
            FitMode::Viewport => Point::new(x.round(), y.round()),
            FitMode::Content => Point::new(x, y),
        }
    }

    pub fn map_room(&self, room: &Room) -> Point {
        self.map(room.coords.cx, room.coords.cy)
    }

    /// Pixel centers keyed by vnum, shifted down by `y_shift` (the legend band).
    pub fn positions(&self, rooms: &[&Room], y_shift: f64) -> BTreeMap<Vnum, Point> {
        rooms
            .iter()
            .map(|room| {
                let p = self.map_room(room);
                (room.vnum.clone(), Point::new(p.x, p.y + y_shift))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridBounds {
    min_cx: i32,
    max_cx: i32,
    min_cy: i32,
    max_cy: i32,
}

impl GridBounds {
    fn of(rooms: &[&Room]) -> Option<Self> {
        let mut iter = rooms.iter().map(|room| room.coords);
        let first = iter.next()?;
        let init = Self {
            min_cx: first.cx,
            max_cx: first.cx,
            min_cy: first.cy,
            max_cy: first.cy,
        };
        Some(iter.fold(init, |b, c| Self {
            min_cx: b.min_cx.min(c.cx),
            max_cx: b.max_cx.max(c.cx),
            min_cy: b.min_cy.min(c.cy),
            max_cy: b.max_cy.max(c.cy),
        }))
    }

    fn cols(&self) -> i32 {
        self.max_cx.saturating_sub(self.min_cx).saturating_add(1)
    }

    fn rows(&self) -> i32 {
        self.max_cy.saturating_sub(self.min_cy).saturating_add(1)
    }
}
