// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain-text area map.
//!
//! Rooms sit on a coarse character grid (`ascii_pitch_x` × `ascii_pitch_y` cells per grid step)
//! with `-`, `|`, `\` and `/` connectors between them. Labels are written after every connector,
//! so a connector never hides a room.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::RenderConfig;
use crate::layout::collect_edges;
use crate::model::{AreaId, MapDoc, Scope, Vnum};

use super::canvas::{Canvas, CanvasError};
use super::text::{canvas_to_string_trimmed, fixed_width};

/// Characters drawn per room label.
pub const ASCII_LABEL_WIDTH: usize = 3;

/// Upper bound on grid cells, so a stray coordinate cannot allocate gigabytes.
const MAX_GRID_CELLS: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsciiRenderError {
    Canvas(CanvasError),
    GridTooLarge { width: u64, height: u64 },
}

impl fmt::Display for AsciiRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas(err) => write!(f, "canvas error: {err}"),
            Self::GridTooLarge { width, height } => {
                write!(f, "ascii grid too large: {width}x{height} cells")
            }
        }
    }
}

impl std::error::Error for AsciiRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Canvas(err) => Some(err),
            Self::GridTooLarge { .. } => None,
        }
    }
}

impl From<CanvasError> for AsciiRenderError {
    fn from(value: CanvasError) -> Self {
        Self::Canvas(value)
    }
}

/// Renders one floor of `area` as text: a two-line header, a blank line, then the grid with one
/// empty padding row above and below.
pub fn render_area_ascii(
    doc: &MapDoc,
    area: &AreaId,
    level: i32,
    cfg: &RenderConfig,
) -> Result<String, AsciiRenderError> {
    let rooms = doc.rooms_in_scope(&Scope::area(area.clone(), level));

    let mut out = String::new();
    out.push_str(&format!("Area: {} ({area})  Level: {level}\n", doc.area_name(area)));
    out.push_str(&format!("Rooms: {}\n\n", rooms.len()));

    if rooms.is_empty() {
        out.push_str("(no rooms)");
        return Ok(out);
    }

    let grid = AsciiGrid::measure(rooms.iter().map(|room| (room.coords.cx, room.coords.cy)), cfg)?;
    let mut canvas = Canvas::new(grid.width, grid.height)?;
    let cells: BTreeMap<&Vnum, (usize, usize)> = rooms
        .iter()
        .map(|room| (&room.vnum, grid.cell(room.coords.cx, room.coords.cy)))
        .collect();

    for edge in collect_edges(&rooms, level) {
        let (Some(&from), Some(&to)) = (cells.get(&edge.from), cells.get(&edge.to)) else {
            continue;
        };
        draw_connector(&mut canvas, from, to)?;
    }

    for room in &rooms {
        let (x, y) = cells[&room.vnum];
        let label = fixed_width(room.display_label(), ASCII_LABEL_WIDTH);
        canvas.write_str(x - ASCII_LABEL_WIDTH / 2, y, &label)?;
    }

    out.push_str(&canvas_to_string_trimmed(&canvas)?);
    Ok(out)
}

/// Cell geometry for one render: origin at the minimum grid coordinate.
#[derive(Debug, Clone, Copy)]
struct AsciiGrid {
    min_cx: i64,
    min_cy: i64,
    pitch_x: usize,
    pitch_y: usize,
    width: usize,
    height: usize,
}

impl AsciiGrid {
    fn measure(
        coords: impl Iterator<Item = (i32, i32)>,
        cfg: &RenderConfig,
    ) -> Result<Self, AsciiRenderError> {
        let pitch_x = cfg.ascii_pitch_x.max(1);
        let pitch_y = cfg.ascii_pitch_y.max(1);
        let (mut min_cx, mut max_cx) = (i64::MAX, i64::MIN);
        let (mut min_cy, mut max_cy) = (i64::MAX, i64::MIN);
        for (cx, cy) in coords {
            min_cx = min_cx.min(i64::from(cx));
            max_cx = max_cx.max(i64::from(cx));
            min_cy = min_cy.min(i64::from(cy));
            max_cy = max_cy.max(i64::from(cy));
        }

        // One padding cell on every side plus half a label on the left and right.
        let half_label = (ASCII_LABEL_WIDTH / 2) as u64;
        let span_x = (max_cx - min_cx) as u64;
        let span_y = (max_cy - min_cy) as u64;
        let width = span_x
            .saturating_mul(pitch_x as u64)
            .saturating_add(2 * (half_label + 1) + 1);
        let height = span_y.saturating_mul(pitch_y as u64).saturating_add(3);
        if width.saturating_mul(height) > MAX_GRID_CELLS {
            return Err(AsciiRenderError::GridTooLarge { width, height });
        }

        Ok(Self {
            min_cx,
            min_cy,
            pitch_x,
            pitch_y,
            width: width as usize,
            height: height as usize,
        })
    }

    fn cell(&self, cx: i32, cy: i32) -> (usize, usize) {
        let col = (i64::from(cx) - self.min_cx) as usize;
        let row = (i64::from(cy) - self.min_cy) as usize;
        (col * self.pitch_x + 1 + ASCII_LABEL_WIDTH / 2, row * self.pitch_y + 1)
    }
}

/// Walks the cells strictly between `from` and `to` in Chebyshev steps.
fn draw_connector(
    canvas: &mut Canvas,
    from: (usize, usize),
    to: (usize, usize),
) -> Result<(), CanvasError> {
    let (ax, ay) = (from.0 as i64, from.1 as i64);
    let dx = to.0 as i64 - ax;
    let dy = to.1 as i64 - ay;
    let steps = dx.abs().max(dy.abs());

    let mut prev = (ax, ay);
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let x = ax + (dx as f64 * t).round() as i64;
        let y = ay + (dy as f64 * t).round() as i64;
        let glyph = connector_glyph(x - prev.0, y - prev.1);
        canvas.set(x as usize, y as usize, glyph)?;
        prev = (x, y);
    }
    Ok(())
}

fn connector_glyph(step_x: i64, step_y: i64) -> char {
    match (step_x.signum(), step_y.signum()) {
        (_, 0) => '-',
        (0, _) => '|',
        (sx, sy) if sx == sy => '\\',
        _ => '/',
    }
}
