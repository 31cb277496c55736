// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Render-agnostic scene description.
//!
//! [`compose_scene`] runs the whole layout pipeline (mapping, obstacles, routing) for one scope
//! and returns positioned primitives in draw order. The SVG writer and the terminal viewer are
//! thin back ends over this.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::config::RenderConfig;
use crate::layout::{
    choose_center, octagon_vertices, obstacles::first_baseline, route_edges, wrap_label,
    CoordinateMapper, FitMode, GridPoint, ObstacleMap, Point, RoutedEdge,
};
use crate::model::{Direction, MapDoc, Room, Scope, TerrainKind, Vnum};

use super::palette::{tile_fill, LEGEND_ORDER};

pub const DEFAULT_BACKGROUND: &str = "#0f0f10";
pub const EMPTY_WIDTH: f64 = 640.0;
pub const EMPTY_HEIGHT: f64 = 360.0;
pub const DEFAULT_VIEWPORT: (f64, f64) = (800.0, 600.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendCorner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl LegendCorner {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "tl",
            Self::TopRight => "tr",
            Self::BottomLeft => "bl",
            Self::BottomRight => "br",
        }
    }

    fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    fn is_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLegendCornerError {
    input: String,
}

impl fmt::Display for ParseLegendCornerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown legend corner {:?} (expected tl, tr, bl or br)", self.input)
    }
}

impl std::error::Error for ParseLegendCornerError {}

impl FromStr for LegendCorner {
    type Err = ParseLegendCornerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tl" => Ok(Self::TopLeft),
            "tr" => Ok(Self::TopRight),
            "bl" => Ok(Self::BottomLeft),
            "br" => Ok(Self::BottomRight),
            _ => Err(ParseLegendCornerError { input: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendOptions {
    pub visible: bool,
    pub corner: LegendCorner,
    /// Distance from the canvas edge; `None` uses the configured legend margin.
    pub margin: Option<f64>,
    /// Grow the canvas by a band for the legend instead of overlaying the content.
    pub reserve_band: bool,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            visible: true,
            corner: LegendCorner::TopLeft,
            margin: None,
            reserve_band: true,
        }
    }
}

/// Caller-supplied view parameters for one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewParams {
    pub center: Option<GridPoint>,
    pub focus: Option<Vnum>,
    /// Overrides the catalog's primary room.
    pub primary: Option<Vnum>,
    pub fit: FitMode,
    /// Explicit canvas size. In viewport mode this is also the viewport the mapper centers in.
    pub canvas: Option<(f64, f64)>,
    pub background: Option<String>,
    pub legend: LegendOptions,
}

impl ViewParams {
    pub fn export() -> Self {
        Self::default()
    }

    pub fn interactive(width: f64, height: f64) -> Self {
        Self {
            fit: FitMode::Viewport,
            canvas: Some((width, height)),
            legend: LegendOptions {
                reserve_band: false,
                ..LegendOptions::default()
            },
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileShape {
    pub vnum: Vnum,
    pub center: Point,
    pub vertices: [Point; 8],
    pub terrain: TerrainKind,
    pub fill: String,
    pub primary: bool,
    pub focus: bool,
    /// Vertical exits, shown as small U/D badges.
    pub badges: SmallVec<[Direction; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelBlock {
    pub vnum: Vnum,
    pub x: f64,
    pub lines: Vec<String>,
    pub baselines: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendMetrics {
    pub padding: f64,
    pub row_height: f64,
    pub column_width: f64,
    pub header_height: f64,
}

impl LegendMetrics {
    pub const STANDARD: Self = Self {
        padding: 12.0,
        row_height: 18.0,
        column_width: 132.0,
        header_height: 22.0,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub kind: TerrainKind,
    pub fill: String,
    /// Top-left of the swatch cell, relative to the panel.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendPanel {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub columns: usize,
    pub rows: usize,
    pub metrics: LegendMetrics,
    pub entries: Vec<LegendEntry>,
}

impl LegendPanel {
    /// Panel sized for `LEGEND_ORDER`, placed at the origin. Switches to two columns past seven
    /// entries and fills column by column.
    pub fn measure() -> Self {
        let m = LegendMetrics::STANDARD;
        let items = LEGEND_ORDER.len();
        let columns = if items > 7 { 2 } else { 1 };
        let rows = (items + columns - 1) / columns;
        let entries = LEGEND_ORDER
            .iter()
            .enumerate()
            .map(|(idx, kind)| {
                let (col, row) = (idx / rows, idx % rows);
                LegendEntry {
                    kind: *kind,
                    fill: tile_fill(*kind),
                    x: m.padding + col as f64 * m.column_width,
                    y: m.padding + m.header_height + row as f64 * m.row_height,
                }
            })
            .collect();
        Self {
            x: 0.0,
            y: 0.0,
            width: m.padding * 2.0 + columns as f64 * m.column_width,
            height: m.padding * 2.0 + m.header_height + rows as f64 * m.row_height,
            columns,
            rows,
            metrics: m,
            entries,
        }
    }
}

/// Everything needed to draw one level, in z-order: edges, then tiles, then labels, then the
/// legend overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: String,
    pub title: String,
    pub level: i32,
    pub edges: Vec<RoutedEdge>,
    pub tiles: Vec<TileShape>,
    pub labels: Vec<LabelBlock>,
    pub legend: Option<LegendPanel>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile(&self, vnum: &str) -> Option<&TileShape> {
        self.tiles.iter().find(|tile| tile.vnum.as_str() == vnum)
    }
}

/// Display title for an area scope.
pub fn scope_title(doc: &MapDoc, scope: &Scope) -> String {
    let name = match scope.area.as_ref() {
        Some(area) => doc.area_name(area).to_owned(),
        None => "All areas".to_owned(),
    };
    format!("{name} - Floor {}", scope.level)
}

pub fn compose_scene(doc: &MapDoc, scope: &Scope, view: &ViewParams, cfg: &RenderConfig) -> Scene {
    let rooms = doc.rooms_in_scope(scope);
    let title = scope_title(doc, scope);
    let background = view
        .background
        .clone()
        .unwrap_or_else(|| DEFAULT_BACKGROUND.to_owned());

    if rooms.is_empty() {
        tracing::debug!(title = %title, "empty scope");
        return Scene {
            width: EMPTY_WIDTH,
            height: EMPTY_HEIGHT,
            background,
            title,
            level: scope.level,
            edges: Vec::new(),
            tiles: Vec::new(),
            labels: Vec::new(),
            legend: None,
        };
    }

    let primary = view
        .primary
        .as_ref()
        .or_else(|| scope.area.as_ref().and_then(|area| doc.primary_vnum(area)));
    let center = choose_center(&rooms, view.center, view.focus.as_ref(), primary);
    let viewport = view.canvas.unwrap_or(DEFAULT_VIEWPORT);
    let mapper = CoordinateMapper::for_fit(view.fit, &rooms, center, viewport, cfg);

    let (width, mut height) = view.canvas.unwrap_or((mapper.width(), mapper.height()));
    let mut y_shift = 0.0;
    let legend = view.legend.visible.then(|| {
        let margin = view.legend.margin.unwrap_or(cfg.legend_margin);
        let mut panel = LegendPanel::measure();
        let corner = view.legend.corner;
        if view.legend.reserve_band {
            let band = panel.height + margin;
            height += band;
            if !corner.is_bottom() {
                y_shift = band;
            }
        }
        panel.x = if corner.is_right() {
            margin.max(width - panel.width - margin)
        } else {
            margin
        };
        panel.y = if corner.is_bottom() {
            margin.max(height - panel.height - margin)
        } else {
            margin
        };
        panel
    });

    let positions = mapper.positions(&rooms, y_shift);
    let obstacles = ObstacleMap::build(
        rooms
            .iter()
            .filter_map(|room| Some((&room.vnum, *positions.get(&room.vnum)?, room.display_label()))),
        cfg,
    );
    let edges = route_edges(&rooms, scope.level, &positions, &obstacles, cfg);

    let mut tiles = Vec::with_capacity(rooms.len());
    let mut labels = Vec::with_capacity(rooms.len());
    for room in &rooms {
        let Some(center) = positions.get(&room.vnum).copied() else {
            continue;
        };
        tiles.push(tile_shape(room, center, primary, view.focus.as_ref(), cfg));
        labels.push(label_block(room, center, cfg));
    }

    tracing::debug!(
        title = %title,
        rooms = tiles.len(),
        edges = edges.len(),
        width,
        height,
        "composed scene"
    );

    Scene {
        width,
        height,
        background,
        title,
        level: scope.level,
        edges,
        tiles,
        labels,
        legend,
    }
}

fn tile_shape(
    room: &Room,
    center: Point,
    primary: Option<&Vnum>,
    focus: Option<&Vnum>,
    cfg: &RenderConfig,
) -> TileShape {
    TileShape {
        vnum: room.vnum.clone(),
        center,
        vertices: octagon_vertices(center, cfg.tile),
        terrain: room.terrain(),
        fill: tile_fill(room.terrain()),
        primary: primary == Some(&room.vnum),
        focus: focus == Some(&room.vnum),
        badges: room.vertical_exits().collect(),
    }
}

fn label_block(room: &Room, center: Point, cfg: &RenderConfig) -> LabelBlock {
    let lines = wrap_label(room.display_label(), cfg.label_max_chars, cfg.label_max_lines);
    let first = first_baseline(center.y, lines.len(), cfg);
    let baselines = (0..lines.len())
        .map(|i| first + i as f64 * cfg.label_line_step)
        .collect();
    LabelBlock {
        vnum: room.vnum.clone(),
        x: center.x,
        lines,
        baselines,
    }
}
