// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scene composition and back ends.
//!
//! `compose_scene` turns a document scope into a back-end independent `Scene`; the SVG writer,
//! the text map and the terminal viewer all draw from it (the text map uses its own coarse grid).

pub mod ascii;
pub mod canvas;
pub mod palette;
pub mod scene;
pub mod svg;
mod text;

pub use ascii::{render_area_ascii, AsciiRenderError, ASCII_LABEL_WIDTH};
pub use canvas::{Canvas, CanvasError};
pub use palette::{fill_for, parse_hex_rgb, tile_fill, LEGEND_ORDER, UNKNOWN_FILL};
pub use scene::{
    compose_scene, scope_title, LabelBlock, LegendCorner, LegendEntry, LegendMetrics,
    LegendOptions, LegendPanel, ParseLegendCornerError, Scene, TileShape, ViewParams,
    DEFAULT_BACKGROUND, DEFAULT_VIEWPORT,
};
pub use svg::{
    empty_svg, render_area_svg, render_area_svg_stacked, render_scene_svg, render_scope_svg,
    stack_order,
};

pub(crate) use text::truncate_with_ellipsis;
