// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering constants.
//!
//! Every pixel measurement and routing heuristic used by the layout pipeline lives here. The
//! curve threshold and bulge sizing are tuned by eye, so they are plain configuration rather
//! than fixed invariants.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Octagon tile size (flat-to-flat), px.
    pub tile: f64,
    /// Gap between neighbouring tiles, px.
    pub gap: f64,
    /// Extra clearance in front of an arrowhead so it does not tuck under the tile.
    pub head_clear: f64,
    /// Margin added to the octagon corner inset when trimming edge endpoints.
    pub corner_margin: f64,
    /// Clearance around tiles used as obstacles.
    pub tile_pad: f64,
    /// Gap kept between an edge and an obstacle it is clipped against, px.
    pub clip_gap: f64,

    pub label_font_size: f64,
    pub label_line_step: f64,
    pub label_char_width: f64,
    pub label_pad_x: f64,
    pub label_pad_y: f64,
    pub label_max_chars: usize,
    pub label_max_lines: usize,

    /// Padding around content in content-fit layouts.
    pub content_pad: f64,
    pub min_canvas_width: f64,
    pub min_canvas_height: f64,

    /// Edges whose declared direction has a dot product below this with the geometric direction
    /// are drawn as curves.
    pub curve_threshold: f64,
    /// Also curve when a diagonal declaration meets an axis-aligned placement (or vice versa).
    pub curve_on_axis_mismatch: bool,
    pub port_push_out: f64,
    pub port_push_in: f64,
    pub lead_out: f64,
    pub lead_in: f64,
    pub bulge_factor: f64,
    pub bulge_min: f64,
    pub bulge_max: f64,
    pub curve_step: f64,
    pub curve_min_segments: usize,
    pub curve_max_segments: usize,

    /// Vertical gap between floors in a stacked export.
    pub stack_gap: f64,
    pub legend_margin: f64,

    pub ascii_pitch_x: usize,
    pub ascii_pitch_y: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::export()
    }
}

impl RenderConfig {
    /// Preset for static SVG exports.
    pub fn export() -> Self {
        Self {
            tile: 40.0,
            gap: 4.0,
            head_clear: 10.0,
            corner_margin: 4.0,
            tile_pad: 6.0,
            clip_gap: 6.0,
            label_font_size: 12.0,
            label_line_step: 14.0,
            label_char_width: 7.0,
            label_pad_x: 8.0,
            label_pad_y: 4.0,
            label_max_chars: 14,
            label_max_lines: 3,
            content_pad: 96.0,
            min_canvas_width: 420.0,
            min_canvas_height: 320.0,
            curve_threshold: 0.3,
            curve_on_axis_mismatch: false,
            port_push_out: 8.0,
            port_push_in: 10.0,
            lead_out: 65.0,
            lead_in: 35.0,
            bulge_factor: 0.55,
            bulge_min: 40.0,
            bulge_max: 240.0,
            curve_step: 10.0,
            curve_min_segments: 6,
            curve_max_segments: 80,
            stack_gap: 48.0,
            legend_margin: 12.0,
            ascii_pitch_x: 4,
            ascii_pitch_y: 2,
        }
    }

    /// Preset for the live viewer: shorter leaders and roomier content padding.
    pub fn interactive() -> Self {
        Self {
            lead_out: 55.0,
            lead_in: 24.0,
            content_pad: 120.0,
            min_canvas_width: 320.0,
            min_canvas_height: 240.0,
            ..Self::export()
        }
    }

    pub fn pitch(&self) -> f64 {
        self.tile + self.gap
    }

    pub fn half_tile(&self) -> f64 {
        self.tile / 2.0
    }

    /// Reads a JSON object of overrides. Missing keys keep the values from `base`.
    pub fn load_overrides(path: impl AsRef<Path>, base: &Self) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_overrides(&raw, base).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse_overrides(raw: &str, base: &Self) -> Result<Self, serde_json::Error> {
        let overrides: serde_json::Value = serde_json::from_str(raw)?;
        let mut merged = serde_json::to_value(base)?;
        if let (Some(target), serde_json::Value::Object(source)) = (merged.as_object_mut(), overrides)
        {
            for (key, value) in source {
                target.insert(key, value);
            }
        }
        serde_json::from_value(merged)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read config {}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}
