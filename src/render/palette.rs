// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terrain fill colors and legend order.

use crate::model::TerrainKind;

/// Alpha suffix appended to terrain fills for tiles and legend swatches.
pub const TILE_ALPHA_SUFFIX: &str = "E6";

pub const UNKNOWN_FILL: &str = "#0f0f0f";

/// Terrain kinds shown in the legend, in display order.
pub const LEGEND_ORDER: [TerrainKind; 11] = [
    TerrainKind::Unknown,
    TerrainKind::Inside,
    TerrainKind::City,
    TerrainKind::Desert,
    TerrainKind::VeryIcy,
    TerrainKind::Hills,
    TerrainKind::Forest,
    TerrainKind::Fields,
    TerrainKind::Tundra,
    TerrainKind::Ocean,
    TerrainKind::Swim,
];

/// Opaque `#RRGGBB` fill for `kind`. Kinds without their own entry share the unknown fill.
pub fn fill_for(kind: TerrainKind) -> &'static str {
    match kind {
        TerrainKind::Inside => "#6F6BA8",
        TerrainKind::City => "#7E8796",
        TerrainKind::Desert => "#C8A15A",
        TerrainKind::VeryIcy => "#6FB6D6",
        TerrainKind::Hills => "#7BA76C",
        TerrainKind::Forest => "#2E6B4F",
        TerrainKind::Fields => "#9FC25E",
        TerrainKind::Tundra => "#77B5A9",
        TerrainKind::Ocean => "#151B54",
        TerrainKind::Swim => "#0041C2",
        TerrainKind::Unknown | TerrainKind::Underwater | TerrainKind::Underground => UNKNOWN_FILL,
    }
}

/// Fill with the tile alpha suffix, as drawn on tiles and swatches.
pub fn tile_fill(kind: TerrainKind) -> String {
    format!("{}{TILE_ALPHA_SUFFIX}", fill_for(kind))
}

/// `#RRGGBB` → `(r, g, b)`; `None` for anything else.
pub fn parse_hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() < 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::{fill_for, parse_hex_rgb, tile_fill, LEGEND_ORDER, UNKNOWN_FILL};
    use crate::model::TerrainKind;

    #[test]
    fn kinds_without_entry_use_unknown_fill() {
        assert_eq!(fill_for(TerrainKind::Underwater), UNKNOWN_FILL);
        assert_eq!(fill_for(TerrainKind::Underground), UNKNOWN_FILL);
        assert_eq!(fill_for(TerrainKind::Forest), "#2E6B4F");
    }

    #[test]
    fn tile_fill_adds_alpha() {
        assert_eq!(tile_fill(TerrainKind::City), "#7E8796E6");
    }

    #[test]
    fn legend_lists_each_kind_once() {
        let mut seen = LEGEND_ORDER.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), LEGEND_ORDER.len());
        assert_eq!(LEGEND_ORDER[0], TerrainKind::Unknown);
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_rgb("#7E8796E6"), Some((0x7E, 0x87, 0x96)));
        assert_eq!(parse_hex_rgb("#fff"), None);
        assert_eq!(parse_hex_rgb("rgba(0,0,0,1)"), None);
    }
}
