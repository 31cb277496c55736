// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stroke colors for edges. Curved edges get a stable, hash-picked palette color so that
//! re-rendering the same document never reshuffles them.

use crate::model::Vnum;

pub const STRAIGHT_COLOR: &str = "#E6E6E6";

pub const CURVE_PALETTE: [&str; 6] = [
    "#35A7FF", "#FF6F91", "#FFC75F", "#C34A36", "#7DFFB3", "#B967FF",
];

const INDEX_STRIDE: u64 = 97;

/// djb2-xor over UTF-16 code units with 32-bit wrapping arithmetic.
pub fn hash_str(s: &str) -> u32 {
    s.encode_utf16().fold(5381_u32, |h, unit| {
        (h << 5).wrapping_add(h) ^ u32::from(unit)
    })
}

/// Palette color for the curved edge at position `index` in the edge list.
pub fn pick_curve_color(from: &Vnum, to: &Vnum, index: usize) -> &'static str {
    let base = hash_str(&format!("curve:{from}->{to}"));
    let offset = (index as u64).saturating_mul(INDEX_STRIDE);
    let slot = u64::from(base).saturating_add(offset) % CURVE_PALETTE.len() as u64;
    CURVE_PALETTE[slot as usize]
}
