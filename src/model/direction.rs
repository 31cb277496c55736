// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::layout::geometry::Vec2;

/// Exit direction: eight compass directions plus up/down.
///
/// Ordering follows the compass clockwise from north, then `U`, `D`. Exit maps are keyed by this
/// order, so it also fixes the order in which edges are collected for a room.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    U,
    D,
}

impl Direction {
    pub const ALL: [Direction; 10] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
        Direction::U,
        Direction::D,
    ];

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::U | Self::D)
    }

    pub fn is_diagonal(self) -> bool {
        matches!(self, Self::NE | Self::SE | Self::SW | Self::NW)
    }

    pub fn reverse(self) -> Self {
        match self {
            Self::N => Self::S,
            Self::NE => Self::SW,
            Self::E => Self::W,
            Self::SE => Self::NW,
            Self::S => Self::N,
            Self::SW => Self::NE,
            Self::W => Self::E,
            Self::NW => Self::SE,
            Self::U => Self::D,
            Self::D => Self::U,
        }
    }

    /// Screen-space unit vector (y grows downwards). Vertical directions have no planar component.
    pub fn unit(self) -> Vec2 {
        let (ux, uy) = match self {
            Self::N => (0.0, -1.0),
            Self::NE => (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            Self::E => (1.0, 0.0),
            Self::SE => (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            Self::S => (0.0, 1.0),
            Self::SW => (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            Self::W => (-1.0, 0.0),
            Self::NW => (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            Self::U | Self::D => (0.0, 0.0),
        };
        Vec2::new(ux, uy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
            Self::U => "U",
            Self::D => "D",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    raw: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction: {}", self.raw)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str() == upper)
            .ok_or_else(|| ParseDirectionError { raw: s.to_owned() })
    }
}
