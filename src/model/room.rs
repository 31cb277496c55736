// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::ids::{AreaId, ContinentId, Vnum, WorldId};

/// Grid position of a room. `vz` is the vertical level (floor).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub struct Coords {
    pub cx: i32,
    pub cy: i32,
    #[serde(default, alias = "z", alias = "level")]
    pub vz: i32,
}

impl Coords {
    pub fn new(cx: i32, cy: i32, vz: i32) -> Self {
        Self { cx, cy, vz }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Door {
    Simple,
    Locked {
        #[serde(rename = "keyId")]
        key_id: String,
    },
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ExitStatus {
    #[default]
    Unknown,
    Created,
    Confirmed,
    Anomalous,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExitDef {
    /// Target room. `None` while the far side has not been mapped yet.
    #[serde(default)]
    pub to: Option<Vnum>,
    #[serde(default, rename = "oneWay")]
    pub one_way: bool,
    #[serde(default)]
    pub door: Option<Door>,
    #[serde(default)]
    pub status: ExitStatus,
}

impl ExitDef {
    pub fn to(target: Vnum) -> Self {
        Self {
            to: Some(target),
            ..Self::default()
        }
    }

    pub fn one_way(mut self) -> Self {
        self.one_way = true;
        self
    }

    pub fn with_door(mut self, door: Door) -> Self {
        self.door = Some(door);
        self
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Inside,
    City,
    Desert,
    VeryIcy,
    Hills,
    Forest,
    Fields,
    Tundra,
    Ocean,
    Swim,
    Underwater,
    Underground,
    /// Catch-all for sector strings this crate does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

impl TerrainKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Inside => "inside",
            Self::City => "city",
            Self::Desert => "desert",
            Self::VeryIcy => "very_icy",
            Self::Hills => "hills",
            Self::Forest => "forest",
            Self::Fields => "fields",
            Self::Tundra => "tundra",
            Self::Ocean => "ocean",
            Self::Swim => "swim",
            Self::Underwater => "underwater",
            Self::Underground => "underground",
        }
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of a room in the World → Continent → Area catalog. Missing ids mean "unassigned".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_id: Option<WorldId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent_id: Option<ContinentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<AreaId>,
}

impl Category {
    pub fn area(area_id: AreaId) -> Self {
        Self {
            area_id: Some(area_id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Room {
    pub vnum: Vnum,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<TerrainKind>,
    pub coords: Coords,
    #[serde(default)]
    pub exits: BTreeMap<Direction, ExitDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Room {
    pub fn new(vnum: Vnum, coords: Coords) -> Self {
        Self {
            vnum,
            label: None,
            sector: None,
            coords,
            exits: BTreeMap::new(),
            category: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_sector(mut self, sector: TerrainKind) -> Self {
        self.sector = Some(sector);
        self
    }

    pub fn with_exit(mut self, dir: Direction, exit: ExitDef) -> Self {
        self.exits.insert(dir, exit);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// The label to draw: the room label, or the vnum when the label is missing or blank.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => self.vnum.as_str(),
        }
    }

    pub fn terrain(&self) -> TerrainKind {
        self.sector.unwrap_or_default()
    }

    pub fn area_id(&self) -> Option<&AreaId> {
        self.category.as_ref().and_then(|c| c.area_id.as_ref())
    }

    /// Whether this room has an exit in `dir` that leads back to `from`.
    pub fn has_exit_to(&self, dir: Direction, from: &Vnum) -> bool {
        self.exits
            .get(&dir)
            .and_then(|exit| exit.to.as_ref())
            .is_some_and(|to| to == from)
    }

    /// Directions of vertical exits that point at a known room id.
    pub fn vertical_exits(&self) -> impl Iterator<Item = Direction> + '_ {
        self.exits
            .iter()
            .filter(|(dir, exit)| dir.is_vertical() && exit.to.is_some())
            .map(|(dir, _)| *dir)
    }
}
