// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{AreaId, ContinentId, Vnum, WorldId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogWorld {
    pub id: WorldId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogContinent {
    pub id: ContinentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "blank_as_none")]
    #[schemars(with = "Option<String>")]
    pub world_id: Option<WorldId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogArea {
    pub id: AreaId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "blank_as_none")]
    #[schemars(with = "Option<String>")]
    pub world_id: Option<WorldId>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "blank_as_none")]
    #[schemars(with = "Option<String>")]
    pub continent_id: Option<ContinentId>,
    /// Room used as the default centering anchor for this area.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "blank_as_none")]
    #[schemars(with = "Option<String>")]
    pub primary_vnum: Option<Vnum>,
}

/// World → Continent → Area hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    #[serde(default)]
    pub worlds: BTreeMap<WorldId, CatalogWorld>,
    #[serde(default)]
    pub continents: BTreeMap<ContinentId, CatalogContinent>,
    #[serde(default)]
    pub areas: BTreeMap<AreaId, CatalogArea>,
}

impl Catalog {
    pub fn area(&self, area_id: &AreaId) -> Option<&CatalogArea> {
        self.areas.get(area_id)
    }

    /// Display name of an area, falling back to its id for uncatalogued areas.
    pub fn area_name<'a>(&'a self, area_id: &'a AreaId) -> &'a str {
        match self.areas.get(area_id) {
            Some(area) if !area.name.trim().is_empty() => &area.name,
            _ => area_id.as_str(),
        }
    }

    pub fn primary_vnum(&self, area_id: &AreaId) -> Option<&Vnum> {
        self.areas.get(area_id).and_then(|area| area.primary_vnum.as_ref())
    }
}

// The editor writes `""` for unassigned parents; treat it the same as a missing key.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: TryFrom<String>,
    T::Error: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => T::try_from(raw).map(Some).map_err(serde::de::Error::custom),
    }
}
