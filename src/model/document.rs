// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::direction::Direction;
use super::ids::{AreaId, ContinentId, Vnum, WorldId};
use super::room::Room;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct MapDocMeta {
    #[serde(default)]
    pub directions: Vec<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Catalog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}

/// A map document: catalog metadata plus all rooms keyed by vnum.
///
/// Renderers only ever borrow a document; every render pass treats it as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct MapDoc {
    #[serde(default)]
    pub meta: MapDocMeta,
    #[serde(default)]
    pub rooms: BTreeMap<Vnum, Room>,
}

/// Room filter for one render pass. `None` for a catalog level means "any".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scope {
    pub world: Option<WorldId>,
    pub continent: Option<ContinentId>,
    pub area: Option<AreaId>,
    pub level: i32,
}

impl Scope {
    pub fn area(area: AreaId, level: i32) -> Self {
        Self {
            area: Some(area),
            level,
            ..Self::default()
        }
    }

    pub fn with_level(&self, level: i32) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    fn matches_catalog(&self, room: &Room) -> bool {
        let category = room.category.as_ref();
        let world_ok = self
            .world
            .as_ref()
            .map_or(true, |w| category.and_then(|c| c.world_id.as_ref()) == Some(w));
        let continent_ok = self
            .continent
            .as_ref()
            .map_or(true, |c| category.and_then(|cat| cat.continent_id.as_ref()) == Some(c));
        let area_ok = self
            .area
            .as_ref()
            .map_or(true, |a| category.and_then(|c| c.area_id.as_ref()) == Some(a));
        world_ok && continent_ok && area_ok
    }

    pub fn matches(&self, room: &Room) -> bool {
        self.matches_catalog(room) && room.coords.vz == self.level
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocIssue {
    /// The map key and the room's own `vnum` disagree.
    KeyMismatch { key: Vnum, vnum: Vnum },
}

impl std::fmt::Display for DocIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyMismatch { key, vnum } => {
                write!(f, "room stored under key {key} declares vnum {vnum}")
            }
        }
    }
}

impl MapDoc {
    pub fn catalog(&self) -> Option<&Catalog> {
        self.meta.catalog.as_ref()
    }

    pub fn room(&self, vnum: &str) -> Option<&Room> {
        self.rooms.get(vnum)
    }

    pub fn insert_room(&mut self, room: Room) {
        self.rooms.insert(room.vnum.clone(), room);
    }

    /// Rooms matching `scope`, in vnum order.
    pub fn rooms_in_scope(&self, scope: &Scope) -> Vec<&Room> {
        self.rooms.values().filter(|room| scope.matches(room)).collect()
    }

    /// Rooms matching the catalog part of `scope` on any level.
    pub fn rooms_in_catalog_scope(&self, scope: &Scope) -> Vec<&Room> {
        self.rooms.values().filter(|room| scope.matches_catalog(room)).collect()
    }

    pub fn rooms_in_area(&self, area: &AreaId) -> Vec<&Room> {
        self.rooms.values().filter(|room| room.area_id() == Some(area)).collect()
    }

    pub fn levels_in_area(&self, area: &AreaId) -> BTreeSet<i32> {
        self.rooms_in_area(area).into_iter().map(|room| room.coords.vz).collect()
    }

    pub fn area_name<'a>(&'a self, area: &'a AreaId) -> &'a str {
        match self.catalog() {
            Some(catalog) => catalog.area_name(area),
            None => area.as_str(),
        }
    }

    pub fn primary_vnum(&self, area: &AreaId) -> Option<&Vnum> {
        self.catalog().and_then(|catalog| catalog.primary_vnum(area))
    }

    /// Structural issues that the editor normally prevents. Rendering tolerates them.
    pub fn validate(&self) -> Vec<DocIssue> {
        self.rooms
            .iter()
            .filter(|(key, room)| **key != room.vnum)
            .map(|(key, room)| DocIssue::KeyMismatch {
                key: key.clone(),
                vnum: room.vnum.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{DocIssue, MapDoc, Scope};
    use crate::model::fixtures::{area, temple_doc, vnum};
    use crate::model::{Coords, Room};

    #[test]
    fn scope_filters_by_area_and_level() {
        let doc = temple_doc();
        let ground = doc.rooms_in_scope(&Scope::area(area("temple"), 0));
        let vnums = ground.iter().map(|r| r.vnum.as_str()).collect::<Vec<_>>();
        assert_eq!(vnums, vec!["3001", "3002", "3003", "3004"]);

        let upstairs = doc.rooms_in_scope(&Scope::area(area("temple"), 1));
        assert_eq!(upstairs.len(), 1);

        let nowhere = doc.rooms_in_scope(&Scope::area(area("sewers"), 0));
        assert!(nowhere.is_empty());
    }

    #[test]
    fn unscoped_catalog_matches_every_room_on_the_level() {
        let doc = temple_doc();
        let scope = Scope { level: 0, ..Scope::default() };
        assert_eq!(doc.rooms_in_scope(&scope).len(), 5);
    }

    #[test]
    fn levels_in_area_are_sorted_and_unique() {
        let doc = temple_doc();
        let levels = doc.levels_in_area(&area("temple")).into_iter().collect::<Vec<_>>();
        assert_eq!(levels, vec![-1, 0, 1]);
    }

    #[test]
    fn area_name_and_primary_come_from_catalog() {
        let doc = temple_doc();
        assert_eq!(doc.area_name(&area("temple")), "Temple of Midgaard");
        assert_eq!(doc.primary_vnum(&area("temple")), Some(&vnum("3001")));
        assert_eq!(MapDoc::default().area_name(&area("temple")), "temple");
    }

    #[test]
    fn parses_full_document_shape() {
        let doc: MapDoc = serde_json::from_str(
            r#"{
              "meta": {"directions": ["N","E","S","W","U","D"], "grid": {"type": "octagon"}, "revision": 4},
              "rooms": {
                "R1": {"vnum": "R1", "coords": {"cx": 0, "cy": 0, "vz": 0},
                       "exits": {"E": {"to": "R2", "oneWay": false, "door": null, "status": "unknown"}},
                       "flags": {"dark": true}},
                "R2": {"vnum": "R2", "coords": {"cx": 1, "cy": 0, "vz": 0}, "exits": {}}
              }
            }"#,
        )
        .unwrap();
        assert_eq!(doc.rooms.len(), 2);
        assert_eq!(doc.meta.revision, Some(4));
        assert!(doc.validate().is_empty());
    }

    #[test]
    fn validate_reports_key_mismatch() {
        let mut doc = MapDoc::default();
        doc.rooms.insert(vnum("A"), Room::new(vnum("B"), Coords::default()));
        assert_eq!(
            doc.validate(),
            vec![DocIssue::KeyMismatch { key: vnum("A"), vnum: vnum("B") }]
        );
    }
}
