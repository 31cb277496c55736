// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Map document model.
//!
//! A document holds rooms (grid coordinates, directional exits, terrain) plus the
//! World → Continent → Area catalog they are classified into.

pub mod catalog;
pub mod direction;
pub mod document;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod room;

pub use catalog::{Catalog, CatalogArea, CatalogContinent, CatalogWorld};
pub use direction::{Direction, ParseDirectionError};
pub use document::{DocIssue, MapDoc, MapDocMeta, Scope};
pub use ids::{AreaId, ContinentId, Id, IdError, Vnum, WorldId};
pub use room::{Category, Coords, Door, ExitDef, ExitStatus, Room, TerrainKind};
