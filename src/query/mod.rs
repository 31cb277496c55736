// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a map document.

pub mod rooms;

pub use rooms::{best_room_match, room_search, suggest_areas, RoomSearchMode, FUZZY_MIN_RATIO};
