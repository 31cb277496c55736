// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mapwright: renders multi-level game maps (octagon tiles, routed exits) to SVG, text and the
//! terminal.
//!
//! The pipeline is `model` → `layout` (pixel mapping, obstacles, routing) → `render` (scene IR
//! plus SVG/ASCII back ends), with `tui` as an interactive back end over the same scene.

pub mod config;
pub mod layout;
pub mod model;
pub mod query;
pub mod render;
pub mod store;
pub mod tui;
