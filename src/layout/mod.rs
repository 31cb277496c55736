// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph → geometry.
//!
//! This module maps grid coordinates to pixels, builds the obstacle model and routes edges
//! around it. Everything here is pure and recomputed per render pass.

pub mod color;
pub mod geometry;
pub mod mapper;
pub mod obstacles;
pub mod routing;

pub use color::{hash_str, pick_curve_color, CURVE_PALETTE, STRAIGHT_COLOR};
pub use geometry::{
    centroid, chop_quad, corner_inset, edge_port, octagon_vertices, quad_point, unit_between,
    unit_vector, Point, Vec2,
};
pub use mapper::{choose_center, CoordinateMapper, FitMode, GridPoint, ParseGridPointError};
pub use obstacles::{
    clip_interval, label_rect, line_minus_rects, tile_rect, wrap_label, ObstacleMap, Rect,
    Segment, Segments,
};
pub use routing::{
    collect_edges, decide_route, route_edges, Arrowhead, CurveGeometry, DoorGlyph, EdgeRoute,
    EdgeSpec, RouteDecision, RoutedEdge,
};
