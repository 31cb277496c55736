// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Planar geometry for flat-top octagon tiles (screen space, y grows downwards).

use std::f64::consts::SQRT_2;

use crate::model::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, v: Vec2, distance: f64) -> Self {
        Self::new(self.x + v.ux * distance, self.y + v.uy * distance)
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A direction vector; unit length unless degenerate (`(0, 0)`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub ux: f64,
    pub uy: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { ux: 0.0, uy: 0.0 };

    pub const fn new(ux: f64, uy: f64) -> Self {
        Self { ux, uy }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.ux * other.ux + self.uy * other.uy
    }

    /// z component of the 2D cross product.
    pub fn cross(self, other: Self) -> f64 {
        self.ux * other.uy - self.uy * other.ux
    }

    /// Left-hand normal in screen space.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.uy, self.ux)
    }

    pub fn is_zero(self) -> bool {
        self.ux == 0.0 && self.uy == 0.0
    }
}

/// Normalizes a pixel delta. A zero-length delta has no direction and yields `(0, 0)`.
pub fn unit_vector(dx: f64, dy: f64) -> Vec2 {
    let len = dx.hypot(dy);
    if len == 0.0 || !len.is_finite() {
        return Vec2::ZERO;
    }
    Vec2::new(dx / len, dy / len)
}

pub fn unit_between(from: Point, to: Point) -> Vec2 {
    unit_vector(to.x - from.x, to.y - from.y)
}

/// Distance from a flat face to the adjacent corner, measured along the face: `(√2 − 1) · s/2`.
pub fn corner_inset(tile: f64) -> f64 {
    (SQRT_2 - 1.0) * (tile / 2.0)
}

/// The eight vertices of an octagon centered at `center`, clockwise from the top-left corner.
pub fn octagon_vertices(center: Point, tile: f64) -> [Point; 8] {
    let h = tile / 2.0;
    let k = corner_inset(tile);
    let Point { x, y } = center;
    [
        Point::new(x - k, y - h),
        Point::new(x + k, y - h),
        Point::new(x + h, y - k),
        Point::new(x + h, y + k),
        Point::new(x + k, y + h),
        Point::new(x - k, y + h),
        Point::new(x - h, y + k),
        Point::new(x - h, y - k),
    ]
}

/// Attachment point on the tile face facing `dir`, pushed along `dir` by `push`
/// (positive = away from the tile). Vertical directions attach at the center.
pub fn edge_port(center: Point, dir: Direction, tile: f64, push: f64) -> Point {
    let h = tile / 2.0;
    let k = corner_inset(tile);
    let (ox, oy) = match dir {
        Direction::N => (0.0, -h),
        Direction::NE => (h, -k),
        Direction::E => (h, 0.0),
        Direction::SE => (h, k),
        Direction::S => (0.0, h),
        Direction::SW => (-h, k),
        Direction::W => (-h, 0.0),
        Direction::NW => (-h, -k),
        Direction::U | Direction::D => return center,
    };
    Point::new(center.x + ox, center.y + oy).offset(dir.unit(), push)
}

pub fn quad_point(t: f64, p0: Point, p1: Point, p2: Point) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

/// Samples a quadratic Bézier into straight pieces roughly `step` px long (by chord length),
/// with the piece count clamped to `[min_segments, max_segments]`.
pub fn chop_quad(
    p0: Point,
    p1: Point,
    p2: Point,
    step: f64,
    min_segments: usize,
    max_segments: usize,
) -> Vec<(Point, Point)> {
    let chord = p0.distance(p2);
    let wanted = if step > 0.0 { (chord / step).ceil() as usize } else { max_segments };
    let n = wanted.clamp(min_segments.max(1), max_segments.max(min_segments).max(1));

    let mut out = Vec::with_capacity(n);
    let mut prev = p0;
    for i in 1..=n {
        let next = quad_point(i as f64 / n as f64, p0, p1, p2);
        out.push((prev, next));
        prev = next;
    }
    out
}

/// Mean of `points`; the origin for an empty set.
pub fn centroid(points: impl IntoIterator<Item = Point>) -> Point {
    let mut sum = Point::default();
    let mut count = 0usize;
    for p in points {
        sum.x += p.x;
        sum.y += p.y;
        count += 1;
    }
    if count == 0 {
        return Point::default();
    }
    Point::new(sum.x / count as f64, sum.y / count as f64)
}
