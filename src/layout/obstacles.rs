// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Axis-aligned obstacles (label boxes, tile footprints) and the segment clipper that keeps edges
//! clear of them.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::config::RenderConfig;
use crate::model::Vnum;

use super::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// A straight piece of an edge, `(x1, y1) → (x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn between(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    /// Point at parameter `t` (0 = start, 1 = end).
    pub fn at(&self, t: f64) -> Point {
        Point::new(
            self.x1 + (self.x2 - self.x1) * t,
            self.y1 + (self.y2 - self.y1) * t,
        )
    }

    fn sub(&self, t0: f64, t1: f64) -> Self {
        Self::between(self.at(t0), self.at(t1))
    }
}

pub type Segments = SmallVec<[Segment; 4]>;

/// Greedy whitespace word wrap. Lines past `max_lines` are dropped; a single word longer than
/// `max_chars` keeps a line to itself.
pub fn wrap_label(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if max_lines == 0 {
        return lines;
    }
    let mut current = String::new();
    for word in text.split_whitespace() {
        let trial_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if trial_len > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            if lines.len() >= max_lines {
                return lines;
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// First-line baseline for a block of `line_count` lines vertically centered on `center_y`.
pub fn first_baseline(center_y: f64, line_count: usize, cfg: &RenderConfig) -> f64 {
    let extra = line_count.saturating_sub(1) as f64;
    center_y - extra * cfg.label_line_step / 2.0
}

/// Padded box around a wrapped label centered on the room.
pub fn label_rect(center: Point, lines: &[String], cfg: &RenderConfig) -> Rect {
    let max_chars = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0).max(1);
    let text_w = max_chars as f64 * cfg.label_char_width;
    let text_h = lines.len() as f64 * cfg.label_line_step;
    let first_y = first_baseline(center.y, lines.len(), cfg);
    Rect::new(
        center.x - text_w / 2.0 - cfg.label_pad_x,
        first_y - cfg.label_font_size - cfg.label_pad_y,
        text_w + cfg.label_pad_x * 2.0,
        text_h + cfg.label_pad_y * 2.0,
    )
}

/// Square footprint of a tile plus clearance.
pub fn tile_rect(center: Point, cfg: &RenderConfig) -> Rect {
    let r = cfg.half_tile() + cfg.tile_pad;
    Rect::new(center.x - r, center.y - r, r * 2.0, r * 2.0)
}

/// Label and tile obstacles of every room in one render pass.
#[derive(Debug, Clone, Default)]
pub struct ObstacleMap {
    labels: BTreeMap<Vnum, Rect>,
    tiles: BTreeMap<Vnum, Rect>,
}

impl ObstacleMap {
    /// `rooms` yields each room's pixel center and display label.
    pub fn build<'a>(
        rooms: impl IntoIterator<Item = (&'a Vnum, Point, &'a str)>,
        cfg: &RenderConfig,
    ) -> Self {
        let mut map = Self::default();
        for (vnum, center, label) in rooms {
            let lines = wrap_label(label, cfg.label_max_chars, cfg.label_max_lines);
            map.labels.insert(vnum.clone(), label_rect(center, &lines, cfg));
            map.tiles.insert(vnum.clone(), tile_rect(center, cfg));
        }
        map
    }

    pub fn labels(&self) -> &BTreeMap<Vnum, Rect> {
        &self.labels
    }

    pub fn tiles(&self) -> &BTreeMap<Vnum, Rect> {
        &self.tiles
    }

    /// Every label, plus every tile except the edge's own endpoints.
    pub fn avoid_for(&self, from: &Vnum, to: &Vnum) -> Vec<Rect> {
        let mut out = Vec::with_capacity(self.labels.len() + self.tiles.len());
        out.extend(self.labels.values().copied());
        out.extend(
            self.tiles
                .iter()
                .filter(|(vnum, _)| *vnum != from && *vnum != to)
                .map(|(_, rect)| *rect),
        );
        out
    }

    /// Labels and tiles of every room other than the edge's endpoints. Straight paths run under
    /// their own endpoints' labels.
    pub fn avoid_between(&self, from: &Vnum, to: &Vnum) -> Vec<Rect> {
        let not_endpoint = |(vnum, _): &(&Vnum, &Rect)| *vnum != from && *vnum != to;
        self.labels
            .iter()
            .filter(not_endpoint)
            .chain(self.tiles.iter().filter(not_endpoint))
            .map(|(_, rect)| *rect)
            .collect()
    }
}

/// Liang–Barsky: the parameter interval of `seg` inside `rect`, or `None` when they are disjoint.
/// Zero-area rectangles never intersect.
pub fn clip_interval(seg: &Segment, rect: &Rect) -> Option<(f64, f64)> {
    if rect.is_degenerate() {
        return None;
    }
    let dx = seg.x2 - seg.x1;
    let dy = seg.y2 - seg.y1;
    let p = [-dx, dx, -dy, dy];
    let q = [
        seg.x1 - rect.x,
        rect.x + rect.w - seg.x1,
        seg.y1 - rect.y,
        rect.y + rect.h - seg.y1,
    ];

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (pi, qi) in p.into_iter().zip(q) {
        if pi == 0.0 {
            if qi < 0.0 {
                return None;
            }
            continue;
        }
        let t = qi / pi;
        if pi < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }
    Some((t0, t1))
}

/// `seg` minus every rectangle it crosses, each cut widened by `gap_px` on both sides.
/// Untouched segments come back as-is; fully covered segments come back empty.
pub fn line_minus_rects(seg: Segment, rects: &[Rect], gap_px: f64) -> Segments {
    let len = seg.length();
    let gap_t = if len > 0.0 { gap_px / len } else { 0.0 };

    let mut cuts: SmallVec<[(f64, f64); 8]> = rects
        .iter()
        .filter_map(|rect| clip_interval(&seg, rect))
        .map(|(a, b)| ((a - gap_t).max(0.0), (b + gap_t).min(1.0)))
        .filter(|(a, b)| *b > 0.0 && *a < 1.0)
        .collect();

    let mut out = Segments::new();
    if cuts.is_empty() {
        out.push(seg);
        return out;
    }
    cuts.sort_by(|x, y| x.0.total_cmp(&y.0));

    let mut merged: SmallVec<[(f64, f64); 8]> = SmallVec::new();
    for (a, b) in cuts {
        match merged.last_mut() {
            Some(last) if a <= last.1 => last.1 = last.1.max(b),
            _ => merged.push((a, b)),
        }
    }

    let mut prev = 0.0_f64;
    for (a, b) in merged {
        if a > prev {
            out.push(seg.sub(prev, a));
        }
        prev = prev.max(b);
    }
    if prev < 1.0 {
        out.push(Segment::between(seg.at(prev), seg.end()));
    }
    tracing::trace!(pieces = out.len(), "clipped segment");
    out
}
