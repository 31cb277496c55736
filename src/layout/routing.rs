// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edge routing.
//!
//! Every planar exit whose target is on the same level becomes one routed edge: a trimmed
//! straight line when the declared direction agrees with where the target actually sits, or a
//! chopped quadratic curve leaving and entering through the declared faces when it does not.
//! All pieces are clipped against the obstacle map.

use std::collections::BTreeMap;

use crate::config::RenderConfig;
use crate::model::{Direction, Door, Room, Vnum};

use super::color::{pick_curve_color, STRAIGHT_COLOR};
use super::geometry::{centroid, chop_quad, corner_inset, edge_port, unit_between, Point, Vec2};
use super::obstacles::{line_minus_rects, ObstacleMap, Rect, Segment};

pub const ARROW_SIZE: f64 = 8.0;
const AXIS_EPS: f64 = 1e-6;
const SIDE_EPS: f64 = 1e-3;

/// One drawable exit, before geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub from: Vnum,
    pub to: Vnum,
    pub dir: Direction,
    pub one_way: bool,
    pub door: Option<Door>,
    /// Two-way exit whose target has no exit back through the reverse direction.
    pub missing_reciprocal: bool,
}

/// Collects edges between rooms in `rooms` on `level`, in vnum then direction order.
///
/// Vertical exits, unresolved exits and exits to rooms outside the scope are skipped.
pub fn collect_edges(rooms: &[&Room], level: i32) -> Vec<EdgeSpec> {
    let by_vnum: BTreeMap<&Vnum, &Room> = rooms.iter().map(|room| (&room.vnum, *room)).collect();

    let mut sorted = rooms.to_vec();
    sorted.sort_by(|a, b| a.vnum.cmp(&b.vnum));

    let mut edges = Vec::new();
    for room in sorted {
        for (dir, exit) in &room.exits {
            if dir.is_vertical() {
                continue;
            }
            let Some(target_vnum) = exit.to.as_ref() else {
                continue;
            };
            let Some(target) = by_vnum.get(target_vnum) else {
                tracing::debug!(from = %room.vnum, to = %target_vnum, dir = %dir, "skipping exit to room outside scope");
                continue;
            };
            if room.coords.vz != level || target.coords.vz != level {
                continue;
            }
            let missing_reciprocal =
                !exit.one_way && !target.has_exit_to(dir.reverse(), &room.vnum);
            edges.push(EdgeSpec {
                from: room.vnum.clone(),
                to: target.vnum.clone(),
                dir: *dir,
                one_way: exit.one_way,
                door: exit.door.clone(),
                missing_reciprocal,
            });
        }
    }
    edges
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Straight,
    Curved,
}

/// Straight when the declared direction roughly points at the target, curved otherwise.
pub fn decide_route(dir: Direction, from: Point, to: Point, cfg: &RenderConfig) -> RouteDecision {
    let declared = dir.unit();
    let geometric = unit_between(from, to);
    let dot = declared.dot(geometric);
    if dot < cfg.curve_threshold {
        return RouteDecision::Curved;
    }
    if cfg.curve_on_axis_mismatch {
        let axis_aligned =
            (to.x - from.x).abs() < AXIS_EPS || (to.y - from.y).abs() < AXIS_EPS;
        if dir.is_diagonal() == axis_aligned {
            return RouteDecision::Curved;
        }
    }
    RouteDecision::Straight
}

/// Arrowhead anchored at `tip`, pointing along `dir`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: Point,
    pub dir: Vec2,
}

impl Arrowhead {
    /// Tip, left and right corners of the head triangle.
    pub fn triangle(&self) -> [Point; 3] {
        let n = self.dir.perpendicular();
        let back = Point::new(
            self.tip.x - self.dir.ux * ARROW_SIZE,
            self.tip.y - self.dir.uy * ARROW_SIZE,
        );
        let half = ARROW_SIZE * 0.5;
        [
            self.tip,
            Point::new(back.x - n.ux * half, back.y - n.uy * half),
            Point::new(back.x + n.ux * half, back.y + n.uy * half),
        ]
    }
}

/// Door marker on the straight chord between two rooms.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorGlyph {
    pub at: Point,
    /// Geometric direction of the chord; simple-door ticks are drawn across it.
    pub dir: Vec2,
    pub door: Door,
}

impl DoorGlyph {
    pub const TICK_HALF: f64 = 6.0;

    pub fn tick(&self) -> (Point, Point) {
        let n = self.dir.perpendicular();
        (
            self.at.offset(n, -Self::TICK_HALF),
            self.at.offset(n, Self::TICK_HALF),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveGeometry {
    pub start_port: Point,
    pub lead_start: Point,
    pub control: Point,
    pub lead_end: Point,
    pub end_port: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeRoute {
    Straight { start: Point, end: Point },
    Curved(CurveGeometry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEdge {
    pub index: usize,
    pub from: Vnum,
    pub to: Vnum,
    pub dir: Direction,
    pub one_way: bool,
    pub route: EdgeRoute,
    /// Clipped pieces of the forward path.
    pub segments: Vec<Segment>,
    pub arrow: Arrowhead,
    pub color: &'static str,
    pub door: Option<DoorGlyph>,
    /// Dashed pieces flagging a missing reciprocal exit; empty otherwise.
    pub implied_reverse: Vec<Segment>,
}

impl RoutedEdge {
    pub fn decision(&self) -> RouteDecision {
        match self.route {
            EdgeRoute::Straight { .. } => RouteDecision::Straight,
            EdgeRoute::Curved(_) => RouteDecision::Curved,
        }
    }

    pub fn is_curved(&self) -> bool {
        self.decision() == RouteDecision::Curved
    }
}

/// Routes every edge between `rooms` on `level`.
///
/// `positions` must hold a pixel center for every room; edges touching a room without one are
/// dropped.
pub fn route_edges(
    rooms: &[&Room],
    level: i32,
    positions: &BTreeMap<Vnum, Point>,
    obstacles: &ObstacleMap,
    cfg: &RenderConfig,
) -> Vec<RoutedEdge> {
    let specs = collect_edges(rooms, level);
    let cluster_center = centroid(positions.values().copied());
    let router = Router {
        cfg,
        obstacles,
        cluster_center,
    };

    specs
        .into_iter()
        .enumerate()
        .filter_map(|(index, spec)| {
            let a = *positions.get(&spec.from)?;
            let b = *positions.get(&spec.to)?;
            Some(router.route(index, spec, a, b))
        })
        .collect()
}

struct Router<'a> {
    cfg: &'a RenderConfig,
    obstacles: &'a ObstacleMap,
    cluster_center: Point,
}

impl Router<'_> {
    fn clip(&self, seg: Segment, avoid: &[Rect], out: &mut Vec<Segment>) {
        out.extend(line_minus_rects(seg, avoid, self.cfg.clip_gap));
    }

    fn route(&self, index: usize, spec: EdgeSpec, a: Point, b: Point) -> RoutedEdge {
        let cfg = self.cfg;
        let avoid = self.obstacles.avoid_for(&spec.from, &spec.to);
        let through = self.obstacles.avoid_between(&spec.from, &spec.to);
        let u = unit_between(a, b);
        let inset_start = corner_inset(cfg.tile) + cfg.corner_margin;
        let inset_end = inset_start + cfg.head_clear;
        let start = a.offset(u, inset_start);
        let end = b.offset(u, -inset_end);

        let decision = decide_route(spec.dir, a, b, cfg);
        tracing::debug!(from = %spec.from, to = %spec.to, dir = %spec.dir, ?decision, "routed edge");

        let mut segments = Vec::new();
        let (route, arrow, color) = match decision {
            RouteDecision::Straight => {
                self.clip(Segment::between(start, end), &through, &mut segments);
                let last = segments
                    .last()
                    .copied()
                    .unwrap_or_else(|| Segment::between(start, end));
                let along = unit_between(last.start(), last.end());
                let arrow = Arrowhead {
                    tip: last.end(),
                    dir: if along.is_zero() { u } else { along },
                };
                (EdgeRoute::Straight { start, end }, arrow, STRAIGHT_COLOR)
            }
            RouteDecision::Curved => {
                let curve = self.curve(spec.dir, a, b);
                let lead_in = Segment::between(curve.start_port, curve.lead_start);
                self.clip(lead_in, &avoid, &mut segments);
                for (p, q) in chop_quad(
                    curve.lead_start,
                    curve.control,
                    curve.lead_end,
                    cfg.curve_step,
                    cfg.curve_min_segments,
                    cfg.curve_max_segments,
                ) {
                    self.clip(Segment::between(p, q), &avoid, &mut segments);
                }
                self.clip(Segment::between(curve.lead_end, curve.end_port), &avoid, &mut segments);
                let arrow = Arrowhead {
                    tip: curve.end_port,
                    dir: spec.dir.unit(),
                };
                let color = pick_curve_color(&spec.from, &spec.to, index);
                (EdgeRoute::Curved(curve), arrow, color)
            }
        };

        let door = spec.door.clone().map(|door| DoorGlyph {
            at: a.midpoint(b),
            dir: u,
            door,
        });

        let mut implied_reverse = Vec::new();
        if spec.missing_reciprocal {
            let dashed = Segment::between(b.offset(u, -inset_start), a.offset(u, inset_end));
            self.clip(dashed, &through, &mut implied_reverse);
            if implied_reverse.is_empty() {
                implied_reverse.push(dashed);
            }
        }

        RoutedEdge {
            index,
            from: spec.from,
            to: spec.to,
            dir: spec.dir,
            one_way: spec.one_way,
            route,
            segments,
            arrow,
            color,
            door,
            implied_reverse,
        }
    }

    /// Leaves `a` through the face of `dir` and enters `b` through the face of its reverse, with
    /// straight leaders on both ends and a quadratic bulge in between.
    fn curve(&self, dir: Direction, a: Point, b: Point) -> CurveGeometry {
        let cfg = self.cfg;
        let exit = dir.unit();
        let back = dir.reverse();
        let outward = back.unit();

        let start_port = edge_port(a, dir, cfg.tile, cfg.port_push_out);
        let end_port =
            edge_port(b, back, cfg.tile, cfg.port_push_in).offset(outward, -cfg.head_clear);
        let lead_start = start_port.offset(exit, cfg.lead_out);
        let lead_end = end_port.offset(outward, cfg.lead_in);

        let chord_x = lead_end.x - lead_start.x;
        let chord_y = lead_end.y - lead_start.y;
        let raw_len = chord_x.hypot(chord_y);
        let len = if raw_len > 0.0 { raw_len } else { 1.0 };
        let normal = Vec2::new(chord_x / len, chord_y / len).perpendicular();
        let mid = lead_start.midpoint(lead_end);

        let cross = exit.cross(Vec2::new(chord_x, chord_y));
        let side = if cross.abs() > SIDE_EPS {
            if cross < 0.0 {
                1.0
            } else {
                -1.0
            }
        } else {
            let to_center = Vec2::new(self.cluster_center.x - mid.x, self.cluster_center.y - mid.y);
            if normal.dot(to_center) > 0.0 {
                1.0
            } else {
                -1.0
            }
        };

        let bulge = (cfg.bulge_factor * len).clamp(cfg.bulge_min, cfg.bulge_max.max(cfg.bulge_min));
        let control = mid.offset(normal, bulge * side);

        CurveGeometry {
            start_port,
            lead_start,
            control,
            lead_end,
            end_port,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;

    use super::{collect_edges, decide_route, route_edges, Arrowhead, EdgeRoute, RouteDecision};
    use crate::config::RenderConfig;
    use crate::layout::color::CURVE_PALETTE;
    use crate::layout::geometry::{Point, Vec2};
    use crate::layout::obstacles::{ObstacleMap, Segment};
    use crate::model::fixtures::{pair_doc, temple_doc, vnum};
    use crate::model::{Direction, Door, ExitDef, MapDoc, Room, Vnum};

    fn layout(doc: &MapDoc, level: i32) -> (Vec<&Room>, BTreeMap<Vnum, Point>, ObstacleMap) {
        let cfg = RenderConfig::export();
        let rooms = doc.rooms.values().filter(|r| r.coords.vz == level).collect::<Vec<_>>();
        let positions = rooms
            .iter()
            .map(|r| {
                let p = Point::new(
                    100.0 + f64::from(r.coords.cx) * cfg.pitch(),
                    100.0 + f64::from(r.coords.cy) * cfg.pitch(),
                );
                (r.vnum.clone(), p)
            })
            .collect::<BTreeMap<_, _>>();
        let obstacles = ObstacleMap::build(
            rooms.iter().map(|r| (&r.vnum, positions[&r.vnum], r.display_label())),
            &cfg,
        );
        (rooms, positions, obstacles)
    }

    #[test]
    fn collect_skips_vertical_dangling_and_cross_level_exits() {
        let doc = temple_doc();
        let rooms = doc.rooms.values().filter(|r| r.coords.vz == 0).collect::<Vec<_>>();
        let edges = collect_edges(&rooms, 0);
        let pairs = edges
            .iter()
            .map(|e| (e.from.as_str(), e.dir, e.to.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                ("3001", Direction::N, "3004"),
                ("3001", Direction::E, "3002"),
                ("3001", Direction::S, "3003"),
                ("3002", Direction::W, "3001"),
                ("3004", Direction::S, "3001"),
            ]
        );
        let crypt = doc.rooms.values().filter(|r| r.coords.vz == -1).collect::<Vec<_>>();
        assert!(collect_edges(&crypt, -1).is_empty());
    }

    #[test]
    fn reciprocity_is_detected_not_enforced() {
        let doc = temple_doc();
        let rooms = doc.rooms.values().filter(|r| r.coords.vz == 0).collect::<Vec<_>>();
        let edges = collect_edges(&rooms, 0);
        let missing = edges
            .iter()
            .filter(|e| e.missing_reciprocal)
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect::<Vec<_>>();
        // Market Street has no exits at all; every other pair links back.
        assert_eq!(missing, vec![("3001", "3003")]);
    }

    #[rstest]
    #[case(Direction::E, RouteDecision::Straight)]
    #[case(Direction::NE, RouteDecision::Straight)]
    #[case(Direction::SE, RouteDecision::Straight)]
    #[case(Direction::N, RouteDecision::Curved)]
    #[case(Direction::S, RouteDecision::Curved)]
    #[case(Direction::W, RouteDecision::Curved)]
    fn decision_compares_declared_and_geometric_direction(
        #[case] dir: Direction,
        #[case] expected: RouteDecision,
    ) {
        let cfg = RenderConfig::export();
        let from = Point::new(0.0, 0.0);
        let to = Point::new(44.0, 0.0);
        assert_eq!(decide_route(dir, from, to, &cfg), expected);
        assert_eq!(decide_route(dir, from, to, &cfg), expected);
    }

    #[test]
    fn axis_mismatch_rule_is_opt_in() {
        let mut cfg = RenderConfig::export();
        let from = Point::new(0.0, 0.0);
        let to = Point::new(44.0, 0.0);
        assert_eq!(decide_route(Direction::NE, from, to, &cfg), RouteDecision::Straight);
        cfg.curve_on_axis_mismatch = true;
        assert_eq!(decide_route(Direction::NE, from, to, &cfg), RouteDecision::Curved);
        assert_eq!(decide_route(Direction::E, from, to, &cfg), RouteDecision::Straight);
        let diagonal = Point::new(44.0, 44.0);
        assert_eq!(decide_route(Direction::E, from, diagonal, &cfg), RouteDecision::Curved);
    }

    #[test]
    fn coincident_rooms_do_not_panic() {
        let cfg = RenderConfig::export();
        let p = Point::new(10.0, 10.0);
        assert_eq!(decide_route(Direction::E, p, p, &cfg), RouteDecision::Curved);

        let mut doc = pair_doc(Direction::E, ExitDef::to(vnum("R2")));
        if let Some(r2) = doc.rooms.get_mut("R2") {
            r2.coords.cx = 0;
        }
        let (rooms, positions, obstacles) = layout(&doc, 0);
        let edges = route_edges(&rooms, 0, &positions, &obstacles, &cfg);
        assert_eq!(edges.len(), 1);
        for seg in edges[0].segments.iter().chain(&edges[0].implied_reverse) {
            assert!(seg.x1.is_finite() && seg.y1.is_finite() && seg.x2.is_finite() && seg.y2.is_finite());
        }
    }

    #[test]
    fn straight_edge_is_inset_and_points_at_target() {
        let cfg = RenderConfig::export();
        let doc = pair_doc(Direction::E, ExitDef::to(vnum("R2")).one_way());
        let (rooms, positions, obstacles) = layout(&doc, 0);
        let edges = route_edges(&rooms, 0, &positions, &obstacles, &cfg);
        assert_eq!(edges.len(), 1);
        let edge = &edges[0];
        assert!(!edge.is_curved());
        assert!(edge.implied_reverse.is_empty());
        assert_eq!(edge.color, super::STRAIGHT_COLOR);
        let EdgeRoute::Straight { start, end } = edge.route else {
            panic!("expected straight route");
        };
        assert!(start.x > 100.0 && end.x < 144.0);
        assert_eq!(edge.arrow.dir, Vec2::new(1.0, 0.0));
        for seg in &edge.segments {
            assert!(seg.x1 >= start.x - 1e-9 && seg.x2 <= end.x + 1e-9);
        }
    }

    #[test]
    fn curved_edge_enters_through_the_declared_face() {
        let cfg = RenderConfig::export();
        let doc = pair_doc(Direction::N, ExitDef::to(vnum("R2")));
        let (rooms, positions, obstacles) = layout(&doc, 0);
        let edges = route_edges(&rooms, 0, &positions, &obstacles, &cfg);
        let edge = &edges[0];
        let EdgeRoute::Curved(curve) = edge.route else {
            panic!("expected curved route");
        };
        // R1 at (100,100) leaves upward, R2 at (144,100) is entered from below. The push-in
        // and the head clearance cancel out, so the tip lands on R2's south face.
        assert_eq!(curve.start_port, Point::new(100.0, 72.0));
        assert_eq!(curve.end_port, Point::new(144.0, 120.0));
        assert_eq!(curve.lead_end, Point::new(144.0, 155.0));
        assert_eq!(edge.arrow.tip, curve.end_port);
        assert_eq!(edge.arrow.dir, Direction::N.unit());
        assert_eq!(edge.arrow.dir, Vec2::new(0.0, -1.0));
        assert!(CURVE_PALETTE.contains(&edge.color));
        assert!(!edge.implied_reverse.is_empty());
    }

    #[test]
    fn neighbours_keep_solid_and_dashed_paths_under_their_labels() {
        let cfg = RenderConfig::export();
        let doc = pair_doc(Direction::E, ExitDef::to(vnum("R2")));
        let (rooms, positions, obstacles) = layout(&doc, 0);
        let edges = route_edges(&rooms, 0, &positions, &obstacles, &cfg);
        let edge = &edges[0];
        assert!(!edge.is_curved());
        let length = |segs: &[Segment]| segs.iter().map(Segment::length).sum::<f64>();
        // Inset to inset between centers 44px apart.
        assert!(length(&edge.segments) > 9.0);
        assert!(length(&edge.implied_reverse) > 9.0);
        let dashed = edge.implied_reverse[0];
        assert!(dashed.x1 > dashed.x2);
    }

    #[test]
    fn missing_reciprocal_always_yields_a_dashed_piece() {
        let cfg = RenderConfig::export();
        let doc = temple_doc();
        let (rooms, positions, obstacles) = layout(&doc, 0);
        let edges = route_edges(&rooms, 0, &positions, &obstacles, &cfg);
        let square_to_market = edges
            .iter()
            .find(|edge| edge.from == vnum("3001") && edge.to == vnum("3003"))
            .unwrap();
        assert!(!square_to_market.is_curved());
        assert!(!square_to_market.segments.is_empty());
        assert!(!square_to_market.implied_reverse.is_empty());
    }

    #[test]
    fn door_glyph_sits_on_chord_midpoint() {
        let cfg = RenderConfig::export();
        let doc = pair_doc(
            Direction::E,
            ExitDef::to(vnum("R2")).with_door(Door::Locked { key_id: "k".into() }),
        );
        let (rooms, positions, obstacles) = layout(&doc, 0);
        let edges = route_edges(&rooms, 0, &positions, &obstacles, &cfg);
        let door = edges[0].door.as_ref().unwrap();
        assert_eq!(door.at, Point::new(122.0, 100.0));
        let (p, q) = door.tick();
        assert_eq!((p.x, q.x), (122.0, 122.0));
        assert_eq!((q.y - p.y).abs(), 12.0);
    }

    #[test]
    fn arrowhead_triangle_is_behind_the_tip() {
        let arrow = Arrowhead {
            tip: Point::new(10.0, 0.0),
            dir: Vec2::new(1.0, 0.0),
        };
        let [tip, left, right] = arrow.triangle();
        assert_eq!(tip, Point::new(10.0, 0.0));
        assert_eq!(left, Point::new(2.0, -4.0));
        assert_eq!(right, Point::new(2.0, 4.0));
    }
}
