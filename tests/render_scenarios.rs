// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end rendering of small documents through the public API.

use mapwright::config::RenderConfig;
use mapwright::layout::{line_minus_rects, Rect, Segment, STRAIGHT_COLOR};
use mapwright::model::{AreaId, MapDoc, Scope};
use mapwright::render::{
    compose_scene, render_area_ascii, render_area_svg, render_area_svg_stacked, Scene, ViewParams,
};
use mapwright::store::parse_document;
use rstest::rstest;

fn keep() -> AreaId {
    AreaId::new("keep").unwrap()
}

fn room_json(vnum: &str, cx: i32, cy: i32, vz: i32, exits: &str) -> String {
    format!(
        r#""{vnum}": {{"vnum": "{vnum}", "coords": {{"cx": {cx}, "cy": {cy}, "vz": {vz}}},
            "category": {{"areaId": "keep"}}, "exits": {{{exits}}}}}"#
    )
}

fn doc_of(rooms: &[String]) -> MapDoc {
    let text = format!(r#"{{"meta": {{}}, "rooms": {{{}}}}}"#, rooms.join(","));
    parse_document(&text).unwrap()
}

/// R1 at (0,0) with one exit to its east neighbour R2 at (1,0).
fn pair(dir: &str, exit_extra: &str, back: &str) -> MapDoc {
    pair_at(1, dir, exit_extra, back)
}

fn pair_at(r2_cx: i32, dir: &str, exit_extra: &str, back: &str) -> MapDoc {
    doc_of(&[
        room_json("R1", 0, 0, 0, &format!(r#""{dir}": {{"to": "R2"{exit_extra}}}"#)),
        room_json("R2", r2_cx, 0, 0, back),
    ])
}

fn total_length(segments: &[Segment]) -> f64 {
    segments.iter().map(Segment::length).sum()
}

fn scene(doc: &MapDoc, level: i32) -> Scene {
    compose_scene(
        doc,
        &Scope::area(keep(), level),
        &ViewParams::export(),
        &RenderConfig::export(),
    )
}

#[test]
fn missing_reciprocal_between_neighbours_draws_solid_and_dashed_paths() {
    let doc = pair("E", "", "");
    let scene = scene(&doc, 0);
    assert_eq!(scene.tiles.len(), 2);
    assert_eq!(scene.edges.len(), 1);

    let edge = &scene.edges[0];
    assert!(!edge.is_curved());
    assert_eq!(edge.color, STRAIGHT_COLOR);
    assert!(total_length(&edge.segments) > 9.0);
    assert!(total_length(&edge.implied_reverse) > 9.0);

    let svg = render_area_svg(&doc, &keep(), 0, &ViewParams::export(), &RenderConfig::export());
    assert!(svg.contains(r#"stroke-dasharray="6 6""#));
    assert!(svg.contains(STRAIGHT_COLOR));
}

#[rstest]
#[case::reciprocal(r#""W": {"to": "R1"}"#, "")]
#[case::one_way("", r#", "oneWay": true"#)]
fn implied_reverse_is_suppressed(#[case] back: &str, #[case] extra: &str) {
    let doc = pair("E", extra, back);
    let scene = scene(&doc, 0);
    let forward = scene
        .edges
        .iter()
        .find(|edge| edge.from.as_str() == "R1")
        .unwrap();
    assert!(forward.implied_reverse.is_empty());

    let svg = render_area_svg(&doc, &keep(), 0, &ViewParams::export(), &RenderConfig::export());
    assert!(!svg.contains("stroke-dasharray"));
}

#[test]
fn distant_rooms_keep_both_paths_too() {
    let doc = pair_at(3, "E", "", "");
    let scene = scene(&doc, 0);
    let edge = &scene.edges[0];
    assert!(!edge.is_curved());
    // 132px between centers minus both insets.
    assert!(total_length(&edge.segments) > 90.0);
    assert!(total_length(&edge.implied_reverse) > 90.0);
}

#[rstest]
#[case::neighbour(1)]
#[case::distant(3)]
fn mismatched_direction_reroutes_with_a_curve(#[case] r2_cx: i32) {
    let doc = pair_at(r2_cx, "N", "", "");
    let scene = scene(&doc, 0);
    assert_eq!(scene.edges.len(), 1);
    let edge = &scene.edges[0];
    assert!(edge.is_curved());
    assert_ne!(edge.color, STRAIGHT_COLOR);
    assert!(edge.segments.len() > 2);
    assert!(!edge.implied_reverse.is_empty());
}

#[test]
fn curved_routes_are_deterministic() {
    let doc = pair("S", "", "");
    let first = scene(&doc, 0);
    let second = scene(&doc, 0);
    assert_eq!(first.edges, second.edges);

    let cfg = RenderConfig::export();
    let a = render_area_svg(&doc, &keep(), 0, &ViewParams::export(), &cfg);
    let b = render_area_svg(&doc, &keep(), 0, &ViewParams::export(), &cfg);
    assert_eq!(a, b);
}

#[test]
fn empty_level_renders_placeholder() {
    let doc = pair("E", "", "");
    let scene = scene(&doc, 7);
    assert!(scene.is_empty());
    assert!(scene.edges.is_empty());

    let svg = render_area_svg(&doc, &keep(), 7, &ViewParams::export(), &RenderConfig::export());
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("No rooms to render."));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn single_floor_body_is_embedded_in_stacked_export() {
    let doc = pair("E", "", r#""W": {"to": "R1"}"#);
    let cfg = RenderConfig::export();
    let view = ViewParams::export();

    let single = render_area_svg(&doc, &keep(), 0, &view, &cfg);
    let stacked = render_area_svg_stacked(&doc, &keep(), &view, &cfg);

    let after_open = single.splitn(3, '\n').nth(2).unwrap();
    let body = after_open.strip_suffix("</svg>\n").unwrap();
    assert!(!body.is_empty());
    assert!(stacked.contains(body));
    assert!(stacked.contains(r#"<g transform="translate(0,0)">"#));
}

#[test]
fn stacked_export_orders_ground_then_up_then_down() {
    let doc = doc_of(&[
        room_json("B1", 0, 0, -1, ""),
        room_json("G", 0, 0, 0, ""),
        room_json("U1", 0, 0, 1, ""),
        room_json("U2", 0, 0, 2, ""),
    ]);
    let svg = render_area_svg_stacked(&doc, &keep(), &ViewParams::export(), &RenderConfig::export());
    let at = |needle: &str| svg.find(needle).unwrap();
    assert!(at("Floor 0") < at("Floor 1"));
    assert!(at("Floor 1") < at("Floor 2"));
    assert!(at("Floor 2") < at("Floor -1"));
    assert_eq!(svg.matches("<g transform=").count(), 4);
}

#[test]
fn clipping_without_obstacles_keeps_the_segment() {
    let seg = Segment::new(0.0, 0.0, 100.0, 0.0);
    let out = line_minus_rects(seg, &[], 6.0);
    assert_eq!(out.as_slice(), &[seg]);
}

#[test]
fn clipping_inside_an_obstacle_removes_everything() {
    let seg = Segment::new(10.0, 10.0, 20.0, 10.0);
    let out = line_minus_rects(seg, &[Rect::new(0.0, 0.0, 50.0, 50.0)], 6.0);
    assert!(out.is_empty());
}

#[test]
fn clipping_splits_around_an_obstacle_with_gap() {
    let seg = Segment::new(0.0, 0.0, 100.0, 0.0);
    let out = line_minus_rects(seg, &[Rect::new(40.0, -5.0, 20.0, 10.0)], 6.0);
    assert_eq!(out.len(), 2);
    assert!(out[0].x2 <= 34.0 + 1e-9);
    assert!(out[1].x1 >= 66.0 - 1e-9);
}

#[test]
fn ascii_export_lays_out_labels_and_connectors() {
    let doc = pair("E", "", r#""W": {"to": "R1"}"#);
    let text = render_area_ascii(&doc, &keep(), 0, &RenderConfig::export()).unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Area: keep (keep)  Level: 0");
    assert_eq!(lines[1], "Rooms: 2");
    assert!(lines.contains(&" R1 -R2"));

    let spread = pair_at(3, "E", "", r#""W": {"to": "R1"}"#);
    let text = render_area_ascii(&spread, &keep(), 0, &RenderConfig::export()).unwrap();
    assert!(text.lines().any(|line| line == " R1 ---------R2"));
}

#[test]
fn ascii_export_of_empty_level_says_so() {
    let doc = pair("E", "", "");
    let text = render_area_ascii(&doc, &keep(), 3, &RenderConfig::export()).unwrap();
    assert!(text.contains("Rooms: 0"));
    assert!(text.contains("(no rooms)"));
}
