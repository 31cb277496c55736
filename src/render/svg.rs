// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! SVG serialization of a [`Scene`].
//!
//! A level is written as a self-contained body (background, title, edges, tiles, labels, legend,
//! accessible title). Single-level documents wrap one body in `<svg>`; stacked documents wrap
//! each level's body, unchanged, in a translated group.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use rayon::prelude::*;

use crate::config::RenderConfig;
use crate::layout::{Point, RoutedEdge, Segment};
use crate::model::{AreaId, Direction, Door, MapDoc, Scope};

use super::scene::{
    compose_scene, LabelBlock, LegendPanel, Scene, TileShape, ViewParams, DEFAULT_BACKGROUND,
};

const FONT_FAMILY: &str = "ui-sans-serif,system-ui,-apple-system,Segoe UI,Roboto,Helvetica,Arial";
const OUTLINE: &str = "rgba(0,0,0,0.9)";
const EMPTY_MESSAGE: &str = "No rooms to render.";

/// Single-level export of `area` at `level`.
pub fn render_area_svg(
    doc: &MapDoc,
    area: &AreaId,
    level: i32,
    view: &ViewParams,
    cfg: &RenderConfig,
) -> String {
    render_scope_svg(doc, &Scope::area(area.clone(), level), view, cfg)
}

pub fn render_scope_svg(doc: &MapDoc, scope: &Scope, view: &ViewParams, cfg: &RenderConfig) -> String {
    let scene = compose_scene(doc, scope, view, cfg);
    tracing::info!(title = %scene.title, rooms = scene.tiles.len(), "rendering svg");
    render_scene_svg(&scene)
}

pub fn render_scene_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(8 * 1024);
    // Writes into a String are infallible.
    let _ = write_document(&mut out, scene);
    out
}

/// Levels in stacking order: ground floor, then upper floors ascending, then basements
/// descending.
pub fn stack_order(levels: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let levels = levels.into_iter().collect::<BTreeSet<_>>();
    let zero = levels.contains(&0).then_some(0);
    let up = levels.iter().copied().filter(|vz| *vz > 0);
    let down = levels.iter().rev().copied().filter(|vz| *vz < 0);
    zero.into_iter().chain(up).chain(down).collect()
}

/// Every level of `area` rendered on its own and stacked vertically. Only the first level gets
/// a legend.
pub fn render_area_svg_stacked(
    doc: &MapDoc,
    area: &AreaId,
    view: &ViewParams,
    cfg: &RenderConfig,
) -> String {
    let levels = stack_order(doc.levels_in_area(area));
    let background = view.background.as_deref().unwrap_or(DEFAULT_BACKGROUND);
    let title = format!("{} - all floors", doc.area_name(area));
    if levels.is_empty() {
        return empty_svg(background, &title);
    }

    let parts = levels
        .par_iter()
        .enumerate()
        .map(|(i, level)| {
            let mut level_view = view.clone();
            level_view.legend.visible = view.legend.visible && i == 0;
            let scene = compose_scene(doc, &Scope::area(area.clone(), *level), &level_view, cfg);
            let mut body = String::with_capacity(8 * 1024);
            let _ = write_level_body(&mut body, &scene);
            (scene.width, scene.height, body)
        })
        .collect::<Vec<_>>();

    let width = parts.iter().map(|(w, _, _)| *w).fold(0.0, f64::max);
    let gaps = cfg.stack_gap * (parts.len().saturating_sub(1)) as f64;
    let height = parts.iter().map(|(_, h, _)| *h).sum::<f64>() + gaps;
    tracing::info!(title = %title, levels = parts.len(), "rendering stacked svg");

    let mut out = String::with_capacity(parts.iter().map(|(_, _, b)| b.len() + 64).sum());
    let _ = write_stacked(&mut out, width, height, background, &title, &parts, cfg.stack_gap);
    out
}

fn write_stacked(
    out: &mut String,
    width: f64,
    height: f64,
    background: &str,
    title: &str,
    parts: &[(f64, f64, String)],
    gap: f64,
) -> fmt::Result {
    write_open(out, width, height)?;
    write_background(out, width, height, background)?;
    let mut y = 0.0;
    for (w, h, body) in parts {
        let dx = ((width - w) / 2.0).round();
        write!(out, r#"<g transform="translate({},{})">"#, Num(dx), Num(y))?;
        out.push_str(body);
        out.push_str("</g>\n");
        y += h + gap;
    }
    writeln!(out, "<title>{}</title>", Escaped::text(title))?;
    out.push_str("</svg>\n");
    Ok(())
}

/// Placeholder document for a scope without rooms.
pub fn empty_svg(background: &str, title: &str) -> String {
    let mut out = String::new();
    let _ = write_empty(&mut out, background, title);
    out
}

fn write_empty(out: &mut String, background: &str, title: &str) -> fmt::Result {
    write_open(out, super::scene::EMPTY_WIDTH, super::scene::EMPTY_HEIGHT)?;
    write_empty_body(out, background, title)?;
    out.push_str("</svg>\n");
    Ok(())
}

fn write_empty_body(out: &mut String, background: &str, title: &str) -> fmt::Result {
    write_background(out, super::scene::EMPTY_WIDTH, super::scene::EMPTY_HEIGHT, background)?;
    writeln!(
        out,
        r##"<text x="16" y="28" fill="#ddd" font-family="{FONT_FAMILY}" font-size="14">{EMPTY_MESSAGE}</text>"##
    )?;
    writeln!(out, "<title>{}</title>", Escaped::text(title))
}

fn write_document(out: &mut String, scene: &Scene) -> fmt::Result {
    write_open(out, scene.width, scene.height)?;
    write_level_body(out, scene)?;
    out.push_str("</svg>\n");
    Ok(())
}

fn write_open(out: &mut String, width: f64, height: f64) -> fmt::Result {
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = Num(width),
        h = Num(height),
    )
}

fn write_background(out: &mut String, width: f64, height: f64, background: &str) -> fmt::Result {
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        Num(width),
        Num(height),
        Escaped::attr(background)
    )
}

/// Everything between `<svg>` and `</svg>` for one level.
fn write_level_body(out: &mut String, scene: &Scene) -> fmt::Result {
    if scene.is_empty() {
        return write_empty_body(out, &scene.background, &scene.title);
    }
    write_background(out, scene.width, scene.height, &scene.background)?;
    writeln!(
        out,
        r##"<text x="{}" y="24" fill="#d8d8d8" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="14">{}</text>"##,
        Num((scene.width / 2.0).round()),
        Escaped::text(&scene.title)
    )?;

    out.push_str("<g class=\"edges\">\n");
    for edge in &scene.edges {
        write_edge(out, edge)?;
    }
    out.push_str("</g>\n<g class=\"rooms\">\n");
    for tile in &scene.tiles {
        write_tile(out, tile)?;
    }
    for label in &scene.labels {
        write_label(out, label)?;
    }
    out.push_str("</g>\n");

    if let Some(legend) = &scene.legend {
        write_legend(out, legend)?;
    }
    writeln!(out, "<title>{}</title>", Escaped::text(&scene.title))
}

fn write_line(out: &mut String, seg: &Segment, color: &str, extra: &str) -> fmt::Result {
    writeln!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{color}" stroke-width="2" stroke-linecap="round"{extra}/>"#,
        Num(seg.x1),
        Num(seg.y1),
        Num(seg.x2),
        Num(seg.y2),
    )
}

fn write_edge(out: &mut String, edge: &RoutedEdge) -> fmt::Result {
    for seg in &edge.segments {
        write_line(out, seg, edge.color, r#" stroke-opacity="0.95""#)?;
    }

    let [tip, left, right] = edge.arrow.triangle();
    writeln!(
        out,
        r#"<path d="M {} {} L {} {} L {} {} Z" fill="{}"/>"#,
        Num(tip.x),
        Num(tip.y),
        Num(left.x),
        Num(left.y),
        Num(right.x),
        Num(right.y),
        edge.color
    )?;

    if let Some(door) = &edge.door {
        match &door.door {
            Door::Simple => {
                let (p, q) = door.tick();
                write_door_tick(out, p, q, OUTLINE, 5)?;
                write_door_tick(out, p, q, "#fff", 3)?;
            }
            Door::Locked { .. } => write_padlock(out, door.at)?,
        }
    }

    for seg in &edge.implied_reverse {
        write_line(
            out,
            seg,
            edge.color,
            r#" stroke-opacity="0.65" stroke-dasharray="6 6""#,
        )?;
    }
    Ok(())
}

fn write_door_tick(out: &mut String, p: Point, q: Point, stroke: &str, width: u32) -> fmt::Result {
    writeln!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{}" stroke-linecap="round"/>"#,
        Num(p.x),
        Num(p.y),
        Num(q.x),
        Num(q.y),
        itoa::Buffer::new().format(width),
    )
}

fn write_padlock(out: &mut String, at: Point) -> fmt::Result {
    const BODY_R: f64 = 5.0;
    const SHACKLE_R: f64 = 4.0;
    let shackle_y = at.y - BODY_R - 2.0;
    for (radius, stroke, width) in [(BODY_R + 1.5, OUTLINE, 3), (BODY_R, "#fff", 2)] {
        writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{stroke}" stroke-width="{width}"/>"#,
            Num(at.x),
            Num(at.y),
            Num(radius),
        )?;
    }
    for (stroke, width) in [(OUTLINE, 3), ("#fff", 2)] {
        writeln!(
            out,
            r#"<path d="M {} {} a {r} {r} 0 0 1 {d} 0" fill="none" stroke="{stroke}" stroke-width="{width}"/>"#,
            Num(at.x - SHACKLE_R),
            Num(shackle_y),
            r = Num(SHACKLE_R),
            d = Num(SHACKLE_R * 2.0),
        )?;
    }
    Ok(())
}

fn write_tile(out: &mut String, tile: &TileShape) -> fmt::Result {
    out.push_str("<polygon points=\"");
    for (i, p) in tile.vertices.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{},{}", Num(p.x), Num(p.y))?;
    }
    let (stroke, width) = if tile.primary {
        ("rgba(255,255,255,0.95)", 2)
    } else {
        ("rgba(255,255,255,0.22)", 1)
    };
    writeln!(
        out,
        r#"" fill="{}" stroke="{stroke}" stroke-width="{width}"/>"#,
        tile.fill
    )?;

    if tile.focus {
        let r = (tile.vertices[2].x - tile.center.x) + 5.0;
        writeln!(
            out,
            r##"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="#FFC75F" stroke-width="2" stroke-dasharray="4 3"/>"##,
            Num(tile.center.x),
            Num(tile.center.y),
            Num(r),
        )?;
    }

    let half = tile.vertices[2].x - tile.center.x;
    for dir in &tile.badges {
        let dy = if *dir == Direction::U { 9.0 - half } else { half - 2.0 };
        writeln!(
            out,
            r##"<text x="{}" y="{}" fill="#ddd" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="9" font-weight="700">{}</text>"##,
            Num(tile.center.x + half - 5.0),
            Num(tile.center.y + dy),
            dir.as_str(),
        )?;
    }
    Ok(())
}

fn write_label(out: &mut String, label: &LabelBlock) -> fmt::Result {
    for (line, y) in label.lines.iter().zip(&label.baselines) {
        writeln!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="12" font-weight="600" fill="white" stroke="black" stroke-width="3" paint-order="stroke" font-family="{FONT_FAMILY}">{}</text>"#,
            Num(label.x),
            Num(*y),
            Escaped::text(line),
        )?;
    }
    Ok(())
}

fn write_legend(out: &mut String, legend: &LegendPanel) -> fmt::Result {
    let m = legend.metrics;
    writeln!(
        out,
        r#"<g class="legend" transform="translate({},{})">"#,
        Num(legend.x),
        Num(legend.y)
    )?;
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" rx="10" ry="10" fill="rgba(20,20,24,0.92)" stroke="rgba(255,255,255,0.12)"/>"#,
        Num(legend.width),
        Num(legend.height),
    )?;
    writeln!(
        out,
        r##"<text x="{}" y="{}" fill="#ddd" font-size="12" font-weight="600" font-family="{FONT_FAMILY}">Terrain</text>"##,
        Num(m.padding),
        Num(m.padding + 14.0),
    )?;
    for entry in &legend.entries {
        writeln!(
            out,
            r##"<circle cx="{}" cy="{}" r="6" fill="{}" stroke="rgba(255,255,255,0.22)"/><text x="{}" y="{}" fill="#ddd" font-size="12" font-family="{FONT_FAMILY}">{}</text>"##,
            Num(entry.x + 6.0),
            Num(entry.y + 6.0),
            entry.fill,
            Num(entry.x + 18.0),
            Num(entry.y + 10.0),
            entry.kind,
        )?;
    }
    out.push_str("</g>\n");
    Ok(())
}

/// Coordinate formatting: whole numbers without a fraction, everything else rounded to two
/// decimals.
#[derive(Debug, Clone, Copy)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            return f.write_str("0");
        }
        let rounded = (self.0 * 100.0).round() / 100.0;
        if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
            let mut buf = itoa::Buffer::new();
            return f.write_str(buf.format(rounded as i64));
        }
        write!(f, "{rounded}")
    }
}

/// XML escaping for user text (`&`, `<`, `>`) or attribute values (`&`, `<`, `"`).
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a> {
    text: &'a str,
    attr: bool,
}

impl<'a> Escaped<'a> {
    pub fn text(text: &'a str) -> Self {
        Self { text, attr: false }
    }

    pub fn attr(text: &'a str) -> Self {
        Self { text, attr: true }
    }
}

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.text.as_bytes();
        let third = if self.attr { b'"' } else { b'>' };
        let mut start = 0;
        while let Some(offset) = memchr::memchr3(b'&', b'<', third, &bytes[start..]) {
            let idx = start + offset;
            f.write_str(&self.text[start..idx])?;
            f.write_str(match bytes[idx] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                _ => "&quot;",
            })?;
            start = idx + 1;
        }
        f.write_str(&self.text[start..])
    }
}
