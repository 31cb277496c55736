// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal map viewer.
//!
//! Draws the same `Scene` the SVG exporter uses, composed in viewport mode and scaled to the
//! terminal (braille canvas). The scene is recomposed on navigation and on resize.

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
        Block, Borders, Clear, Paragraph,
    },
};

use crate::config::RenderConfig;
use crate::layout::{choose_center, GridPoint, Point};
use crate::model::{AreaId, Direction, MapDoc, Room, Scope, Vnum};
use crate::query::best_room_match;
use crate::render::{compose_scene, truncate_with_ellipsis, Scene, ViewParams};

mod theme;

use theme::{scene_color, TuiTheme};

/// Scene pixels per terminal column and row. Terminal cells are roughly twice as tall as wide.
const PX_PER_COL: f64 = 8.0;
const PX_PER_ROW: f64 = 16.0;
const LABEL_MAX_CHARS: usize = 12;
const SEARCH_PROMPT: char = '/';

/// Starting state for the viewer.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub area: AreaId,
    pub level: Option<i32>,
    pub focus: Option<Vnum>,
    pub center: Option<GridPoint>,
    /// Usually `RenderConfig::interactive()` with any user overrides applied.
    pub config: RenderConfig,
}

/// Runs the interactive viewer until the user quits.
pub fn run(doc: MapDoc, options: ViewerOptions) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(doc, options);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app, &theme))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(cols, rows) => {
                    tracing::debug!(cols, rows, "terminal resized");
                    app.invalidate();
                }
                _ => {}
            }
        }
    }

    Ok(())
}

pub(crate) struct App {
    doc: MapDoc,
    area: AreaId,
    levels: Vec<i32>,
    level: i32,
    center: GridPoint,
    focus: Option<Vnum>,
    show_legend: bool,
    search: Option<String>,
    status: Option<String>,
    cfg: RenderConfig,
    viewport: (u16, u16),
    scene: Option<Scene>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(doc: MapDoc, options: ViewerOptions) -> Self {
        let levels = doc.levels_in_area(&options.area).into_iter().collect::<Vec<_>>();
        let focus_level = options
            .focus
            .as_ref()
            .and_then(|vnum| doc.room(vnum.as_str()))
            .map(|room| room.coords.vz);
        let level = options
            .level
            .or(focus_level)
            .unwrap_or_else(|| if levels.contains(&0) || levels.is_empty() { 0 } else { levels[0] });

        let mut app = Self {
            doc,
            area: options.area,
            levels,
            level,
            center: GridPoint::default(),
            focus: options.focus,
            show_legend: true,
            search: None,
            status: None,
            cfg: options.config,
            viewport: (0, 0),
            scene: None,
            should_quit: false,
        };
        app.center = options.center.unwrap_or_else(|| app.default_center());
        app
    }

    fn scope(&self) -> Scope {
        Scope::area(self.area.clone(), self.level)
    }

    fn rooms_on_level(&self) -> Vec<&Room> {
        self.doc.rooms_in_scope(&self.scope())
    }

    fn default_center(&self) -> GridPoint {
        let rooms = self.rooms_on_level();
        choose_center(
            &rooms,
            None,
            self.focus.as_ref(),
            self.doc.primary_vnum(&self.area),
        )
    }

    pub(crate) fn invalidate(&mut self) {
        self.scene = None;
    }

    /// Composes the scene for a map area of `cols` × `rows` cells, reusing it when nothing changed.
    pub(crate) fn ensure_scene(&mut self, cols: u16, rows: u16) {
        if self.viewport != (cols, rows) {
            self.viewport = (cols, rows);
            self.scene = None;
        }
        if self.scene.is_none() {
            self.scene = Some(self.compose());
        }
    }

    fn compose(&self) -> Scene {
        let (cols, rows) = self.viewport;
        let mut view = ViewParams::interactive(
            f64::from(cols.max(1)) * PX_PER_COL,
            f64::from(rows.max(1)) * PX_PER_ROW,
        );
        view.center = Some(self.center);
        view.focus = self.focus.clone();
        view.legend.visible = self.show_legend;
        compose_scene(&self.doc, &self.scope(), &view, &self.cfg)
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if let Some(query) = self.search.as_mut() {
            match key.code {
                KeyCode::Esc => self.search = None,
                KeyCode::Enter => {
                    let query = self.search.take().unwrap_or_default();
                    self.focus_by_name(&query);
                }
                KeyCode::Backspace => {
                    query.pop();
                }
                KeyCode::Char(ch) => query.push(ch),
                _ => {}
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('l') => {
                self.show_legend = !self.show_legend;
                self.invalidate();
            }
            KeyCode::Char('[') => self.step_level(-1),
            KeyCode::Char(']') => self.step_level(1),
            KeyCode::Left => self.pan(-1, 0),
            KeyCode::Right => self.pan(1, 0),
            KeyCode::Up => self.pan(0, -1),
            KeyCode::Down => self.pan(0, 1),
            KeyCode::Char(SEARCH_PROMPT) => {
                self.search = Some(String::new());
                self.status = None;
            }
            KeyCode::Char('c') => {
                self.center = self.default_center();
                self.invalidate();
            }
            _ => {}
        }
    }

    fn pan(&mut self, dx: i32, dy: i32) {
        self.center = GridPoint::new(
            self.center.cx().saturating_add(dx),
            self.center.cy().saturating_add(dy),
        );
        self.invalidate();
    }

    fn step_level(&mut self, delta: isize) {
        let Some(idx) = self.levels.iter().position(|level| *level == self.level) else {
            if let Some(first) = self.levels.first() {
                self.level = *first;
                self.center = self.default_center();
                self.invalidate();
            }
            return;
        };
        let next = idx as isize + delta;
        if next < 0 || next as usize >= self.levels.len() {
            self.status = Some(format!("no floor beyond {}", self.level));
            return;
        }
        self.level = self.levels[next as usize];
        self.status = None;
        self.center = self.default_center();
        self.invalidate();
    }

    fn focus_by_name(&mut self, query: &str) {
        let hit = best_room_match(self.doc.rooms_in_area(&self.area), query)
            .map(|room| (room.vnum.clone(), room.coords.vz, GridPoint::of(room)));
        match hit {
            Some((vnum, level, center)) => {
                tracing::debug!(%vnum, level, "focused room");
                self.status = None;
                self.focus = Some(vnum);
                self.level = level;
                self.center = center;
                self.invalidate();
            }
            None => self.status = Some(format!("no room matches \"{query}\"")),
        }
    }
}

pub(crate) fn draw(frame: &mut Frame<'_>, app: &mut App, theme: &TuiTheme) {
    let [map_area, status_area] = split_status(frame.size());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let inner = block.inner(map_area);
    app.ensure_scene(inner.width, inner.height);
    let Some(scene) = app.scene.as_ref() else {
        return;
    };

    let block = block.title(Span::styled(format!(" {} ", scene.title), theme.title_style()));
    if scene.is_empty() {
        let placeholder = Paragraph::new("No rooms to render.")
            .alignment(Alignment::Center)
            .style(theme.base_style())
            .block(block);
        frame.render_widget(placeholder, map_area);
    } else {
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .background_color(theme.canvas_background(&scene.background))
            .x_bounds([0.0, scene.width])
            .y_bounds([0.0, scene.height])
            .paint(|ctx| paint_scene(ctx, scene, theme));
        frame.render_widget(canvas, map_area);

        if let Some(panel) = scene.legend.as_ref() {
            draw_legend(frame, inner, panel, theme);
        }
    }

    frame.render_widget(status_line(app, theme), status_area);
}

fn split_status(area: Rect) -> [Rect; 2] {
    let rows = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    [rows[0], rows[1]]
}

/// Scene y grows downward, canvas y grows upward.
fn flip(scene: &Scene, p: Point) -> (f64, f64) {
    (p.x, scene.height - p.y)
}

fn line(ctx: &mut Context<'_>, scene: &Scene, a: Point, b: Point, color: Color) {
    let (x1, y1) = flip(scene, a);
    let (x2, y2) = flip(scene, b);
    ctx.draw(&CanvasLine {
        x1,
        y1,
        x2,
        y2,
        color,
    });
}

fn paint_scene(ctx: &mut Context<'_>, scene: &Scene, theme: &TuiTheme) {
    for edge in &scene.edges {
        let color = scene_color(edge.color);
        for seg in &edge.segments {
            line(ctx, scene, seg.start(), seg.end(), color);
        }
        for seg in &edge.implied_reverse {
            line(ctx, scene, seg.start(), seg.end(), Color::DarkGray);
        }
        let [tip, left, right] = edge.arrow.triangle();
        line(ctx, scene, tip, left, color);
        line(ctx, scene, left, right, color);
        line(ctx, scene, right, tip, color);
        if let Some(door) = edge.door.as_ref() {
            let (a, b) = door.tick();
            line(ctx, scene, a, b, Color::White);
        }
    }
    ctx.layer();

    for tile in &scene.tiles {
        let color = if tile.primary {
            theme.primary_color()
        } else {
            scene_color(&tile.fill)
        };
        for (idx, vertex) in tile.vertices.iter().enumerate() {
            let next = tile.vertices[(idx + 1) % tile.vertices.len()];
            line(ctx, scene, *vertex, next, color);
        }
        if tile.focus {
            let (x, y) = flip(scene, tile.center);
            ctx.draw(&Circle {
                x,
                y,
                radius: tile.center.distance(tile.vertices[0]) + 4.0,
                color: theme.focus_color(),
            });
        }
    }
    ctx.layer();

    for label in &scene.labels {
        let Some(baseline) = label.baselines.first() else {
            continue;
        };
        let text = truncate_with_ellipsis(&label.lines.join(" "), LABEL_MAX_CHARS);
        let half_width = text.chars().count() as f64 * PX_PER_COL / 2.0;
        let (x, y) = flip(scene, Point::new(label.x - half_width, *baseline));
        ctx.print(x, y, Span::styled(text, Style::default().fg(Color::White)));
    }
    for tile in &scene.tiles {
        for badge in &tile.badges {
            let dy = if *badge == Direction::U { -1.0 } else { 1.0 };
            let at = Point::new(tile.center.x + 14.0, tile.center.y + dy * 12.0);
            let (x, y) = flip(scene, at);
            ctx.print(x, y, Span::styled(badge.as_str(), Style::default().fg(Color::Gray)));
        }
    }
}

fn draw_legend(
    frame: &mut Frame<'_>,
    inner: Rect,
    panel: &crate::render::LegendPanel,
    theme: &TuiTheme,
) {
    let lines = panel
        .entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(scene_color(&entry.fill))),
                Span::styled(entry.kind.as_str(), theme.base_style()),
            ])
        })
        .collect::<Vec<_>>();
    let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 2;
    let height = lines.len() as u16 + 2;

    let col = (panel.x / PX_PER_COL).round() as u16;
    let row = (panel.y / PX_PER_ROW).round() as u16;
    let x = inner.x + col.min(inner.width.saturating_sub(width));
    let y = inner.y + row.min(inner.height.saturating_sub(height));
    let area = Rect::new(x, y, width.min(inner.width), height.min(inner.height));

    let legend = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title("Terrain"),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(legend, area);
}

fn status_line<'a>(app: &'a App, theme: &TuiTheme) -> Paragraph<'a> {
    if let Some(query) = app.search.as_deref() {
        return Paragraph::new(Line::from(vec![
            Span::styled(format!("{SEARCH_PROMPT}{query}"), theme.prompt_style()),
            Span::raw(" "),
        ]));
    }

    let mut spans = vec![Span::styled(format!("Floor {} ", app.level), theme.title_style())];
    if let Some(focus) = app.focus.as_ref() {
        let name = app
            .doc
            .room(focus.as_str())
            .map_or(focus.as_str(), Room::display_label);
        spans.push(Span::raw(format!("focus {} ", truncate_with_ellipsis(name, 24))));
    }
    if let Some(status) = app.status.as_deref() {
        spans.push(Span::styled(format!("{status} "), theme.error_style()));
    }
    for (key, what) in [
        ("q", "quit"),
        ("l", "legend"),
        ("[ ]", "floor"),
        ("←↑↓→", "pan"),
        ("/", "find"),
        ("c", "center"),
    ] {
        spans.push(Span::styled(format!(" {key}"), theme.status_key_style()));
        spans.push(Span::styled(format!(" {what}"), theme.base_style()));
    }
    Paragraph::new(Line::from(spans))
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
