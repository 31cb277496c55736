// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mapwright CLI entrypoint.
//!
//! `mapwright <command> <doc.json> [options]`; see `print_usage` for the full list. Logs go to
//! stderr and are filtered by `MAPWRIGHT_LOG` (default `warn`).

use std::error::Error;
use std::path::{Path, PathBuf};

use mapwright::config::RenderConfig;
use mapwright::layout::GridPoint;
use mapwright::model::{AreaId, MapDoc, Vnum};
use mapwright::query::{room_search, suggest_areas, RoomSearchMode};
use mapwright::render::{
    render_area_ascii, render_area_svg, render_area_svg_stacked, LegendCorner, ViewParams,
};
use mapwright::store::{
    document_schema_json, document_to_string, load_document, save_document, save_export,
};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MAPWRIGHT_LOG";
const SUGGESTION_LIMIT: usize = 3;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} svg <doc.json> --area <id> [--level N | --stacked] [--out file] [--no-legend]\n      [--legend-corner tl|tr|bl|br] [--background COLOR] [--width W --height H] [--config file]\n  {program} ascii <doc.json> --area <id> [--level N] [--out file]\n  {program} json <doc.json> [--out file]\n  {program} schema [--out file]\n  {program} rooms <doc.json> [--area <id>] [--find PATTERN] [--regex | --fuzzy] [--ignore-case]\n  {program} view <doc.json> --area <id> [--level N] [--focus VNUM] [--center CX,CY] [--config file]\n\n--config reads a JSON object of render overrides (tile, gap, curve_threshold, ...).\nSet {LOG_ENV} (e.g. `debug`) to change log verbosity."
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Svg,
    Ascii,
    Json,
    Schema,
    Rooms,
    View,
}

impl Command {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "svg" => Some(Self::Svg),
            "ascii" => Some(Self::Ascii),
            "json" => Some(Self::Json),
            "schema" => Some(Self::Schema),
            "rooms" => Some(Self::Rooms),
            "view" => Some(Self::View),
            _ => None,
        }
    }

    fn needs_area(self) -> bool {
        matches!(self, Self::Svg | Self::Ascii | Self::View)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    command: Command,
    doc: Option<PathBuf>,
    area: Option<AreaId>,
    level: Option<i32>,
    stacked: bool,
    out: Option<PathBuf>,
    no_legend: bool,
    legend_corner: Option<LegendCorner>,
    background: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    config: Option<PathBuf>,
    find: Option<String>,
    search_mode: Option<RoomSearchMode>,
    ignore_case: bool,
    focus: Option<Vnum>,
    center: Option<GridPoint>,
}

impl CliOptions {
    fn new(command: Command) -> Self {
        Self {
            command,
            doc: None,
            area: None,
            level: None,
            stacked: false,
            out: None,
            no_legend: false,
            legend_corner: None,
            background: None,
            width: None,
            height: None,
            config: None,
            find: None,
            search_mode: None,
            ignore_case: false,
            focus: None,
            center: None,
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value);
    Ok(())
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn positive(raw: &str) -> Result<f64, ()> {
    let value: f64 = raw.parse().map_err(|_| ())?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(())
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let command = args.next().as_deref().and_then(Command::parse).ok_or(())?;
    let mut options = CliOptions::new(command);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--area" => set_once(&mut options.area, args.next().ok_or(())?.parse().map_err(|_| ())?)?,
            "--level" => set_once(&mut options.level, args.next().ok_or(())?.parse().map_err(|_| ())?)?,
            "--stacked" => set_flag(&mut options.stacked)?,
            "--out" => set_once(&mut options.out, PathBuf::from(args.next().ok_or(())?))?,
            "--no-legend" => set_flag(&mut options.no_legend)?,
            "--legend-corner" => set_once(
                &mut options.legend_corner,
                args.next().ok_or(())?.parse().map_err(|_| ())?,
            )?,
            "--background" => set_once(&mut options.background, args.next().ok_or(())?)?,
            "--width" => set_once(&mut options.width, positive(&args.next().ok_or(())?)?)?,
            "--height" => set_once(&mut options.height, positive(&args.next().ok_or(())?)?)?,
            "--config" => set_once(&mut options.config, PathBuf::from(args.next().ok_or(())?))?,
            "--find" => set_once(&mut options.find, args.next().ok_or(())?)?,
            "--regex" => set_once(&mut options.search_mode, RoomSearchMode::Regex)?,
            "--fuzzy" => set_once(&mut options.search_mode, RoomSearchMode::Fuzzy)?,
            "--ignore-case" | "-i" => set_flag(&mut options.ignore_case)?,
            "--focus" => set_once(&mut options.focus, args.next().ok_or(())?.parse().map_err(|_| ())?)?,
            "--center" => set_once(&mut options.center, args.next().ok_or(())?.parse().map_err(|_| ())?)?,
            _ if arg.starts_with('-') => return Err(()),
            _ => set_once(&mut options.doc, PathBuf::from(arg))?,
        }
    }

    let wants_doc = options.command != Command::Schema;
    if wants_doc != options.doc.is_some() {
        return Err(());
    }
    if options.command.needs_area() && options.area.is_none() {
        return Err(());
    }
    if options.stacked && (options.level.is_some() || options.command != Command::Svg) {
        return Err(());
    }
    if options.width.is_some() != options.height.is_some() {
        return Err(());
    }
    if options.search_mode.is_some() && options.find.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn write_output(out: Option<&Path>, text: &str) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => {
            save_export(path, text)?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn render_config(options: &CliOptions, base: RenderConfig) -> Result<RenderConfig, Box<dyn Error>> {
    match options.config.as_deref() {
        Some(path) => Ok(RenderConfig::load_overrides(path, &base)?),
        None => Ok(base),
    }
}

/// Warns (with suggestions) when the requested area has no rooms at all.
fn check_area(doc: &MapDoc, area: &AreaId) {
    if !doc.rooms_in_area(area).is_empty() {
        return;
    }
    let suggestions = suggest_areas(doc, area.as_str(), SUGGESTION_LIMIT);
    if suggestions.is_empty() {
        eprintln!("mapwright: area {area} has no rooms");
    } else {
        let names = suggestions.iter().map(AreaId::as_str).collect::<Vec<_>>().join(", ");
        eprintln!("mapwright: area {area} has no rooms; did you mean: {names}?");
    }
}

fn svg_view(options: &CliOptions) -> ViewParams {
    let mut view = ViewParams::export();
    if let (Some(width), Some(height)) = (options.width, options.height) {
        view.canvas = Some((width, height));
    }
    view.background = options.background.clone();
    view.legend.visible = !options.no_legend;
    if let Some(corner) = options.legend_corner {
        view.legend.corner = corner;
    }
    view.focus = options.focus.clone();
    view.center = options.center;
    view
}

fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    if options.command == Command::Schema {
        return write_output(options.out.as_deref(), &document_schema_json()?);
    }

    let Some(doc_path) = options.doc.as_deref() else {
        return Err("missing document path".into());
    };
    let doc = load_document(doc_path)?;
    let level = options.level.unwrap_or(0);

    match options.command {
        Command::Svg => {
            let area = options.area.as_ref().ok_or("missing --area")?;
            check_area(&doc, area);
            let cfg = render_config(&options, RenderConfig::export())?;
            let view = svg_view(&options);
            let svg = if options.stacked {
                render_area_svg_stacked(&doc, area, &view, &cfg)
            } else {
                render_area_svg(&doc, area, level, &view, &cfg)
            };
            write_output(options.out.as_deref(), &with_newline(svg))
        }
        Command::Ascii => {
            let area = options.area.as_ref().ok_or("missing --area")?;
            check_area(&doc, area);
            let cfg = render_config(&options, RenderConfig::export())?;
            let text = render_area_ascii(&doc, area, level, &cfg)?;
            write_output(options.out.as_deref(), &with_newline(text))
        }
        Command::Json => match options.out.as_deref() {
            Some(path) => {
                save_document(path, &doc)?;
                tracing::info!(path = %path.display(), rooms = doc.rooms.len(), "wrote document");
                Ok(())
            }
            None => write_output(None, &document_to_string(&doc)?),
        },
        Command::Rooms => {
            let rooms = match options.area.as_ref() {
                Some(area) => doc.rooms_in_area(area),
                None => doc.rooms.values().collect(),
            };
            let hits = match options.find.as_deref() {
                Some(needle) => room_search(
                    rooms,
                    needle,
                    options.search_mode.unwrap_or(RoomSearchMode::Substring),
                    options.ignore_case,
                )?,
                None => rooms,
            };
            let mut out = String::new();
            for room in hits {
                let c = room.coords;
                let area = room.area_id().map_or("-", AreaId::as_str);
                out.push_str(&format!(
                    "{}\t{}\t{},{},{}\t{}\n",
                    room.vnum,
                    area,
                    c.cx,
                    c.cy,
                    c.vz,
                    room.display_label()
                ));
            }
            write_output(options.out.as_deref(), &out)
        }
        Command::View => {
            let area = options.area.clone().ok_or("missing --area")?;
            check_area(&doc, &area);
            let viewer = mapwright::tui::ViewerOptions {
                area,
                level: options.level,
                focus: options.focus.clone(),
                center: options.center,
                config: render_config(&options, RenderConfig::interactive())?,
            };
            mapwright::tui::run(doc, viewer)
        }
        Command::Schema => Ok(()),
    }
}

fn main() {
    init_tracing();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "mapwright".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        eprintln!("mapwright: {err}");
        std::process::exit(1);
    }
}
