// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt, str::FromStr};

use ratatui::style::{Color, Modifier, Style};

use crate::render::parse_hex_rgb;

pub(crate) const PALETTE_ENV: &str = "MAPWRIGHT_TUI_PALETTE";

const FOCUS_RING: Color = Color::Rgb(0xFF, 0xC7, 0x5F);

/// Viewer colors. Scene colors come from the scene itself; the theme only covers chrome and an
/// optional `fg,bg` override.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    pub(crate) fn border_style(&self) -> Style {
        self.base_style().fg(Color::DarkGray)
    }

    pub(crate) fn title_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn status_key_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }

    pub(crate) fn prompt_style(&self) -> Style {
        self.base_style()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(Color::Red)
    }

    /// Canvas background; the scene background unless the palette overrides it.
    pub(crate) fn canvas_background(&self, scene_background: &str) -> Color {
        match &self.palette {
            Some(palette) => palette.bg,
            None => scene_color(scene_background),
        }
    }

    pub(crate) fn focus_color(&self) -> Color {
        FOCUS_RING
    }

    pub(crate) fn primary_color(&self) -> Color {
        Color::White
    }
}

/// `#RRGGBB[AA]` scene color as a terminal color; anything else renders gray.
pub(crate) fn scene_color(hex: &str) -> Color {
    match parse_hex_rgb(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Gray,
    }
}

#[derive(Debug, Clone)]
struct TuiPalette {
    fg: Color,
    bg: Color,
}

impl TuiPalette {
    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(|part| part.trim()).collect();
        let [fg, bg] = parts.as_slice() else {
            return Err(format!(
                "expected 2 comma-separated colors (fg,bg), got {}",
                parts.len()
            ));
        };

        Ok(Self {
            fg: parse_palette_color(fg)?,
            bg: parse_palette_color(bg)?,
        })
    }
}

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    let value = match env::var(PALETTE_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV.to_string(),
                value: "<non-unicode>".to_string(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = TuiPalette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
        name: PALETTE_ENV.to_string(),
        value: format!("{trimmed} ({error})"),
    })?;

    Ok(Some(parsed))
}

/// Named terminal colors (`darkgray`, `light-blue`, ...) or `#RRGGBB`.
fn parse_palette_color(value: &str) -> Result<Color, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty color".to_string());
    }
    Color::from_str(value).map_err(|_| format!("unknown color {value:?}"))
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}
