// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! Styles for the pager and the hotspot overlay.
//!
//! `CHARHOP_PALETTE` can override the default hotspot colors with two
//! comma-separated `#RRGGBB` values (bg,fg).

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<HotspotPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        Style::default()
    }

    /// Style painted over a hotspot cell in place of the buffer text.
    pub(crate) fn hotspot_style(&self, is_group: bool) -> Style {
        let (bg, fg) = match &self.palette {
            Some(palette) => (palette.bg, palette.fg),
            None => (Color::Yellow, Color::Black),
        };
        let style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
        if is_group {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    pub(crate) fn cursor_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    pub(crate) fn toast_style(&self) -> Style {
        Style::default().fg(Color::Black).bg(Color::LightYellow)
    }

    pub(crate) fn footer_label_style(&self) -> Style {
        Style::default().fg(Color::Gray)
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub(crate) fn prompt_style(&self) -> Style {
        Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD)
    }
}

#[derive(Debug, Clone)]
struct HotspotPalette {
    bg: Color,
    fg: Color,
}

#[derive(Debug)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => {
                write!(f, "invalid palette in ${name}: {value}")
            }
        }
    }
}

impl Error for ThemeError {}

fn palette_override_from_env() -> Result<Option<HotspotPalette>, ThemeError> {
    let value = match env::var("CHARHOP_PALETTE") {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: "CHARHOP_PALETTE".to_string(),
                value: "<non-unicode>".to_string(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = trimmed.split(',').map(|part| part.trim()).collect();
    if parts.len() != 2 {
        return Err(ThemeError::InvalidEnv {
            name: "CHARHOP_PALETTE".to_string(),
            value: format!("{trimmed} (expected 2 comma-separated colors: bg,fg)"),
        });
    }

    let bg = parse_hex_color(parts[0]).map_err(|error| ThemeError::InvalidEnv {
        name: "CHARHOP_PALETTE".to_string(),
        value: format!("{trimmed} ({error})"),
    })?;
    let fg = parse_hex_color(parts[1]).map_err(|error| ThemeError::InvalidEnv {
        name: "CHARHOP_PALETTE".to_string(),
        value: format!("{trimmed} ({error})"),
    })?;

    Ok(Some(HotspotPalette { bg, fg }))
}

fn parse_hex_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Ok(Color::Rgb(r, g, b))
}
