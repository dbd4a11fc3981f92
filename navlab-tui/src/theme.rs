//! Theme tokens and series color parsing.
//!
//! Chrome uses a fixed dark palette:
//! - **Accent**: electric cyan (focus, highlights)
//! - **Warning**: neon orange
//! - **Negative**: hot pink (errors)
//! - **Muted**: steel blue (secondary text, hidden series)
//!
//! Series and marker colors come from configuration as color names or
//! `#rrggbb` hex strings.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;
/// Anchor line color.
pub const ANCHOR: Color = Color::Rgb(170, 170, 170);
/// Probe cursor line color.
pub const CURSOR: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Parse a configured color: a common color name or `#rrggbb`.
pub fn parse_color(spec: &str) -> Option<Color> {
    let spec = spec.trim();
    if let Some(hex) = spec.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    let color = match spec.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "white" => Color::White,
        "red" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "cyan" => Color::Cyan,
        "magenta" => Color::Magenta,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "brown" => Color::Rgb(165, 42, 42),
        "orange" => Color::Rgb(255, 165, 0),
        "purple" => Color::Rgb(128, 0, 128),
        "pink" => Color::Rgb(255, 192, 203),
        "olive" => Color::Rgb(128, 128, 0),
        "navy" => Color::Rgb(0, 0, 128),
        "teal" => Color::Rgb(0, 128, 128),
        "gold" => Color::Rgb(255, 215, 0),
        _ => return None,
    };
    Some(color)
}

/// Configured color, or the primary text color if it cannot be parsed.
pub fn series_color(spec: &str) -> Color {
    parse_color(spec).unwrap_or(TEXT_PRIMARY)
}
