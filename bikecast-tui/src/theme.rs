//! Color tokens for the bikecast dashboard.
//!
//! The palette carries over the web app this dashboard replaced:
//! - Demand line: sky cyan
//! - Forecast line: deep orange
//! - Demand-over-time curve: purple
//! - Temperature: burnt orange, rainfall: blue
//! - Station bars: light violet

use ratatui::style::{Color, Modifier, Style};

/// Sky cyan (#4FC3F7) — actual demand traces.
pub const DEMAND: Color = Color::Rgb(0x4F, 0xC3, 0xF7);
/// Deep orange (#FF6F00) — forecast traces.
pub const FORECAST: Color = Color::Rgb(0xFF, 0x6F, 0x00);
/// Purple (#8E24AA) — the demand-over-time curve.
pub const DEMAND_CURVE: Color = Color::Rgb(0x8E, 0x24, 0xAA);
/// Burnt orange (#EF6C00) — temperature.
pub const TEMPERATURE: Color = Color::Rgb(0xEF, 0x6C, 0x00);
/// Blue (#1E88E5) — rainfall.
pub const RAINFALL: Color = Color::Rgb(0x1E, 0x88, 0xE5);
/// Light violet (#CC66FF) — station ranking bars.
pub const STATION_BAR: Color = Color::Rgb(0xCC, 0x66, 0xFF);
/// Slate gray (#ABB2B9) — the lookback/forecast boundary marker.
pub const BOUNDARY: Color = Color::Rgb(0xAB, 0xB2, 0xB9);

pub fn accent() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn accent_bold() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn neutral() -> Style {
    Style::default().fg(Color::Rgb(147, 112, 219))
}

pub fn warning() -> Style {
    Style::default().fg(Color::Rgb(255, 140, 0))
}

pub fn negative() -> Style {
    Style::default().fg(Color::Rgb(255, 20, 147))
}

pub fn text() -> Style {
    Style::default().fg(Color::White)
}

/// Border style for the active panel frame.
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
