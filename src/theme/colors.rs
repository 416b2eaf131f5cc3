//! Colors - Console Theme Colors
//!
//! One palette; quality, link and log styles all refer back to it.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::protocol::LinkStatus;
use crate::domain::variable::Quality;

/// Console color palette - All colors are accessed via associated functions
pub struct ConsoleColors;

impl ConsoleColors {
    // Text colors
    /// Muted text (labels, timestamps)
    pub const fn text_muted() -> Color { Color::Rgb(0x9c, 0xa3, 0xaf) }
    /// Accent for headers and the active section
    pub const fn accent() -> Color { Color::Rgb(0x2c, 0xb3, 0xb8) }
    /// Panel borders
    pub const fn border() -> Color { Color::Rgb(0x37, 0x41, 0x51) }

    // Status colors
    /// Success - Green
    pub const fn success() -> Color { Color::Rgb(0x4a, 0xde, 0x80) }
    /// Warning - Yellow
    pub const fn warning() -> Color { Color::Rgb(0xfa, 0xcc, 0x15) }
    /// Error/Danger - Red
    pub const fn danger() -> Color { Color::Rgb(0xf8, 0x71, 0x71) }
    /// Unknown - Gray
    pub const fn unknown() -> Color { Color::Rgb(0x6b, 0x72, 0x80) }
}

/// Reusable styles built from [`ConsoleColors`]
pub struct ConsoleStyles;

impl ConsoleStyles {
    pub fn muted() -> Style {
        Style::default().fg(ConsoleColors::text_muted())
    }

    pub fn title() -> Style {
        Style::default()
            .fg(ConsoleColors::accent())
            .add_modifier(Modifier::BOLD)
    }

    /// Active tab in the navigation bar
    pub fn highlight() -> Style {
        Style::default()
            .fg(ConsoleColors::accent())
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn border() -> Style {
        Style::default().fg(ConsoleColors::border())
    }

    pub fn table_header() -> Style {
        Style::default()
            .fg(ConsoleColors::text_muted())
            .add_modifier(Modifier::BOLD)
    }
}

/// How a quality value is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityStyle {
    pub color: Color,
    /// Icon glyph shown in the quality column
    pub glyph: char,
}

impl QualityStyle {
    pub const GOOD: Self = Self { color: ConsoleColors::success(), glyph: '✔' };
    pub const BAD: Self = Self { color: ConsoleColors::danger(), glyph: '✖' };
    pub const UNCERTAIN: Self = Self { color: ConsoleColors::warning(), glyph: '▲' };
    pub const UNKNOWN: Self = Self { color: ConsoleColors::unknown(), glyph: '?' };

    /// Style for a known quality; `None` takes the default branch
    pub fn for_quality(quality: Option<Quality>) -> Self {
        match quality {
            Some(Quality::Good) => Self::GOOD,
            Some(Quality::Bad) => Self::BAD,
            Some(Quality::Uncertain) => Self::UNCERTAIN,
            None => Self::UNKNOWN,
        }
    }

    /// Style for a raw quality label, e.g. from an external feed
    pub fn for_label(label: &str) -> Self {
        Self::for_quality(Quality::parse(label))
    }

    pub fn style(&self) -> Style {
        Style::default().fg(self.color)
    }
}

/// Status-dot color on the connections panel
pub fn link_color(status: LinkStatus) -> Color {
    match status {
        LinkStatus::Online => ConsoleColors::success(),
        LinkStatus::Offline => ConsoleColors::danger(),
        LinkStatus::Warning => ConsoleColors::warning(),
    }
}
