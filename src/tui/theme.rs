//! Terminal theme detection and color definitions

use ratatui::style::Color;

/// How a derived weight should read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightTone {
    Normal,
    /// Net exceeds gross: spec weight went negative
    Inverted,
}

/// Classify a spec weight (gross minus net).
pub fn weight_tone(spec_wt: f64) -> WeightTone {
    if spec_wt < 0.0 {
        WeightTone::Inverted
    } else {
        WeightTone::Normal
    }
}

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (entered values, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Focused cell, keybinding keys, enabled actions
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Separators, placeholders, disabled actions
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Section headings and size labels
    pub fn heading(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Derived averages
    pub fn derived(self) -> Color {
        match self {
            Self::Dark => Color::Magenta,
            Self::Light => Color::Indexed(90), // dark magenta (ANSI 256)
        }
    }

    /// Totals row
    pub fn total(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Errors and inverted weights
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Background of a row flashed after a duplicate size pick
    pub fn highlight_bg(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(94),   // dim amber (ANSI 256)
            Self::Light => Color::Indexed(223), // pale amber (ANSI 256)
        }
    }

    /// Color for a spec weight value
    pub fn weight_color(self, tone: WeightTone) -> Color {
        match tone {
            WeightTone::Normal => self.derived(),
            WeightTone::Inverted => self.error(),
        }
    }
}
