//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

const POPUP_WIDTH: u16 = 46;

/// Sections of (key, description) pairs
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Editing",
        &[
            ("Up/Down or k/j", "Select row"),
            ("Tab / Shift+Tab", "Select field"),
            ("0-9 . -", "Type weight or set"),
            ("Backspace", "Delete last character"),
            ("Enter", "Pick size (Size field)"),
        ],
    ),
    (
        "Rows",
        &[
            ("a", "Add size row"),
            ("x", "Remove selected row"),
        ],
    ),
    (
        "General",
        &[
            ("s", "Save lot"),
            ("Esc / q", "Cancel"),
            ("?", "Toggle help"),
        ],
    ),
];

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Border (2) + per section header/separator/keys/gap + close hint
    fn height() -> u16 {
        let body: usize = SECTIONS.iter().map(|(_, keys)| keys.len() + 3).sum();
        (body + 3) as u16
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let height = Self::height();
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: height.min(area.height),
        }
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" lotsize v{} ", VERSION))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let sep = "─".repeat(inner.width as usize);
        let mut lines: Vec<Line> = Vec::new();
        for (title, keys) in SECTIONS {
            lines.push(Line::from(Span::styled(
                *title,
                Style::default()
                    .fg(self.theme.heading())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                sep.clone(),
                Style::default().fg(self.theme.muted()),
            )));
            for (key, desc) in *keys {
                lines.push(keybinding_line(key, desc, self.theme));
            }
            lines.push(Line::default());
        }
        lines.push(
            Line::from(Span::styled(
                "Press ? to close",
                Style::default().fg(self.theme.muted()),
            ))
            .alignment(Alignment::Center),
        );

        Paragraph::new(lines).render(inner, buf);
    }
}

/// A single keybinding line
fn keybinding_line(key: &str, desc: &str, theme: Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", key), Style::default().fg(theme.accent())),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ])
}
