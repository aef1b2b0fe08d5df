//! Size picker popup for a row's size field

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::services::LotSizeAggregator;
use crate::tui::theme::Theme;

const POPUP_WIDTH: u16 = 30;
/// Border (2) + hint line (1)
const CHROME_HEIGHT: u16 = 3;

/// One entry of the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeChoice {
    pub size: String,
    /// Held by another row; picking it points at that row instead
    pub taken: bool,
}

/// Picker state for the row being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizePickerState {
    pub row: usize,
    pub choices: Vec<SizeChoice>,
    pub cursor: usize,
}

impl SizePickerState {
    /// List every allowed size for `row`, cursor on its current size
    pub fn for_row(aggregator: &LotSizeAggregator, row: usize) -> Self {
        let available = aggregator.available_sizes(row);
        let choices: Vec<SizeChoice> = aggregator
            .size_options()
            .iter()
            .map(|size| SizeChoice {
                size: size.clone(),
                taken: !available.contains(&size.as_str()),
            })
            .collect();

        let current = aggregator
            .rows()
            .get(row)
            .map(|r| r.size.as_str())
            .unwrap_or("");
        let cursor = choices
            .iter()
            .position(|c| c.size == current)
            .or_else(|| choices.iter().position(|c| !c.taken))
            .unwrap_or(0);

        Self {
            row,
            choices,
            cursor,
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.choices.len() {
            self.cursor += 1;
        }
    }

    pub fn selected(&self) -> Option<&SizeChoice> {
        self.choices.get(self.cursor)
    }
}

/// Picker overlay
pub struct SizePicker<'a> {
    state: &'a SizePickerState,
    theme: Theme,
}

impl<'a> SizePicker<'a> {
    pub fn new(state: &'a SizePickerState, theme: Theme) -> Self {
        Self { state, theme }
    }

    /// Centered area sized to the number of choices
    pub fn centered_area(area: Rect, choices: usize) -> Rect {
        let height = (choices.max(1) as u16).saturating_add(CHROME_HEIGHT);
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

impl Widget for SizePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" Size · row {} ", self.state.row + 1))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        if self.state.choices.is_empty() {
            lines.push(Line::from(Span::styled(
                "No sizes for this product",
                Style::default().fg(self.theme.muted()),
            )));
        }

        let list_height = inner.height.saturating_sub(1) as usize;
        let offset = self
            .state
            .cursor
            .saturating_sub(list_height.saturating_sub(1));
        for (i, choice) in self
            .state
            .choices
            .iter()
            .enumerate()
            .skip(offset)
            .take(list_height)
        {
            let selected = i == self.state.cursor;
            let marker = if selected { "▸ " } else { "  " };
            let mut style = if choice.taken {
                Style::default().fg(self.theme.muted())
            } else {
                Style::default().fg(self.theme.text())
            };
            if selected {
                style = style.fg(self.theme.accent()).add_modifier(Modifier::BOLD);
            }
            let suffix = if choice.taken { "  (in use)" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(choice.size.clone(), style),
                Span::styled(suffix, Style::default().fg(self.theme.muted())),
            ]));
        }

        let list_area = Rect {
            height: list_height as u16,
            ..inner
        };
        Paragraph::new(lines).render(list_area, buf);

        if inner.height > 0 {
            let hint = Line::from(vec![
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(self.theme.muted())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" Pick  ", Style::default().fg(self.theme.muted())),
                Span::styled(
                    "Esc",
                    Style::default()
                        .fg(self.theme.muted())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" Back", Style::default().fg(self.theme.muted())),
            ]);
            Paragraph::new(hint).alignment(Alignment::Center).render(
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
                buf,
            );
        }
    }
}
