//! Size-row editor table

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme::Theme;
use crate::types::{LotField, SizeRow, Specification};

/// Column widths: marker(3) Size(10) Set(8) Gross(15) Net(15) then derived columns
const MARKER_WIDTH: usize = 3;
const DERIVED_WIDTH: usize = 12;

fn field_width(field: LotField) -> usize {
    match field {
        LotField::Size => 10,
        LotField::Set => 8,
        LotField::GrossWt | LotField::NetWt => 15,
    }
}

fn placeholder(field: LotField) -> &'static str {
    match field {
        LotField::Size => "Select",
        LotField::Set => "0",
        LotField::GrossWt | LotField::NetWt => "0.000",
    }
}

/// Total table width for a specification mode
pub fn table_width(specification: &Specification) -> u16 {
    let inputs: usize = LotField::ALL.iter().map(|&f| field_width(f)).sum();
    let derived = if specification.is_plane() { 2 } else { 3 };
    (MARKER_WIDTH + inputs + derived * DERIVED_WIDTH) as u16
}

/// First row index to draw so that `selected` stays visible
pub fn scroll_offset(selected: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return selected;
    }
    selected.saturating_sub(visible_rows - 1)
}

/// Editable table of size rows with their derived averages
pub struct LotTable<'a> {
    rows: &'a [SizeRow],
    specification: &'a Specification,
    selected_row: usize,
    selected_field: LotField,
    highlight_row: Option<usize>,
    theme: Theme,
}

impl<'a> LotTable<'a> {
    pub fn new(rows: &'a [SizeRow], specification: &'a Specification, theme: Theme) -> Self {
        Self {
            rows,
            specification,
            selected_row: 0,
            selected_field: LotField::Size,
            highlight_row: None,
            theme,
        }
    }

    pub fn with_selection(mut self, row: usize, field: LotField) -> Self {
        self.selected_row = row;
        self.selected_field = field;
        self
    }

    /// Flash a row (duplicate size conflict)
    pub fn with_highlight(mut self, row: Option<usize>) -> Self {
        self.highlight_row = row;
        self
    }

    fn header_line(&self) -> Line<'static> {
        let style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![Span::styled(" ".repeat(MARKER_WIDTH), style)];
        for field in LotField::ALL {
            spans.push(Span::styled(
                format!("{:<width$}", field.label(), width = field_width(field)),
                style,
            ));
        }
        spans.push(Span::styled(
            format!("{:>width$}", "Avg Gross", width = DERIVED_WIDTH),
            style,
        ));
        spans.push(Span::styled(
            format!("{:>width$}", "Avg Net", width = DERIVED_WIDTH),
            style,
        ));
        if !self.specification.is_plane() {
            let label = format!("Avg {}", self.specification);
            spans.push(Span::styled(
                format!("{:>width$}", truncate(&label, DERIVED_WIDTH - 1), width = DERIVED_WIDTH),
                style,
            ));
        }
        Line::from(spans)
    }

    fn row_line(&self, index: usize, row: &SizeRow) -> Line<'static> {
        let selected = index == self.selected_row;
        let base = if self.highlight_row == Some(index) {
            Style::default().bg(self.theme.highlight_bg())
        } else {
            Style::default()
        };

        let marker = if selected { " ▸ " } else { "   " };
        let mut spans = vec![Span::styled(marker, base.fg(self.theme.accent()))];

        for field in LotField::ALL {
            let value = row.field(field);
            let width = field_width(field);
            let (text, mut style) = if value.is_empty() {
                (placeholder(field), base.fg(self.theme.muted()))
            } else if field == LotField::Size {
                (value, base.fg(self.theme.heading()))
            } else {
                (value, base.fg(self.theme.text()))
            };
            if selected && field == self.selected_field {
                style = style
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(
                format!("{:<width$}", truncate(text, width - 1), width = width),
                style,
            ));
        }

        let mut derived = vec![&row.avg_gross_wt, &row.avg_net_wt];
        if !self.specification.is_plane() {
            derived.push(&row.avg_spec_wt);
        }
        for value in derived {
            let text = if value.is_empty() { "-" } else { value.as_str() };
            spans.push(Span::styled(
                format!("{:>width$}", text, width = DERIVED_WIDTH),
                base.fg(self.theme.derived()),
            ));
        }

        Line::from(spans)
    }
}

/// Cut to `max` characters, marking the cut (UTF-8 safe)
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!(
            "{}…",
            text.chars().take(max.saturating_sub(1)).collect::<String>()
        )
    } else {
        text.to_string()
    }
}

impl Widget for LotTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let width = table_width(self.specification).min(area.width);
        let x = area.x + area.width.saturating_sub(width) / 2;

        Paragraph::new(self.header_line()).render(
            Rect {
                x,
                y: area.y,
                width,
                height: 1,
            },
            buf,
        );

        let visible = area.height.saturating_sub(1) as usize;
        let offset = scroll_offset(self.selected_row, visible);

        for (i, (index, row)) in self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            Paragraph::new(self.row_line(index, row)).render(
                Rect {
                    x,
                    y: area.y + 1 + i as u16,
                    width,
                    height: 1,
                },
                buf,
            );
        }
    }
}
