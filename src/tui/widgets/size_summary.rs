//! "Size & Totals" summary table

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::services::measure::format_weight;
use crate::tui::theme::{weight_tone, Theme};
use crate::types::{format_count, LotTotals, SizeGroupSummary, Specification};

const SIZE_WIDTH: usize = 10;
const COLUMN_WIDTH: usize = 14;

/// Summary rows: one per size plus the totals footer
pub struct SizeSummary<'a> {
    groups: &'a [SizeGroupSummary],
    totals: LotTotals,
    specification: &'a Specification,
    theme: Theme,
}

impl<'a> SizeSummary<'a> {
    pub fn new(
        groups: &'a [SizeGroupSummary],
        totals: LotTotals,
        specification: &'a Specification,
        theme: Theme,
    ) -> Self {
        Self {
            groups,
            totals,
            specification,
            theme,
        }
    }

    /// Lines needed: heading + header + groups + totals
    pub fn height(&self) -> u16 {
        if self.groups.is_empty() {
            0
        } else {
            (self.groups.len() + 3) as u16
        }
    }

    fn width(&self) -> u16 {
        let columns = if self.specification.is_plane() { 3 } else { 4 };
        (SIZE_WIDTH + columns * COLUMN_WIDTH) as u16
    }

    fn header_line(&self) -> Line<'static> {
        let style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![
            Span::styled(format!("{:<SIZE_WIDTH$}", "Size"), style),
            Span::styled(format!("{:>COLUMN_WIDTH$}", "Total Sets"), style),
            Span::styled(format!("{:>COLUMN_WIDTH$}", "Gross Wt (g)"), style),
            Span::styled(format!("{:>COLUMN_WIDTH$}", "Net Wt (g)"), style),
        ];
        if let Some(label) = self.specification.weight_label() {
            spans.push(Span::styled(format!("{:>COLUMN_WIDTH$}", label), style));
        }
        Line::from(spans)
    }

    fn value_line(
        &self,
        label: &str,
        sets: f64,
        gross_wt: f64,
        net_wt: f64,
        label_style: Style,
        value_style: Style,
    ) -> Line<'static> {
        let mut spans = vec![
            Span::styled(format!("{:<SIZE_WIDTH$}", label), label_style),
            Span::styled(format!("{:>COLUMN_WIDTH$}", format_count(sets)), value_style),
            Span::styled(
                format!("{:>COLUMN_WIDTH$}", format_weight(gross_wt)),
                value_style,
            ),
            Span::styled(
                format!("{:>COLUMN_WIDTH$}", format_weight(net_wt)),
                value_style,
            ),
        ];
        if !self.specification.is_plane() {
            let spec_wt = gross_wt - net_wt;
            spans.push(Span::styled(
                format!("{:>COLUMN_WIDTH$}", format_weight(spec_wt)),
                value_style.fg(self.theme.weight_color(weight_tone(spec_wt))),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for SizeSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.groups.is_empty() || area.height == 0 {
            return;
        }

        let width = self.width().min(area.width);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let mut lines = vec![
            Line::from(Span::styled(
                "Size & Totals",
                Style::default()
                    .fg(self.theme.heading())
                    .add_modifier(Modifier::BOLD),
            )),
            self.header_line(),
        ];

        for group in self.groups {
            lines.push(self.value_line(
                &group.size,
                group.total_sets,
                group.average_gross_wt,
                group.average_net_wt,
                Style::default().fg(self.theme.heading()),
                Style::default().fg(self.theme.text()),
            ));
        }

        let total_style = Style::default()
            .fg(self.theme.total())
            .add_modifier(Modifier::BOLD);
        lines.push(self.value_line(
            "Total",
            self.totals.total_sets,
            self.totals.total_gross_wt,
            self.totals.total_net_wt,
            total_style,
            total_style,
        ));

        Paragraph::new(lines).render(
            Rect {
                x,
                y: area.y,
                width,
                height: area.height,
            },
            buf,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<SizeGroupSummary> {
        vec![
            SizeGroupSummary {
                size: "S".into(),
                count: 1,
                average_net_wt: 8.0,
                total_sets: 2.0,
                average_gross_wt: 10.0,
            },
            SizeGroupSummary {
                size: "M".into(),
                count: 1,
                average_net_wt: 4.0,
                total_sets: 1.0,
                average_gross_wt: 5.0,
            },
        ]
    }

    fn totals() -> LotTotals {
        LotTotals {
            total_sets: 3.0,
            total_gross_wt: 15.0,
            total_net_wt: 12.0,
        }
    }

    fn render_text(summary: SizeSummary<'_>) -> String {
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        summary.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_height() {
        let groups = groups();
        let spec = Specification::default();
        let summary = SizeSummary::new(&groups, totals(), &spec, Theme::Dark);
        assert_eq!(summary.height(), 5);

        let empty = SizeSummary::new(&[], totals(), &spec, Theme::Dark);
        assert_eq!(empty.height(), 0);
    }

    #[test]
    fn test_renders_groups_and_totals() {
        let groups = groups();
        let spec = Specification::from("STONE");
        let content = render_text(SizeSummary::new(&groups, totals(), &spec, Theme::Dark));

        assert!(content.contains("Size & Totals"));
        assert!(content.contains("STONE Wt (g)"));
        assert!(content.contains("15.000"));
        assert!(content.contains("12.000"));
        // Total spec weight: 15 - 12
        assert!(content.contains("3.000"));
    }

    #[test]
    fn test_plane_has_no_spec_column() {
        let groups = groups();
        let spec = Specification::default();
        let content = render_text(SizeSummary::new(&groups, totals(), &spec, Theme::Dark));
        assert!(!content.contains("Wt (g) PLANE"));
        assert!(!content.contains("PLANE Wt"));
    }

    #[test]
    fn test_empty_groups_render_nothing() {
        let spec = Specification::default();
        let content = render_text(SizeSummary::new(&[], totals(), &spec, Theme::Dark));
        assert!(content.trim().is_empty());
    }
}
