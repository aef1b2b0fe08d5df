//! Drawer session state and event loop

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};
use tracing::{debug, warn};

use crate::services::{DrawerHost, DrawerProps, LotDrawer};
use crate::types::{LotField, LotNotice, SavedLot};

use super::theme::Theme;
use super::widgets::{
    help::HelpPopup,
    lot_table::LotTable,
    notice::NoticePopup,
    size_picker::{SizePicker, SizePickerState},
    size_summary::SizeSummary,
};

/// How long a conflicting row stays highlighted
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);

/// How the drawer session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Saved(SavedLot),
    Closed,
}

/// Collects the drawer's callbacks for the event loop
#[derive(Debug, Default)]
struct OutcomeSlot(Option<SessionOutcome>);

impl DrawerHost for OutcomeSlot {
    fn on_save(&mut self, payload: SavedLot) {
        self.0 = Some(SessionOutcome::Saved(payload));
    }

    fn on_close(&mut self) {
        self.0 = Some(SessionOutcome::Closed);
    }
}

/// Popup shown over the drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Notice(String),
    SizePicker(SizePickerState),
}

#[derive(Debug, Clone, Copy)]
struct Highlight {
    row: usize,
    until: Instant,
}

/// Interactive lot drawer
pub struct App {
    drawer: LotDrawer,
    theme: Theme,
    selected_row: usize,
    selected_field: LotField,
    overlay: Option<Overlay>,
    highlight: Option<Highlight>,
    outcome: OutcomeSlot,
}

impl App {
    /// Mount the drawer and open it
    pub fn new(props: DrawerProps, theme: Theme) -> Self {
        let mut drawer = LotDrawer::new(props);
        drawer.set_open(true);
        Self {
            drawer,
            theme,
            selected_row: 0,
            selected_field: LotField::Size,
            overlay: None,
            highlight: None,
            outcome: OutcomeSlot::default(),
        }
    }

    pub fn drawer(&self) -> &LotDrawer {
        &self.drawer
    }

    pub fn selection(&self) -> (usize, LotField) {
        (self.selected_row, self.selected_field)
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Row currently flashed after a duplicate size pick
    pub fn highlighted_row(&self) -> Option<usize> {
        self.highlight.map(|h| h.row)
    }

    /// Whether the session has ended
    pub fn should_quit(&self) -> bool {
        self.outcome.0.is_some()
    }

    pub fn take_outcome(&mut self) -> Option<SessionOutcome> {
        self.outcome.0.take()
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                self.cancel();
                return;
            }
            match self.overlay.take() {
                Some(Overlay::SizePicker(state)) => self.handle_picker_key(state, key.code),
                Some(Overlay::Help) => {
                    if !matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                        self.overlay = Some(Overlay::Help);
                    }
                }
                // Any key dismisses a notice
                Some(Overlay::Notice(_)) => {}
                None => self.handle_key(key.code),
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.cancel(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_row + 1 < self.row_count() {
                    self.selected_row += 1;
                }
            }
            KeyCode::Tab | KeyCode::Right => self.selected_field = self.selected_field.next(),
            KeyCode::BackTab | KeyCode::Left => self.selected_field = self.selected_field.prev(),
            KeyCode::Enter if self.selected_field == LotField::Size => self.open_picker(),
            KeyCode::Char(c @ ('0'..='9' | '.' | '-')) if self.selected_field != LotField::Size => {
                self.type_char(c);
            }
            KeyCode::Backspace | KeyCode::Delete => self.backspace(),
            KeyCode::Char('a') | KeyCode::Char('+') => self.add_row(),
            KeyCode::Char('x') => self.remove_row(),
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('?') => self.overlay = Some(Overlay::Help),
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, mut state: SizePickerState, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => state.move_up(),
            KeyCode::Down | KeyCode::Char('j') => state.move_down(),
            KeyCode::Enter => {
                if let Some(choice) = state.selected() {
                    let size = choice.size.clone();
                    self.apply(state.row, LotField::Size, size);
                }
                return;
            }
            KeyCode::Esc => return,
            _ => {}
        }
        self.overlay = Some(Overlay::SizePicker(state));
    }

    fn row_count(&self) -> usize {
        self.drawer.aggregator().map_or(0, |a| a.len())
    }

    fn current_value(&self) -> String {
        self.drawer
            .aggregator()
            .and_then(|a| a.rows().get(self.selected_row))
            .map(|row| row.field(self.selected_field).to_string())
            .unwrap_or_default()
    }

    fn type_char(&mut self, c: char) {
        let mut value = self.current_value();
        value.push(c);
        self.apply(self.selected_row, self.selected_field, value);
    }

    fn backspace(&mut self) {
        let mut value = self.current_value();
        if value.pop().is_some() {
            self.apply(self.selected_row, self.selected_field, value);
        }
    }

    fn open_picker(&mut self) {
        if let Some(aggregator) = self.drawer.aggregator() {
            self.overlay = Some(Overlay::SizePicker(SizePickerState::for_row(
                aggregator,
                self.selected_row,
            )));
        }
    }

    /// Apply an edit and turn soft notices into UI feedback
    fn apply(&mut self, row: usize, field: LotField, value: String) {
        let Some(aggregator) = self.drawer.aggregator_mut() else {
            return;
        };
        if let Err(notice) = aggregator.update_field(row, field, value) {
            self.show_notice(notice);
        }
    }

    fn add_row(&mut self) {
        let Some(aggregator) = self.drawer.aggregator_mut() else {
            return;
        };
        // Greyed out in the footer: one row per allowed size at most
        if !aggregator.can_add_row() {
            debug!(rows = aggregator.len(), "add ignored: row limit reached");
            return;
        }
        match aggregator.add_row() {
            Ok(index) => {
                self.selected_row = index;
                self.selected_field = LotField::Size;
            }
            Err(notice) => self.show_notice(notice),
        }
    }

    fn remove_row(&mut self) {
        let Some(aggregator) = self.drawer.aggregator_mut() else {
            return;
        };
        match aggregator.remove_row(self.selected_row) {
            Ok(_) => {
                let len = aggregator.len();
                self.selected_row = self.selected_row.min(len.saturating_sub(1));
                self.highlight = None;
            }
            Err(notice) => self.show_notice(notice),
        }
    }

    fn show_notice(&mut self, notice: LotNotice) {
        match notice {
            LotNotice::DuplicateSize { row } => {
                // Point the seller at the row that already holds the size
                self.highlight = Some(Highlight {
                    row,
                    until: Instant::now() + HIGHLIGHT_DURATION,
                });
                self.selected_row = row;
                self.selected_field = LotField::Size;
            }
            LotNotice::NoSizesAvailable => {
                self.overlay = Some(Overlay::Notice(notice.to_string()));
            }
            LotNotice::LastRow => debug!("remove ignored: {}", notice),
            LotNotice::RowOutOfRange { .. } => warn!("edit ignored: {}", notice),
        }
    }

    fn save(&mut self) {
        if !self.drawer.save(&mut self.outcome) {
            debug!("save ignored: lot incomplete");
        }
    }

    fn cancel(&mut self) {
        self.drawer.cancel(&mut self.outcome);
    }

    /// Expire the duplicate highlight
    pub fn tick(&mut self) {
        self.expire_highlight(Instant::now());
    }

    pub fn expire_highlight(&mut self, now: Instant) {
        if self.highlight.is_some_and(|h| now >= h.until) {
            self.highlight = None;
        }
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let Some(aggregator) = self.drawer.aggregator() else {
            return;
        };
        let key = |enabled: bool| {
            let color = if enabled {
                self.theme.accent()
            } else {
                self.theme.muted()
            };
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        };
        let label = |enabled: bool| {
            let color = if enabled {
                self.theme.text()
            } else {
                self.theme.muted()
            };
            Style::default().fg(color)
        };

        let can_add = aggregator.can_add_row();
        let can_remove = aggregator.can_remove_row();
        let can_save = aggregator.is_valid();
        let line = Line::from(vec![
            Span::styled("a", key(can_add)),
            Span::styled(" + Add More Size  ", label(can_add)),
            Span::styled("x", key(can_remove)),
            Span::styled(" Remove  ", label(can_remove)),
            Span::styled("s", key(can_save)),
            Span::styled(" Save Lot  ", label(can_save)),
            Span::styled("Esc", key(true)),
            Span::styled(" Cancel  ", label(true)),
            Span::styled("?", key(true)),
            Span::styled(" Help", label(true)),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let line = "─".repeat(area.width as usize);
        buf.set_string(
            area.x,
            area.y,
            &line,
            Style::default().fg(self.theme.muted()),
        );
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(aggregator) = self.drawer.aggregator() else {
            return;
        };

        let groups = aggregator.group_by_size();
        let summary = SizeSummary::new(
            &groups,
            aggregator.compute_totals(),
            aggregator.specification(),
            self.theme,
        );

        let chunks = Layout::vertical([
            Constraint::Length(1),                            // [0] Padding
            Constraint::Length(1),                            // [1] Title
            Constraint::Length(1),                            // [2] Separator
            Constraint::Length(1),                            // [3] Section heading
            Constraint::Length(aggregator.len() as u16 + 1), // [4] Rows + header
            Constraint::Length(1),                            // [5] Padding
            Constraint::Length(summary.height()),            // [6] Size & Totals
            Constraint::Min(0),                               // [7] Remaining
            Constraint::Length(1),                            // [8] Separator
            Constraint::Length(1),                            // [9] Footer
        ])
        .split(area);

        Paragraph::new(Line::from(Span::styled(
            self.drawer.title(),
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
        self.render_separator(chunks[2], buf);

        Paragraph::new(Line::from(Span::styled(
            "Add Size Details",
            Style::default()
                .fg(self.theme.heading())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        LotTable::new(aggregator.rows(), aggregator.specification(), self.theme)
            .with_selection(self.selected_row, self.selected_field)
            .with_highlight(self.highlighted_row())
            .render(chunks[4], buf);

        summary.render(chunks[6], buf);

        self.render_separator(chunks[8], buf);
        self.render_footer(chunks[9], buf);

        match &self.overlay {
            Some(Overlay::Help) => {
                let popup_area = HelpPopup::centered_area(area);
                HelpPopup::new(self.theme).render(popup_area, buf);
            }
            Some(Overlay::Notice(message)) => {
                let popup_area = NoticePopup::centered_area(area);
                NoticePopup::new(message, self.theme).render(popup_area, buf);
            }
            Some(Overlay::SizePicker(state)) => {
                let popup_area = SizePicker::centered_area(area, state.choices.len());
                SizePicker::new(state, self.theme).render(popup_area, buf);
            }
            None => {}
        }
    }
}

/// Run the drawer until the seller saves or cancels
pub fn run(props: DrawerProps, theme: Theme) -> anyhow::Result<SessionOutcome> {
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, App::new(props, theme));
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> anyhow::Result<SessionOutcome> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if let Some(outcome) = app.take_outcome() {
            return Ok(outcome);
        }

        // Poll with a timeout so the duplicate highlight can expire
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }
        app.tick();
    }
}
