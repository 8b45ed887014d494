//! Interactive attrition dashboard using ratatui
//!
//! A sidebar lists the report sections; the selected section is drawn on
//! the right. Panels are computed before the terminal is taken over.

use std::io::{self, stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use crate::report::widgets::render_panel;
use crate::report::{
    Panel, Preview, KEY_TAKEAWAYS, PREVIEW_HEADING, TAKEAWAYS_HEADING, TITLE,
};

/// Rows moved by PageUp/PageDown in the preview
const PAGE_ROWS: usize = 10;

const SIDEBAR_WIDTH: u16 = 36;

/// One entry of the sidebar
pub enum Section<'a> {
    Preview(&'a Preview),
    Panel(&'a Panel),
    Takeaways,
}

impl Section<'_> {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Preview(_) => PREVIEW_HEADING,
            Section::Panel(panel) => panel.heading(),
            Section::Takeaways => TAKEAWAYS_HEADING,
        }
    }
}

/// Sections in report order: preview, every panel, takeaways
pub fn build_sections<'a>(preview: &'a Preview, panels: &'a [Panel]) -> Vec<Section<'a>> {
    std::iter::once(Section::Preview(preview))
        .chain(panels.iter().map(Section::Panel))
        .chain(std::iter::once(Section::Takeaways))
        .collect()
}

/// Outcome of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Navigation state of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub selected: usize,
    /// First preview row shown
    pub preview_row: usize,
    /// First preview column shown
    pub preview_col: usize,
}

impl DashboardState {
    /// Apply a key press given the number of sections and the preview size
    pub fn handle_key(
        &mut self,
        code: KeyCode,
        sections: usize,
        preview_rows: usize,
        preview_cols: usize,
    ) -> Action {
        let last = sections.saturating_sub(1);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::Tab => {
                self.selected = if self.selected >= last { 0 } else { self.selected + 1 };
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last,
            KeyCode::PageDown => {
                self.preview_row =
                    (self.preview_row + PAGE_ROWS).min(preview_rows.saturating_sub(1));
            }
            KeyCode::PageUp => self.preview_row = self.preview_row.saturating_sub(PAGE_ROWS),
            KeyCode::Right | KeyCode::Char('l') => {
                self.preview_col = (self.preview_col + 1).min(preview_cols.saturating_sub(1));
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.preview_col = self.preview_col.saturating_sub(1)
            }
            _ => {}
        }
        Action::Continue
    }
}

/// Run the interactive dashboard until the user quits
pub fn run_dashboard(preview: &Preview, panels: &[Panel]) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_dashboard_loop(&mut terminal, preview, panels);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    preview: &Preview,
    panels: &[Panel],
) -> Result<()> {
    let sections = build_sections(preview, panels);
    let mut state = DashboardState::default();

    loop {
        terminal.draw(|frame| draw_dashboard(frame, &state, &sections))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let action = state.handle_key(
                key.code,
                sections.len(),
                preview.rows.len(),
                preview.columns.len(),
            );
            if action == Action::Quit {
                tracing::debug!("dashboard closed");
                return Ok(());
            }
        }
    }
}

/// Draw the full dashboard for the current state
pub fn draw_dashboard(frame: &mut Frame, state: &DashboardState, sections: &[Section]) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = Paragraph::new(Line::from(TITLE).cyan().bold().centered()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(title, header);

    let [sidebar, content] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)]).areas(body);

    draw_sidebar(frame, sidebar, state.selected, sections);

    match sections.get(state.selected) {
        Some(Section::Preview(preview)) => draw_preview(frame, content, preview, state),
        Some(Section::Panel(panel)) => render_panel(panel, content, frame.buffer_mut()),
        Some(Section::Takeaways) => draw_takeaways(frame, content),
        None => {}
    }

    let help_text = Line::from(vec![
        Span::styled("  ↑/↓", Style::default().fg(Color::Cyan)),
        Span::styled(" section  ", Style::default().fg(Color::DarkGray)),
        Span::styled("PgUp/PgDn ←/→", Style::default().fg(Color::Cyan)),
        Span::styled(" scroll preview  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc/Q", Style::default().fg(Color::Cyan)),
        Span::styled(" quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(help_text), footer);
}

fn draw_sidebar(frame: &mut Frame, area: Rect, selected: usize, sections: &[Section]) {
    let items: Vec<ListItem> = sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let style = if i == selected {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(" {} ", section.title())).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Sections ")
            .title_style(Style::default().fg(Color::Cyan).bold()),
    );
    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_preview(frame: &mut Frame, area: Rect, preview: &Preview, state: &DashboardState) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        " {} ({} of {} rows, {} columns) ",
        PREVIEW_HEADING,
        preview.rows.len(),
        preview.total_rows,
        preview.columns.len()
    ));

    let widths = preview.column_widths();
    let available = area.width.saturating_sub(2) as usize;
    let start = state.preview_col.min(preview.columns.len());
    let mut end = start;
    let mut used = 0;
    while end < widths.len() && (end == start || used + widths[end] + 1 <= available) {
        used += widths[end] + 1;
        end += 1;
    }

    let header = Row::new(
        preview.columns[start..end]
            .iter()
            .map(|name| Cell::from(name.as_str())),
    )
    .style(Style::default().fg(Color::Yellow).bold());

    let rows = preview.rows.iter().skip(state.preview_row).map(|row| {
        Row::new(
            row.get(start..end)
                .unwrap_or_default()
                .iter()
                .map(|cell| Cell::from(cell.as_str())),
        )
    });

    let constraints = widths[start..end]
        .iter()
        .map(|w| Constraint::Length(*w as u16));

    let table = Table::new(rows, constraints)
        .header(header)
        .block(block)
        .column_spacing(1);
    frame.render_widget(table, area);
}

fn draw_takeaways(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("")];
    for takeaway in KEY_TAKEAWAYS {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(Color::Cyan)),
            Span::styled(takeaway, Style::default().bold()),
        ]));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", TAKEAWAYS_HEADING))
            .title_style(Style::default().fg(Color::Cyan).bold()),
    );
    frame.render_widget(paragraph, area);
}
