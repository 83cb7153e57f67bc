//! # Terminal User Interface (TUI)
//!
//! Interactive size viewer using `ratatui`. It shows the filtered symbol
//! table as a ranking: groups when a group-by field is set, single symbols
//! otherwise.
//!
//! ## View Modes
//!
//! - **Browse** - Ranked list + summary panel (default)
//! - **Detail** - Full record of the selected symbol
//! - **Search** - Filter the ranking by text
//! - **Help** - Keyboard shortcuts
//!
//! ## Sub-Modules
//!
//! - `size_view` - Ranked list with selection and search
//! - `status` - Summary panel (totals, largest symbol, sections)
//! - `layout` - What to draw at each terminal size
//! - `theme` - Color scheme

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io::{self, IsTerminal};
use std::time::Duration;

pub mod layout;
pub mod size_view; // Public for testing
mod status;
mod theme;

use layout::plan_screen;
use size_view::{EntryKind, SizeView};
use status::StatusPanel;
use theme::{share_color, BACKGROUND, INFO_DIM, MEDIUM_AMBER, MEM_GREEN};

use crate::analysis::total_size;
use crate::domain::{Symbol, SymbolField, TuiError};
use crate::report::format_size;

// =============================================================================
// STYLE CONSTANTS
// =============================================================================

const STYLE_HEADING: Style = Style::new().fg(MEM_GREEN).add_modifier(Modifier::BOLD);
const STYLE_LABEL: Style = Style::new().fg(MEDIUM_AMBER).add_modifier(Modifier::BOLD);
const STYLE_DIM: Style = Style::new().fg(INFO_DIM);
const STYLE_KEY: Style = Style::new().fg(MEDIUM_AMBER);
const STYLE_TEXT: Style = Style::new().fg(ratatui::style::Color::White);

/// Rows moved by PageUp/PageDown.
const PAGE_ROWS: usize = 10;

/// Group-by fields visited by the `g` key, in order.
const GROUPBY_CYCLE: [Option<SymbolField>; 4] =
    [None, Some(SymbolField::Section), Some(SymbolField::Source), Some(SymbolField::Name)];

/// The group-by field after `current` in [`GROUPBY_CYCLE`].
fn next_groupby(current: Option<SymbolField>) -> Option<SymbolField> {
    let position = GROUPBY_CYCLE.iter().position(|&field| field == current);
    match position {
        Some(index) => GROUPBY_CYCLE[(index + 1) % GROUPBY_CYCLE.len()],
        // Fields outside the cycle (addr, size) restart it
        None => GROUPBY_CYCLE[0],
    }
}

// =============================================================================
// VIEW MODES
// =============================================================================

/// Current view mode determines what's displayed and how keys are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    /// Main view: ranking and summary
    Browse,
    /// Record of one symbol
    Detail,
    /// Text input for filtering the ranking
    Search,
    /// Help overlay with keyboard shortcuts
    Help,
}

// =============================================================================
// APP
// =============================================================================

/// Size viewer over an already parsed and filtered symbol table.
pub struct App {
    symbols: Vec<Symbol>,
    total_size: u64,
    /// Name of the map file, for the header
    title: String,
    groupby: Option<SymbolField>,
    /// Group whose symbols are listed, when drilled in
    drilled: Option<String>,

    // UI panels
    status_panel: StatusPanel,
    size_view: SizeView,

    // UI state
    view_mode: ViewMode,
    search_query: String,
    detail: Option<Symbol>,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(symbols: Vec<Symbol>, groupby: Option<SymbolField>) -> Self {
        let total = total_size(&symbols);
        let status_panel = StatusPanel::new(&symbols);
        let size_view = build_view(&symbols, total, groupby, None);
        Self {
            symbols,
            total_size: total,
            title: String::new(),
            groupby,
            drilled: None,
            status_panel,
            size_view,
            view_mode: ViewMode::Browse,
            search_query: String::new(),
            detail: None,
            should_quit: false,
        }
    }

    /// Name shown in the header, usually the map file name.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn rebuild_view(&mut self) {
        self.size_view =
            build_view(&self.symbols, self.total_size, self.groupby, self.drilled.as_deref());
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match self.view_mode {
            ViewMode::Browse => match key {
                KeyCode::Char('q' | 'Q') => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => self.size_view.scroll_up(),
                KeyCode::Down | KeyCode::Char('j') => self.size_view.scroll_down(),
                KeyCode::PageUp => self.size_view.page_up(PAGE_ROWS),
                KeyCode::PageDown => self.size_view.page_down(PAGE_ROWS),
                KeyCode::Enter => self.open_selected(),
                KeyCode::Esc | KeyCode::Backspace => self.go_back(),
                KeyCode::Char('/') => {
                    self.search_query.clear();
                    self.view_mode = ViewMode::Search;
                }
                KeyCode::Char('g' | 'G') => {
                    self.groupby = next_groupby(self.groupby);
                    self.drilled = None;
                    self.search_query.clear();
                    self.rebuild_view();
                }
                KeyCode::Char('?') => self.view_mode = ViewMode::Help,
                _ => {}
            },
            ViewMode::Search => match key {
                KeyCode::Esc => {
                    self.search_query.clear();
                    self.size_view.clear_filter();
                    self.view_mode = ViewMode::Browse;
                }
                KeyCode::Enter => {
                    self.size_view.apply_filter(&self.search_query);
                    self.view_mode = ViewMode::Browse;
                }
                KeyCode::Backspace => {
                    self.search_query.pop();
                }
                KeyCode::Char(c) => self.search_query.push(c),
                _ => {}
            },
            // Any key closes help
            ViewMode::Help => self.view_mode = ViewMode::Browse,
            ViewMode::Detail => {
                if matches!(
                    key,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q' | 'Q')
                ) {
                    self.detail = None;
                    self.view_mode = ViewMode::Browse;
                }
            }
        }
    }

    /// Drill into the selected group, or show the selected symbol.
    fn open_selected(&mut self) {
        let Some(entry) = self.size_view.get_selected() else {
            return;
        };
        match &entry.kind {
            EntryKind::Group(key) => {
                self.drilled = Some(key.clone());
                self.search_query.clear();
                self.rebuild_view();
            }
            EntryKind::Symbol(symbol) => {
                self.detail = Some(symbol.clone());
                self.view_mode = ViewMode::Detail;
            }
        }
    }

    /// Undo the last narrowing step: the search first, then the drill-in.
    fn go_back(&mut self) {
        if self.size_view.is_filtered() {
            self.search_query.clear();
            self.size_view.clear_filter();
        } else if let Some(key) = self.drilled.take() {
            self.rebuild_view();
            self.size_view.select_group(&key);
        }
    }

    fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let plan = plan_screen(area.width, area.height);

        let (main_area, chrome) = if plan.chrome {
            let outer = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Header
                    Constraint::Min(0),    // Summary + ranking
                    Constraint::Length(3), // Key bar
                ])
                .split(area);
            (outer[1], Some((outer[0], outer[2])))
        } else {
            (area, None)
        };

        if let Some((header_area, _)) = chrome {
            f.render_widget(self.header(), header_area);
        }

        if let Some(pane) = plan.summary {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(pane.columns())
                .split(main_area);
            self.status_panel.render(f, cols[0], pane.sections);
            self.size_view.render(f, cols[1]);
        } else {
            self.size_view.render(f, main_area);
        }

        match self.view_mode {
            ViewMode::Browse => {}
            ViewMode::Search => render_search_overlay(f, main_area, &self.search_query),
            ViewMode::Help => render_help_overlay(f, area),
            ViewMode::Detail => {
                if let Some(symbol) = &self.detail {
                    render_detail_overlay(f, area, symbol, self.total_size);
                }
            }
        }

        if let Some((_, keys_area)) = chrome {
            f.render_widget(self.key_bar(), keys_area);
        }
    }

    fn header(&self) -> Paragraph<'static> {
        let grouping = match (self.groupby, &self.drilled) {
            (Some(field), Some(key)) => format!("{field} = {key}"),
            (Some(field), None) => format!("by {field}"),
            (None, _) => "symbols".to_string(),
        };
        Paragraph::new(vec![Line::from(vec![
            Span::styled("MEMVIEWER", STYLE_HEADING),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(self.title.clone(), Style::new().fg(MEDIUM_AMBER)),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(format_size(self.total_size), Style::new().fg(MEM_GREEN)),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(format!("{} syms", self.symbols.len()), Style::new().fg(MEM_GREEN)),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(grouping, Style::new().fg(MEM_GREEN)),
        ])])
        .block(Block::default().borders(Borders::ALL).border_style(Style::new().fg(MEM_GREEN)))
    }

    fn key_bar(&self) -> Paragraph<'static> {
        let status_line = match self.view_mode {
            ViewMode::Browse => {
                let mode = if self.size_view.is_filtered() {
                    Span::styled("[Filtered]", STYLE_KEY)
                } else if self.drilled.is_some() {
                    Span::styled("[Group]", STYLE_KEY)
                } else {
                    Span::styled("[Ready]", Style::new().fg(MEM_GREEN))
                };
                Line::from(vec![
                    Span::styled("Q", STYLE_KEY),
                    Span::styled(":Quit ", STYLE_DIM),
                    Span::styled("Enter", STYLE_KEY),
                    Span::styled(":Open ", STYLE_DIM),
                    Span::styled("Esc", STYLE_KEY),
                    Span::styled(":Back ", STYLE_DIM),
                    Span::styled("/", STYLE_KEY),
                    Span::styled(":Search ", STYLE_DIM),
                    Span::styled("G", STYLE_KEY),
                    Span::styled(":Group ", STYLE_DIM),
                    Span::styled("?", STYLE_KEY),
                    Span::styled(":Help ", STYLE_DIM),
                    mode,
                ])
            }
            ViewMode::Detail => Line::from(vec![
                Span::styled("ESC", STYLE_KEY),
                Span::styled(":Back ", STYLE_DIM),
                Span::styled("[Detail]", STYLE_KEY),
            ]),
            ViewMode::Search => Line::from(vec![
                Span::styled("Enter", STYLE_KEY),
                Span::styled(":Apply ", STYLE_DIM),
                Span::styled("ESC", STYLE_KEY),
                Span::styled(":Cancel ", STYLE_DIM),
                Span::styled("[Search]", STYLE_KEY),
            ]),
            ViewMode::Help => Line::from(vec![
                Span::styled("Any key", STYLE_KEY),
                Span::styled(":Close ", STYLE_DIM),
                Span::styled("[Help]", Style::new().fg(MEM_GREEN)),
            ]),
        };

        Paragraph::new(vec![status_line])
            .block(Block::default().borders(Borders::ALL).border_style(Style::new().fg(MEM_GREEN)))
    }

    /// Run the TUI event loop
    ///
    /// # Errors
    /// Returns [`TuiError::Terminal`] if stdout is not a terminal, or an I/O
    /// error if terminal setup or rendering fails. The terminal is restored
    /// before returning either way.
    pub fn run(mut self) -> Result<(), TuiError> {
        if !io::stdout().is_terminal() {
            return Err(TuiError::Terminal(
                "stdout is not a terminal, use --headless for a text report".to_string(),
            ));
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Cleanup terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), TuiError> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }
}

/// Ranking for the current grouping state.
fn build_view(
    symbols: &[Symbol],
    total: u64,
    groupby: Option<SymbolField>,
    drilled: Option<&str>,
) -> SizeView {
    match (groupby, drilled) {
        (Some(field), Some(key)) => {
            let members: Vec<Symbol> =
                symbols.iter().filter(|s| s.field_text(field) == key).cloned().collect();
            let label = if key.is_empty() { "(none)" } else { key };
            SizeView::symbols(format!("{} {label}", field.as_str().to_uppercase()), &members, total)
        }
        (Some(field), None) => SizeView::groups(field, symbols),
        (None, _) => SizeView::symbols("SYMBOLS", symbols, total),
    }
}

// =============================================================================
// OVERLAY RENDERERS
// =============================================================================

/// Render the help overlay explaining the ranking and keyboard shortcuts
fn render_help_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_popup(area, 80, 24);

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  What You're Looking At", STYLE_HEADING)),
        Line::from(Span::styled(
            "  Every symbol the linker placed, ranked by the bytes it occupies.",
            STYLE_DIM,
        )),
        Line::from(Span::styled(
            "  Percentages are shares of everything left after filtering.",
            STYLE_DIM,
        )),
        Line::from(""),
        Line::from(Span::styled("  How to Read It", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  Ranking  ", STYLE_LABEL),
            Span::styled("Groups or symbols, largest first. Bars are relative.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Summary  ", STYLE_LABEL),
            Span::styled("Totals and the share of each output section.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Colors   ", STYLE_LABEL),
            Span::styled("Red above 20% of the image, amber above 5%.", STYLE_DIM),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Keys", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  ↑↓", STYLE_KEY),
            Span::styled(" Select   ", STYLE_TEXT),
            Span::styled("Enter", STYLE_KEY),
            Span::styled(" Open group / symbol   ", STYLE_TEXT),
            Span::styled("Esc", STYLE_KEY),
            Span::styled(" Back", STYLE_TEXT),
        ]),
        Line::from(vec![
            Span::styled("  /", STYLE_KEY),
            Span::styled(" Search   ", STYLE_TEXT),
            Span::styled("G", STYLE_KEY),
            Span::styled(" Cycle grouping (none, section, source, name)   ", STYLE_TEXT),
            Span::styled("Q", STYLE_KEY),
            Span::styled(" Quit", STYLE_TEXT),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", STYLE_DIM)),
    ];

    let help_widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::new().bg(ratatui::style::Color::Black).fg(MEM_GREEN)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(help_widget, popup_area);
}

/// Create a centered popup area with given width percentage and height in lines
fn centered_popup(area: Rect, width_percent: u16, height_lines: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height_lines), Constraint::Fill(1)])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

/// Render the full record of one symbol
#[allow(clippy::cast_precision_loss)]
fn render_detail_overlay(f: &mut Frame, area: Rect, symbol: &Symbol, total: u64) {
    let popup_area = centered_popup(area, 70, 16);
    let separator = "─".repeat(usize::from(popup_area.width.saturating_sub(4)));

    let share = if total > 0 { symbol.size as f64 / total as f64 * 100.0 } else { 0.0 };
    let display_name = symbol.display_name();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("SYMBOL DETAILS", STYLE_HEADING)),
        Line::from(separator),
        Line::from(vec![
            Span::styled("Name:      ", STYLE_LABEL),
            Span::styled(symbol.name.clone(), Style::new().fg(MEM_GREEN)),
        ]),
    ];
    if display_name != symbol.name {
        lines.push(Line::from(vec![
            Span::styled("Demangled: ", STYLE_LABEL),
            Span::styled(display_name, Style::new().fg(MEM_GREEN)),
        ]));
    }
    lines.extend([
        Line::from(vec![
            Span::styled("Section:   ", STYLE_LABEL),
            Span::styled(symbol.section.clone(), STYLE_TEXT),
        ]),
        Line::from(vec![
            Span::styled("Source:    ", STYLE_LABEL),
            Span::styled(symbol.source.clone(), STYLE_TEXT),
        ]),
        Line::from(vec![
            Span::styled("Address:   ", STYLE_LABEL),
            Span::styled(symbol.addr.clone(), STYLE_TEXT),
        ]),
        Line::from(vec![
            Span::styled("Size:      ", STYLE_LABEL),
            Span::styled(format!("{} bytes", symbol.size), Style::new().fg(share_color(share))),
            Span::styled(format!(" ({}, {share:.2}%)", format_size(symbol.size)), STYLE_DIM),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("ESC", STYLE_KEY), Span::styled(" to close", STYLE_DIM)]),
    ]);

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Symbol Detail ")
            .style(Style::new().bg(BACKGROUND).fg(MEM_GREEN)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(widget, popup_area);
}

/// Render search input overlay
fn render_search_overlay(f: &mut Frame, area: Rect, query: &str) {
    let popup_area = {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(3),
                Constraint::Percentage(60),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(vertical[1])[1]
    };

    let search_widget = Paragraph::new(format!("Search: {query}_"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter (Enter to apply, Esc to cancel)")
                .style(Style::default().bg(ratatui::style::Color::Black).fg(MEM_GREEN)),
        )
        .style(Style::default().fg(MEDIUM_AMBER));

    f.render_widget(Clear, popup_area);
    f.render_widget(search_widget, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn sym(section: &str, name: &str, size: u64, source: &str) -> Symbol {
        Symbol {
            section: section.to_string(),
            name: name.to_string(),
            addr: "0x08000100".to_string(),
            size,
            source: source.to_string(),
        }
    }

    fn create_test_symbols() -> Vec<Symbol> {
        vec![
            sym("text", "main", 72, "obj/main"),
            sym("text", "uart_send", 200, "obj/uart"),
            sym("bss", "rx_buf", 256, "obj/uart"),
            sym("data", "_ZN4core3fmt5write17h0123456789abcdefE", 24, "libc"),
        ]
    }

    fn selected_label(app: &App) -> Option<String> {
        app.size_view.get_selected().map(|e| e.label.clone())
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal.backend().buffer().content.iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test]
    fn test_next_groupby_cycles() {
        assert_eq!(next_groupby(None), Some(SymbolField::Section));
        assert_eq!(next_groupby(Some(SymbolField::Section)), Some(SymbolField::Source));
        assert_eq!(next_groupby(Some(SymbolField::Name)), None);
        assert_eq!(next_groupby(Some(SymbolField::Addr)), None);
    }

    #[test]
    fn test_drill_into_group_and_back() {
        let mut app = App::new(create_test_symbols(), Some(SymbolField::Source));
        // obj/uart (456) ranks first
        assert_eq!(selected_label(&app).as_deref(), Some("obj/uart"));
        app.handle_key(KeyCode::Down);
        assert_eq!(selected_label(&app).as_deref(), Some("obj/main"));

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.drilled.as_deref(), Some("obj/main"));
        assert_eq!(app.size_view.entries.len(), 1);
        assert_eq!(selected_label(&app).as_deref(), Some("main"));

        app.handle_key(KeyCode::Esc);
        assert_eq!(app.drilled, None);
        // Selection returns to the group we came from
        assert_eq!(selected_label(&app).as_deref(), Some("obj/main"));
    }

    #[test]
    fn test_enter_on_symbol_opens_detail() {
        let mut app = App::new(create_test_symbols(), None);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.view_mode, ViewMode::Detail);
        assert_eq!(app.detail.as_ref().map(|s| s.name.as_str()), Some("rx_buf"));

        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.view_mode, ViewMode::Detail);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.view_mode, ViewMode::Browse);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_search_apply_and_clear() {
        let mut app = App::new(create_test_symbols(), None);
        app.handle_key(KeyCode::Char('/'));
        assert_eq!(app.view_mode, ViewMode::Search);
        for c in "uarx".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.view_mode, ViewMode::Browse);
        assert!(app.size_view.is_filtered());
        assert_eq!(app.size_view.entries.len(), 2);

        // First Esc clears the search, and the view stays in browse mode
        app.handle_key(KeyCode::Esc);
        assert!(!app.size_view.is_filtered());
        assert_eq!(app.size_view.entries.len(), 4);
    }

    #[test]
    fn test_groupby_key_rebuilds_view() {
        let mut app = App::new(create_test_symbols(), None);
        app.handle_key(KeyCode::Char('g'));
        assert_eq!(app.groupby, Some(SymbolField::Section));
        let labels: Vec<_> = app.size_view.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["text", "bss", "data"]);
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = App::new(create_test_symbols(), None);
        app.handle_key(KeyCode::Char('?'));
        assert_eq!(app.view_mode, ViewMode::Help);
        app.handle_key(KeyCode::Char('q'));
        assert_eq!(app.view_mode, ViewMode::Browse);
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_draw_full_size() {
        let app = App::new(create_test_symbols(), None).with_title("firmware.map");
        let screen = screen_text(&app, 140, 40);
        assert!(screen.contains("MEMVIEWER"));
        assert!(screen.contains("firmware.map"));
        assert!(screen.contains("rx_buf"));
        assert!(screen.contains("Summary"));
    }

    #[test]
    fn test_draw_detail_shows_demangled_name() {
        let mut app = App::new(create_test_symbols(), Some(SymbolField::Source));
        // libc group is last; drill in and open its only symbol
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.view_mode, ViewMode::Detail);
        let screen = screen_text(&app, 140, 40);
        assert!(screen.contains("core::fmt::write"));
    }

    #[test]
    fn test_draw_tiny_terminal() {
        let app = App::new(create_test_symbols(), None);
        let screen = screen_text(&app, 30, 8);
        assert!(!screen.contains("MEMVIEWER"));
        assert!(!screen.contains("Summary"));
    }
}
