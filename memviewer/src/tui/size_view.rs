//! Size panel - displays groups or symbols ranked by size.
//!
//! # Data Flow
//!
//! ```text
//! [Symbol] → summarize_by(field) → [SizeGroup] → SizeView::groups() → render()
//!     │
//!     └──────────────────────────────────────────→ SizeView::symbols() → render()
//! ```
//!
//! # Rendering Pattern
//!
//! Each entry takes 2 lines:
//! ```text
//! Line 1: [marker] label                 12.3%
//! Line 2:          ▓▓▓▓▓▓░░░░ detail
//! ```
//!
//! The bar is scaled to the largest entry in the list so that sizes read
//! proportionally, like tiles of a treemap.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph},
    Frame,
};

use super::theme::{
    gauge_bar, group_color, share_marker, INFO_DIM, MEDIUM_AMBER, MEM_GREEN, SEL_LEFT, SEL_RIGHT,
};
use crate::analysis::summarize_by;
use crate::domain::{Symbol, SymbolField};
use crate::report::format_size;

/// Label shown for an empty group key.
const EMPTY_KEY_LABEL: &str = "(none)";

/// Width of the proportional bar on each entry's second line.
const BAR_WIDTH: usize = 16;

/// What an entry stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    /// A group; Enter drills into its symbols.
    Group(String),
    /// A single symbol; Enter opens its details.
    Symbol(Symbol),
}

/// One row of the ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeEntry {
    pub label: String,
    pub detail: String,
    pub size: u64,
    /// Share of the whole filtered image (0.0 - 100.0).
    pub percentage: f64,
    pub kind: EntryKind,
}

impl SizeEntry {
    fn matches(&self, query_lower: &str) -> bool {
        self.label.to_lowercase().contains(query_lower)
            || self.detail.to_lowercase().contains(query_lower)
    }
}

// Pure data operations (filtering logic separated from UI state)

/// Truncate a string for display, adding "..." if too long
fn truncate_for_display(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Calculate scroll offset to keep selected item visible
fn visible_scroll_offset(selected: usize, current_offset: usize, visible_count: usize) -> usize {
    if selected >= current_offset + visible_count {
        selected.saturating_sub(visible_count - 1)
    } else {
        current_offset
    }
}

/// Calculate how many items fit in the visible area (2 lines per item)
fn visible_item_count(area: Rect, total_items: usize) -> usize {
    let available_height = usize::from(area.height.saturating_sub(2));
    (available_height / 2).max(1).min(total_items)
}

/// Filter entries by label or detail (case-insensitive substring match)
fn filter_entries(entries: &[SizeEntry], query: &str) -> Vec<SizeEntry> {
    match query {
        "" => entries.to_vec(),
        q => {
            let query_lower = q.to_lowercase();
            entries.iter().filter(|e| e.matches(&query_lower)).cloned().collect()
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage_of(size: u64, total: u64) -> f64 {
    if total > 0 {
        (size as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn symbol_entry(symbol: &Symbol, total: u64) -> SizeEntry {
    let section = if symbol.section.is_empty() { EMPTY_KEY_LABEL } else { &symbol.section };
    SizeEntry {
        label: symbol.display_name(),
        detail: format!("{} {section} {} {}", format_size(symbol.size), symbol.source, symbol.addr),
        size: symbol.size,
        percentage: percentage_of(symbol.size, total),
        kind: EntryKind::Symbol(symbol.clone()),
    }
}

// =============================================================================
// UI COMPONENT
// =============================================================================

/// Ranked list of groups or symbols.
///
/// Keeps the unfiltered entries next to the displayed ones so a search can
/// be cleared without rebuilding from the symbol table.
pub struct SizeView {
    /// Panel title, e.g. `BY SECTION`
    title: String,
    /// First visible item index (for virtual scrolling)
    scroll_offset: usize,
    /// Currently selected item (highlighted with < > brackets)
    pub selected_index: usize,
    /// Displayed entries (may be a subset of `all_entries`)
    pub entries: Vec<SizeEntry>,
    /// Complete unfiltered list (for filter reset)
    all_entries: Vec<SizeEntry>,
    /// True when search filter is active
    filter_active: bool,
}

impl SizeView {
    /// One entry per value of `field`, largest first.
    #[must_use]
    pub fn groups(field: SymbolField, symbols: &[Symbol]) -> Self {
        let entries = summarize_by(field, symbols)
            .into_iter()
            .map(|group| {
                let label = if group.key.is_empty() {
                    EMPTY_KEY_LABEL.to_string()
                } else {
                    group.key.clone()
                };
                let noun = if group.count == 1 { "symbol" } else { "symbols" };
                SizeEntry {
                    label,
                    detail: format!("{} in {} {noun}", format_size(group.size), group.count),
                    size: group.size,
                    percentage: group.percentage,
                    kind: EntryKind::Group(group.key),
                }
            })
            .collect();
        Self::from_entries(format!("BY {}", field.as_str().to_uppercase()), entries)
    }

    /// One entry per symbol, largest first; shares are taken of `total`.
    #[must_use]
    pub fn symbols(title: impl Into<String>, symbols: &[Symbol], total: u64) -> Self {
        let mut entries: Vec<SizeEntry> = symbols.iter().map(|s| symbol_entry(s, total)).collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.size));
        Self::from_entries(title.into(), entries)
    }

    fn from_entries(title: String, entries: Vec<SizeEntry>) -> Self {
        Self {
            title,
            scroll_offset: 0,
            selected_index: 0,
            all_entries: entries.clone(),
            entries,
            filter_active: false,
        }
    }

    pub fn scroll_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(self.selected_index);
    }

    pub fn scroll_down(&mut self) {
        self.selected_index = (self.selected_index + 1).min(self.entries.len().saturating_sub(1));
    }

    pub fn page_up(&mut self, rows: usize) {
        self.selected_index = self.selected_index.saturating_sub(rows);
        self.scroll_offset = self.scroll_offset.min(self.selected_index);
    }

    pub fn page_down(&mut self, rows: usize) {
        self.selected_index =
            (self.selected_index + rows).min(self.entries.len().saturating_sub(1));
    }

    #[must_use]
    pub fn get_selected(&self) -> Option<&SizeEntry> {
        self.entries.get(self.selected_index)
    }

    /// Move the selection to the group with `key`, if it is displayed.
    pub fn select_group(&mut self, key: &str) {
        if let Some(index) =
            self.entries.iter().position(|e| matches!(&e.kind, EntryKind::Group(k) if k == key))
        {
            self.selected_index = index;
        }
    }

    pub fn apply_filter(&mut self, query: &str) {
        if query.is_empty() {
            self.clear_filter();
            return;
        }

        self.entries = filter_entries(&self.all_entries, query);
        self.filter_active = true;
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn clear_filter(&mut self) {
        self.entries = self.all_entries.clone();
        self.filter_active = false;
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.filter_active
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let lines = self.render_entries(area);

        let title = if self.filter_active {
            format!("[ {} {}/{} ]", self.title, self.entries.len(), self.all_entries.len())
        } else {
            format!("[ {} {} ]", self.title, self.entries.len())
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .title(title)
                .border_style(Style::default().fg(MEM_GREEN)),
        );

        f.render_widget(paragraph, area);
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_entries(&self, area: Rect) -> Vec<Line<'static>> {
        if self.entries.is_empty() {
            let message = if self.filter_active { "  no match" } else { "  empty" };
            return vec![Line::from(Span::styled(message, Style::default().fg(INFO_DIM)))];
        }

        let mut lines = vec![];
        let max_label_len = usize::from(area.width).saturating_sub(18).clamp(8, 80);
        let largest = self.entries.iter().map(|e| e.size).max().unwrap_or(0);

        let display_count = visible_item_count(area, self.entries.len());
        let scroll_offset =
            visible_scroll_offset(self.selected_index, self.scroll_offset, display_count);

        for (display_idx, entry) in
            self.entries.iter().skip(scroll_offset).take(display_count).enumerate()
        {
            let rank = scroll_offset + display_idx;
            let is_selected = rank == self.selected_index;
            let (marker, share_color) = share_marker(entry.percentage);
            let label = truncate_for_display(&entry.label, max_label_len);

            // Line 1: <marker label percentage>
            let (sel_l, sel_r) = if is_selected { (SEL_LEFT, SEL_RIGHT) } else { (" ", " ") };
            let label_style = if is_selected {
                Style::default().fg(share_color).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(share_color)
            };
            lines.push(Line::from(vec![
                Span::styled(sel_l, Style::default().fg(MEDIUM_AMBER)),
                Span::styled(marker, Style::default().fg(share_color)),
                Span::raw(" "),
                Span::styled(label, label_style),
                Span::styled(format!(" {:>5.1}%", entry.percentage), Style::default().fg(share_color)),
                Span::styled(sel_r, Style::default().fg(MEDIUM_AMBER)),
            ]));

            // Line 2: bar scaled to the largest entry, then detail
            let relative = if largest > 0 { entry.size as f64 / largest as f64 * 100.0 } else { 0.0 };
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(gauge_bar(relative, BAR_WIDTH), Style::default().fg(group_color(rank))),
                Span::raw(" "),
                Span::styled(entry.detail.clone(), Style::default().fg(INFO_DIM)),
            ]));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(section: &str, name: &str, size: u64, source: &str) -> Symbol {
        Symbol {
            section: section.to_string(),
            name: name.to_string(),
            addr: "0x08000000".to_string(),
            size,
            source: source.to_string(),
        }
    }

    fn create_test_symbols() -> Vec<Symbol> {
        vec![
            sym("text", "main", 72, "obj/main"),
            sym("text", "uart_send", 200, "obj/uart"),
            sym("bss", "rx_buf", 256, "obj/uart"),
            sym("", "orphan", 8, "obj/main"),
        ]
    }

    #[test]
    fn test_groups_ranked_with_empty_key_label() {
        let view = SizeView::groups(SymbolField::Section, &create_test_symbols());
        let labels: Vec<_> = view.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["text", "bss", "(none)"]);
        assert_eq!(view.entries[2].kind, EntryKind::Group(String::new()));
        assert_eq!(view.entries[0].detail, "272 B in 2 symbols");
    }

    #[test]
    fn test_symbols_sorted_and_shared_of_total() {
        let symbols = create_test_symbols();
        let view = SizeView::symbols("SYMBOLS", &symbols[..2], 536);
        assert_eq!(view.entries[0].label, "uart_send");
        assert!((view.entries[0].percentage - 200.0 / 536.0 * 100.0).abs() < 1e-9);
        assert!(matches!(&view.entries[1].kind, EntryKind::Symbol(s) if s.name == "main"));
    }

    #[test]
    fn test_scroll_bounds() {
        let mut view = SizeView::symbols("SYMBOLS", &create_test_symbols(), 536);
        view.scroll_up();
        assert_eq!(view.selected_index, 0);
        view.page_down(10);
        assert_eq!(view.selected_index, 3);
        view.scroll_down();
        assert_eq!(view.selected_index, 3);
        view.page_up(2);
        assert_eq!(view.selected_index, 1);
    }

    #[test]
    fn test_filter_and_clear() {
        let mut view = SizeView::symbols("SYMBOLS", &create_test_symbols(), 536);
        view.scroll_down();
        view.apply_filter("UART");
        assert!(view.is_filtered());
        assert_eq!(view.entries.len(), 2); // uart_send by name, rx_buf by source
        assert_eq!(view.selected_index, 0);

        view.apply_filter("");
        assert!(!view.is_filtered());
        assert_eq!(view.entries.len(), 4);
    }

    #[test]
    fn test_select_group() {
        let mut view = SizeView::groups(SymbolField::Section, &create_test_symbols());
        view.select_group("bss");
        assert_eq!(view.get_selected().map(|e| e.label.as_str()), Some("bss"));
        view.select_group("missing");
        assert_eq!(view.selected_index, 1);
    }

    #[test]
    fn test_truncate_for_display_is_char_safe() {
        assert_eq!(truncate_for_display("short", 10), "short");
        assert_eq!(truncate_for_display("ääääääääää", 6), "äää...");
    }

    #[test]
    fn test_visible_scroll_offset() {
        assert_eq!(visible_scroll_offset(2, 0, 5), 0);
        assert_eq!(visible_scroll_offset(7, 0, 5), 3);
    }
}
