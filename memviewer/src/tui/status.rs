use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use std::collections::HashSet;

use super::theme::{gauge_bar, group_color, share_color, INFO_DIM, MEDIUM_AMBER, MEM_GREEN};
use crate::analysis::{summarize_by, total_size, SizeGroup};
use crate::domain::{Symbol, SymbolField};
use crate::report::format_size;

/// Sections listed in the breakdown.
const MAX_SECTIONS: usize = 6;

/// Summary panel - totals for the whole filtered symbol table
pub struct StatusPanel {
    total_size: u64,
    symbol_count: usize,
    source_count: usize,
    largest: Option<(String, u64, f64)>,
    sections: Vec<SizeGroup>,
}

impl StatusPanel {
    pub fn new(symbols: &[Symbol]) -> Self {
        let total = total_size(symbols);
        let source_count = symbols.iter().map(|s| s.source.as_str()).collect::<HashSet<_>>().len();

        let largest = symbols
            .iter()
            .fold(None::<&Symbol>, |best, s| match best {
                Some(b) if b.size >= s.size => Some(b),
                _ => Some(s),
            })
            .map(|s| {
                let share = share_of(s.size, total);
                (s.display_name(), s.size, share)
            });

        Self {
            total_size: total,
            symbol_count: symbols.len(),
            source_count,
            largest,
            sections: summarize_by(SymbolField::Section, symbols),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, show_sections: bool) {
        let mut lines = vec![];
        let bar_width = usize::from(area.width).saturating_sub(16).clamp(4, 12);

        lines.push(Line::from(Span::styled(
            format!(" {}", format_size(self.total_size)),
            Style::default().fg(MEM_GREEN).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled(" Symbols  ", Style::default().fg(INFO_DIM)),
            Span::styled(format!("{}", self.symbol_count), Style::default().fg(MEM_GREEN)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Sources  ", Style::default().fg(INFO_DIM)),
            Span::styled(format!("{}", self.source_count), Style::default().fg(MEM_GREEN)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Sections ", Style::default().fg(INFO_DIM)),
            Span::styled(format!("{}", self.sections.len()), Style::default().fg(MEM_GREEN)),
        ]));
        lines.push(Line::from(""));

        if let Some((name, size, share)) = &self.largest {
            let color = share_color(*share);
            lines.push(Line::from(vec![
                Span::styled(" Largest  ", Style::default().fg(INFO_DIM)),
                Span::styled(format_size(*size), Style::default().fg(color)),
            ]));
            lines.push(Line::from(Span::styled(format!(" {name}"), Style::default().fg(color))));
            lines.push(Line::from(""));
        }

        if show_sections {
            lines.push(Line::from(Span::styled(" Sections", Style::default().fg(MEDIUM_AMBER))));
            for (index, section) in self.sections.iter().take(MAX_SECTIONS).enumerate() {
                let name = if section.key.is_empty() { "-" } else { section.key.as_str() };
                lines.push(Line::from(vec![
                    Span::styled(format!(" {name:<8.8} "), Style::default().fg(INFO_DIM)),
                    Span::styled(
                        gauge_bar(section.percentage, bar_width),
                        Style::default().fg(group_color(index)),
                    ),
                    Span::styled(
                        format!(" {:.0}%", section.percentage),
                        Style::default().fg(INFO_DIM),
                    ),
                ]));
            }
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Summary")
                .border_style(Style::default().fg(MEM_GREEN)),
        );

        f.render_widget(paragraph, area);
    }
}

#[allow(clippy::cast_precision_loss)]
fn share_of(size: u64, total: u64) -> f64 {
    if total > 0 {
        size as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}
