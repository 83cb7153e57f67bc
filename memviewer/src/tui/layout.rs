//! Screen plan for the size viewer.
//!
//! The ranking always gets the screen. The summary pane, its section
//! breakdown and the header/key bar drop out as the terminal shrinks.

use ratatui::layout::Constraint;

/// Narrower than this, the summary pane is hidden.
const MIN_WIDTH_FOR_SUMMARY: u16 = 70;
/// Up to this width the summary pane is kept narrow.
const NARROW_WIDTH: u16 = 110;
/// Shorter than this, only the ranking is drawn.
const MIN_HEIGHT_FOR_CHROME: u16 = 14;
/// Taller than this, the summary pane lists sections.
const MIN_HEIGHT_FOR_SECTIONS: u16 = 25;

/// Summary pane next to the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryPane {
    /// Share of the width, in percent.
    pub width_pct: u16,
    /// List per-section totals under the summary.
    pub sections: bool,
}

impl SummaryPane {
    /// `[summary, ranking]` column split.
    #[must_use]
    pub fn columns(self) -> [Constraint; 2] {
        [Constraint::Percentage(self.width_pct), Constraint::Percentage(100 - self.width_pct)]
    }
}

/// What to draw for a terminal of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPlan {
    /// Header and key bar.
    pub chrome: bool,
    pub summary: Option<SummaryPane>,
}

#[must_use]
pub fn plan_screen(width: u16, height: u16) -> ScreenPlan {
    if height < MIN_HEIGHT_FOR_CHROME {
        return ScreenPlan { chrome: false, summary: None };
    }

    let summary = (width >= MIN_WIDTH_FOR_SUMMARY).then(|| SummaryPane {
        width_pct: if width <= NARROW_WIDTH { 25 } else { 30 },
        sections: height >= MIN_HEIGHT_FOR_SECTIONS,
    });
    ScreenPlan { chrome: true, summary }
}
