//! TUI color theme
//!
//! Phosphor-green scheme for the terminal interface. Share thresholds pick
//! the color of a row: the bigger a symbol's slice of the image, the hotter.

use ratatui::style::Color;

pub const MEM_GREEN: Color = Color::Rgb(0, 255, 0);
pub const LARGE_RED: Color = Color::Rgb(255, 0, 0);
pub const MEDIUM_AMBER: Color = Color::Rgb(255, 191, 0);
pub const INFO_DIM: Color = Color::Rgb(0, 180, 0);
pub const BACKGROUND: Color = Color::Rgb(0, 20, 0);

/// Selection brackets around the highlighted row.
pub const SEL_LEFT: &str = "<";
pub const SEL_RIGHT: &str = ">";

/// Shares above this are drawn in red.
const LARGE_SHARE: f64 = 20.0;
/// Shares above this are drawn in amber.
const MEDIUM_SHARE: f64 = 5.0;

/// Colors cycled through for sibling groups, so neighbouring groups in the
/// ranking are told apart the way adjacent treemap tiles are.
const GROUP_PALETTE: [Color; 6] = [
    Color::Rgb(0, 255, 0),
    Color::Rgb(0, 200, 255),
    Color::Rgb(255, 191, 0),
    Color::Rgb(200, 120, 255),
    Color::Rgb(255, 120, 80),
    Color::Rgb(120, 255, 200),
];

/// Color for a share of the total image size
/// - Above 20%: Large (Red)
/// - Above 5%: Medium (Amber)
/// - Otherwise: Normal (Green)
#[must_use]
pub fn share_color(percentage: f64) -> Color {
    if percentage > LARGE_SHARE {
        LARGE_RED
    } else if percentage > MEDIUM_SHARE {
        MEDIUM_AMBER
    } else {
        MEM_GREEN
    }
}

/// Text marker and color for a share.
#[must_use]
pub fn share_marker(percentage: f64) -> (&'static str, Color) {
    if percentage > LARGE_SHARE {
        ("[X]", LARGE_RED)
    } else if percentage > MEDIUM_SHARE {
        ("[!]", MEDIUM_AMBER)
    } else {
        ("[-]", MEM_GREEN)
    }
}

/// Stable color for the `index`-th group of a ranking.
#[must_use]
pub fn group_color(index: usize) -> Color {
    GROUP_PALETTE[index % GROUP_PALETTE.len()]
}

/// Horizontal gauge, `width` cells wide, filled to `percentage`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn gauge_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "▓".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_color_thresholds() {
        assert_eq!(share_color(50.0), LARGE_RED);
        assert_eq!(share_color(10.0), MEDIUM_AMBER);
        assert_eq!(share_color(5.0), MEM_GREEN);
        assert_eq!(share_marker(21.0).0, "[X]");
    }

    #[test]
    fn test_gauge_bar_bounds() {
        assert_eq!(gauge_bar(0.0, 4), "░░░░");
        assert_eq!(gauge_bar(50.0, 4), "▓▓░░");
        assert_eq!(gauge_bar(100.0, 4), "▓▓▓▓");
        assert_eq!(gauge_bar(250.0, 4), "▓▓▓▓");
        assert_eq!(gauge_bar(-3.0, 4), "░░░░");
    }

    #[test]
    fn test_group_color_cycles() {
        assert_eq!(group_color(0), group_color(GROUP_PALETTE.len()));
        assert_ne!(group_color(0), group_color(1));
    }
}
