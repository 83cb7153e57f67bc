//! Plain text size report for `--headless` runs.
//!
//! Prints the same ranking the viewer shows: groups by size when a group-by
//! field is set, otherwise the largest symbols.

use std::io::{self, Write};

use crate::analysis::{summarize_by, summarize_symbols, total_size, SizeGroup};
use crate::domain::{Symbol, SymbolField};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// Human readable byte count (`512 B`, `1.5 KiB`, `3.2 MiB`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Ranking shown for `groupby`: groups when set, single symbols otherwise.
#[must_use]
pub fn ranking(symbols: &[Symbol], groupby: Option<SymbolField>) -> Vec<SizeGroup> {
    match groupby {
        Some(field) => summarize_by(field, symbols),
        None => summarize_symbols(symbols),
    }
}

/// Write the `top` largest entries of the ranking to `out`.
///
/// # Errors
/// Returns any error from writing to `out`.
pub fn write_report<W: Write>(
    mut out: W,
    symbols: &[Symbol],
    groupby: Option<SymbolField>,
    top: usize,
) -> io::Result<()> {
    let total = total_size(symbols);
    writeln!(out, "total: {} ({total} bytes) in {} symbols", format_size(total), symbols.len())?;

    let rows = ranking(symbols, groupby);
    match groupby {
        Some(field) => writeln!(out, "by {field}:")?,
        None => writeln!(out, "largest symbols:")?,
    }
    for row in rows.iter().take(top) {
        let key = if row.key.is_empty() { "(none)" } else { row.key.as_str() };
        write!(out, "  {:>10}  {:>5.1}%  {key}", row.size, row.percentage)?;
        if groupby.is_some() {
            write!(out, "  ({} symbols)", row.count)?;
        }
        writeln!(out)?;
    }
    if rows.len() > top {
        writeln!(out, "  ... {} more", rows.len() - top)?;
    }
    out.flush()
}
