//! Record transforms applied after filtering.
//!
//! Each pass takes a symbol by value and returns the rewritten one, so the
//! parser's output can be shared between views without any of them seeing
//! another's edits.

use crate::domain::Symbol;

/// Every libc archive member is reported under this single source.
pub const LIBC_SOURCE: &str = "libc";

/// Collapse any source mentioning `libc.` into [`LIBC_SOURCE`].
///
/// Toolchains place libc members under long, version-specific archive paths
/// (`.../libc.a(lib_a-memset.o)`); grouping by source is more useful with
/// them folded together.
#[must_use]
pub fn normalize_libc(symbol: Symbol) -> Symbol {
    if symbol.source.contains("libc.") {
        Symbol { source: LIBC_SOURCE.to_string(), ..symbol }
    } else {
        symbol
    }
}

/// Remove `prefix` from the start of the symbol's source, if present.
#[must_use]
pub fn strip_source_prefix(symbol: Symbol, prefix: &str) -> Symbol {
    match symbol.source.strip_prefix(prefix) {
        Some(rest) => Symbol { source: rest.to_string(), ..symbol },
        None => symbol,
    }
}
