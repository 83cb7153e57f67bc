//! Filtering and rewriting of parsed symbols
//!
//! Pure passes over the parser's output. Nothing here mutates a record in
//! place; every pass builds the records it returns.

pub mod filter;
pub mod transform;

pub use filter::{FilterOp, FilterSpec, SymbolFilter};
pub use transform::{normalize_libc, strip_source_prefix, LIBC_SOURCE};
