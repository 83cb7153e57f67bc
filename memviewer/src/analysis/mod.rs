//! Analysis over parsed symbols
//!
//! This module contains pure aggregation logic (grouping, totals, rankings),
//! separated from the TUI presentation layer.

pub mod grouping;

pub use grouping::{
    group_by, summarize_by, summarize_symbols, total_size, Group, GroupNode, SizeGroup,
};
