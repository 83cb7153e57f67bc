//! Size aggregation over symbol records.
//!
//! # Architecture
//!
//! - **`group_by()`** - Nested grouping by one or more fields, keys in order
//!   of first appearance
//! - **`summarize_by()`** - One level of grouping reduced to totals, largest
//!   first, for ranking views and reports
//!
//! ```text
//! [Symbol] ──► group_by([source, section]) ──► GroupNode (tree)
//!     │
//!     └──────► summarize_by(source) ──────────► [SizeGroup] (ranked)
//! ```

// Percentage calculations intentionally convert u64 to f64
#![allow(clippy::cast_precision_loss)]

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::{Symbol, SymbolField};

/// One key of a grouping level with its aggregated size.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Field value shared by every symbol below this group.
    pub key: String,
    /// Sum of `size` over the group.
    pub size: u64,
    /// Number of symbols in the group.
    pub count: usize,
    /// Next grouping level, or the symbols themselves.
    pub node: GroupNode,
}

/// A level of a nested grouping.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupNode {
    /// No fields left to group by.
    Leaf(Vec<Symbol>),
    /// Groups keyed by the next field.
    Branch(Vec<Group>),
}

impl GroupNode {
    /// Total size of everything below this node.
    #[must_use]
    pub fn size(&self) -> u64 {
        match self {
            GroupNode::Leaf(symbols) => total_size(symbols),
            GroupNode::Branch(groups) => groups.iter().map(|g| g.size).sum(),
        }
    }

    /// Look up a direct child group by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Group> {
        match self {
            GroupNode::Leaf(_) => None,
            GroupNode::Branch(groups) => groups.iter().find(|g| g.key == key),
        }
    }
}

/// Group `symbols` by `fields`, outermost first.
///
/// Keys keep the order in which they first appear, and symbols keep their
/// input order inside each group.
#[must_use]
pub fn group_by(fields: &[SymbolField], symbols: &[Symbol]) -> GroupNode {
    let Some((&field, rest)) = fields.split_first() else {
        return GroupNode::Leaf(symbols.to_vec());
    };

    let mut buckets: IndexMap<String, Vec<Symbol>> = IndexMap::new();
    for symbol in symbols {
        buckets.entry(symbol.field_text(field)).or_default().push(symbol.clone());
    }

    GroupNode::Branch(
        buckets
            .into_iter()
            .map(|(key, members)| Group {
                key,
                size: total_size(&members),
                count: members.len(),
                node: group_by(rest, &members),
            })
            .collect(),
    )
}

/// Ranked size summary entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeGroup {
    /// Group key (or `source|name` for per-symbol summaries).
    pub key: String,
    /// Total bytes.
    pub size: u64,
    /// Number of symbols.
    pub count: usize,
    /// Share of the grand total (0.0 - 100.0).
    pub percentage: f64,
}

/// Sum of all symbol sizes.
#[must_use]
pub fn total_size(symbols: &[Symbol]) -> u64 {
    symbols.iter().map(|s| s.size).sum()
}

fn percentage_of(size: u64, total: u64) -> f64 {
    if total > 0 {
        (size as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Total size per value of `field`, largest first.
///
/// Groups of equal size keep their first-appearance order.
#[must_use]
pub fn summarize_by(field: SymbolField, symbols: &[Symbol]) -> Vec<SizeGroup> {
    let total = total_size(symbols);
    let GroupNode::Branch(groups) = group_by(&[field], symbols) else {
        return Vec::new();
    };

    let mut summary: Vec<SizeGroup> = groups
        .into_iter()
        .map(|g| SizeGroup {
            percentage: percentage_of(g.size, total),
            key: g.key,
            size: g.size,
            count: g.count,
        })
        .collect();
    summary.sort_by_key(|g| std::cmp::Reverse(g.size));
    summary
}

/// One entry per symbol, labelled `source|name`, largest first.
#[must_use]
pub fn summarize_symbols(symbols: &[Symbol]) -> Vec<SizeGroup> {
    let total = total_size(symbols);
    let mut summary: Vec<SizeGroup> = symbols
        .iter()
        .map(|s| SizeGroup {
            key: format!("{}|{}", s.source, s.name),
            size: s.size,
            count: 1,
            percentage: percentage_of(s.size, total),
        })
        .collect();
    summary.sort_by_key(|g| std::cmp::Reverse(g.size));
    summary
}
