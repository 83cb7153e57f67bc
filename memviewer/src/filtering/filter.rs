//! Field predicates over symbol records.
//!
//! A filter is written on the command line as `FIELD,OPERATOR,VALUE`, for
//! example `source,startswith,drivers/` or `section,equals,bss`. The operator
//! name is resolved once, when the filter is parsed; an unknown name
//! is a configuration error, never a runtime lookup.

use log::debug;
use std::fmt;
use std::str::FromStr;

use super::transform::{normalize_libc, strip_source_prefix};
use crate::domain::{FilterError, Symbol, SymbolField};

/// String comparison applied between a field and the filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
}

impl FilterOp {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Equals => "equals",
            FilterOp::Contains => "contains",
            FilterOp::StartsWith => "startswith",
            FilterOp::EndsWith => "endswith",
        }
    }

    /// Does `field_value` satisfy this operator against `value`?
    #[must_use]
    pub fn matches(self, field_value: &str, value: &str) -> bool {
        match self {
            FilterOp::Equals => field_value == value,
            FilterOp::Contains => field_value.contains(value),
            FilterOp::StartsWith => field_value.starts_with(value),
            FilterOp::EndsWith => field_value.ends_with(value),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(FilterOp::Equals),
            "contains" => Ok(FilterOp::Contains),
            "startswith" => Ok(FilterOp::StartsWith),
            "endswith" => Ok(FilterOp::EndsWith),
            _ => Err(FilterError::UnknownOperator(s.to_string())),
        }
    }
}

/// One `FIELD,OPERATOR,VALUE` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub field: SymbolField,
    pub op: FilterOp,
    pub value: String,
}

impl FilterSpec {
    #[must_use]
    pub fn new(field: SymbolField, op: FilterOp, value: impl Into<String>) -> Self {
        Self { field, op, value: value.into() }
    }

    /// Check one symbol.
    ///
    /// `size` is matched on its decimal text, except that `equals` compares
    /// numerically when the value parses as a decimal or `0x` hex integer.
    #[must_use]
    pub fn matches(&self, symbol: &Symbol) -> bool {
        if self.field == SymbolField::Size && self.op == FilterOp::Equals {
            if let Some(size) = parse_size(&self.value) {
                return symbol.size == size;
            }
        }
        self.op.matches(&symbol.field_text(self.field), &self.value)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.field, self.op, self.value)
    }
}

impl FromStr for FilterSpec {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [field, op, value] = parts.as_slice() else {
            return Err(FilterError::InvalidSpec(s.to_string()));
        };
        Ok(Self { field: field.parse()?, op: op.parse()?, value: (*value).to_string() })
    }
}

fn parse_size(value: &str) -> Option<u64> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

/// The full post-parse pipeline, applied in this order:
///
/// 1. every [`FilterSpec`], in command-line order
/// 2. the address prefix
/// 3. the `libc.` source rewrite
/// 4. the source prefix strip
#[derive(Debug, Clone, Default)]
pub struct SymbolFilter {
    pub specs: Vec<FilterSpec>,
    pub address_prefix: Option<String>,
    pub source_prefix: Option<String>,
}

impl SymbolFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_spec(mut self, spec: FilterSpec) -> Self {
        self.specs.push(spec);
        self
    }

    #[must_use]
    pub fn with_address_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.address_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_source_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.source_prefix = Some(prefix.into());
        self
    }

    /// Does `symbol` pass every predicate of the pipeline?
    #[must_use]
    pub fn keeps(&self, symbol: &Symbol) -> bool {
        self.specs.iter().all(|spec| spec.matches(symbol))
            && self.address_prefix.as_deref().is_none_or(|prefix| symbol.addr.starts_with(prefix))
    }

    /// Run the pipeline and return new records; `symbols` is left untouched.
    #[must_use]
    pub fn apply(&self, symbols: &[Symbol]) -> Vec<Symbol> {
        let result: Vec<Symbol> = symbols
            .iter()
            .filter(|symbol| self.keeps(symbol))
            .cloned()
            .map(normalize_libc)
            .map(|symbol| match &self.source_prefix {
                Some(prefix) => strip_source_prefix(symbol, prefix),
                None => symbol,
            })
            .collect();
        debug!("Filter kept {} of {} symbols", result.len(), symbols.len());
        result
    }
}
