//! Domain types for parsed linker map symbols
//!
//! A [`Symbol`] is produced exactly once by the parser and never mutated
//! afterwards. Downstream passes (filters, prefix stripping) build new
//! records instead of editing shared ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::FilterError;

/// One placed, sized symbol from a linker map report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// Section name taken from the dotted prefix (`text` for `.text.main`).
    /// Empty when the raw name had no section part.
    pub section: String,

    /// Symbol name without its section prefix.
    pub name: String,

    /// Address exactly as printed in the report (`0x...`).
    ///
    /// Kept as text so that prefix queries (`--address-prefix 0x0800`)
    /// work on the printed form.
    pub addr: String,

    /// Size in bytes. Always greater than zero.
    pub size: u64,

    /// Originating object or archive member, `.o`/`.obj` suffix removed.
    pub source: String,
}

impl Symbol {
    /// Read one field as text, the way filters and grouping see it.
    ///
    /// `size` is rendered in decimal.
    #[must_use]
    pub fn field_text(&self, field: SymbolField) -> String {
        match field {
            SymbolField::Section => self.section.clone(),
            SymbolField::Name => self.name.clone(),
            SymbolField::Addr => self.addr.clone(),
            SymbolField::Size => self.size.to_string(),
            SymbolField::Source => self.source.clone(),
        }
    }

    /// Human readable name, demangling Rust symbols when possible.
    #[must_use]
    pub fn display_name(&self) -> String {
        match rustc_demangle::try_demangle(&self.name) {
            Ok(demangled) => format!("{demangled:#}"),
            Err(_) => self.name.clone(),
        }
    }
}

/// The named fields of a [`Symbol`], used by filters and grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolField {
    Section,
    Name,
    Addr,
    Size,
    Source,
}

impl SymbolField {
    /// Every field, in display order.
    pub const ALL: [SymbolField; 5] = [
        SymbolField::Section,
        SymbolField::Name,
        SymbolField::Addr,
        SymbolField::Size,
        SymbolField::Source,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolField::Section => "section",
            SymbolField::Name => "name",
            SymbolField::Addr => "addr",
            SymbolField::Size => "size",
            SymbolField::Source => "source",
        }
    }
}

impl fmt::Display for SymbolField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymbolField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FilterError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str) -> Symbol {
        Symbol {
            section: "text".to_string(),
            name: name.to_string(),
            addr: "0x08000234".to_string(),
            size: 72,
            source: "obj/main".to_string(),
        }
    }

    #[test]
    fn test_field_text_renders_size_in_decimal() {
        let sym = symbol("main");
        assert_eq!(sym.field_text(SymbolField::Size), "72");
        assert_eq!(sym.field_text(SymbolField::Addr), "0x08000234");
        assert_eq!(sym.field_text(SymbolField::Section), "text");
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("source".parse::<SymbolField>().unwrap(), SymbolField::Source);
        assert_eq!("addr".parse::<SymbolField>().unwrap(), SymbolField::Addr);
        assert!(matches!("file".parse::<SymbolField>(), Err(FilterError::UnknownField(f)) if f == "file"));
    }

    #[test]
    fn test_display_name_demangles_rust_symbols() {
        let sym = symbol("_ZN4core3fmt5write17h0123456789abcdefE");
        assert_eq!(sym.display_name(), "core::fmt::write");
    }

    #[test]
    fn test_display_name_keeps_c_symbols() {
        let sym = symbol("SystemClock_Config");
        assert_eq!(sym.display_name(), "SystemClock_Config");
    }
}
