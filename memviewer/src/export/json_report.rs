use log::info;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::analysis::{summarize_by, total_size, SizeGroup};
use crate::domain::{ExportError, Symbol, SymbolField};

/// On-disk layout of an exported symbol table.
#[derive(Debug, Serialize)]
struct SymbolReport<'a> {
    total_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    groupby: Option<SymbolField>,
    groups: Vec<SizeGroup>,
    symbols: &'a [Symbol],
}

/// Owned form of an exported report, for reading one back.
#[derive(Debug, Deserialize)]
pub struct LoadedReport {
    pub total_size: u64,
    #[serde(default)]
    pub groupby: Option<SymbolField>,
    pub symbols: Vec<Symbol>,
}

/// Writes the filtered symbol table, plus a ranked group summary, as JSON.
pub struct JsonReportExporter<'a> {
    symbols: &'a [Symbol],
    groupby: Option<SymbolField>,
}

impl<'a> JsonReportExporter<'a> {
    #[must_use]
    pub fn new(symbols: &'a [Symbol]) -> Self {
        Self { symbols, groupby: None }
    }

    /// Include a `summarize_by(field)` ranking in the `groups` array.
    #[must_use]
    pub fn with_groupby(mut self, field: Option<SymbolField>) -> Self {
        self.groupby = field;
        self
    }

    /// Serialize the report to `writer` (pretty printed).
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        let report = SymbolReport {
            total_size: total_size(self.symbols),
            groupby: self.groupby,
            groups: self.groupby.map(|field| summarize_by(field, self.symbols)).unwrap_or_default(),
            symbols: self.symbols,
        };
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
        writer.flush()?;
        info!("Exported {} symbols ({} groups)", self.symbols.len(), report.groups.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols() -> Vec<Symbol> {
        vec![
            Symbol {
                section: "text".to_string(),
                name: "main".to_string(),
                addr: "0x08000234".to_string(),
                size: 72,
                source: "obj/main".to_string(),
            },
            Symbol {
                section: "bss".to_string(),
                name: "rx_buf".to_string(),
                addr: "0x20000000".to_string(),
                size: 256,
                source: "obj/uart".to_string(),
            },
        ]
    }

    #[test]
    fn test_export_creates_valid_json() {
        let symbols = symbols();
        let mut buffer = Vec::new();
        JsonReportExporter::new(&symbols)
            .with_groupby(Some(SymbolField::Section))
            .export(&mut buffer)
            .expect("Failed to export report");

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).expect("Invalid JSON");
        assert_eq!(parsed["total_size"], 328);
        assert_eq!(parsed["groupby"], "section");
        assert_eq!(parsed["groups"][0]["key"], "bss");
        assert_eq!(parsed["symbols"][0]["addr"], "0x08000234");
        assert_eq!(parsed["symbols"][1]["size"], 256);
    }

    #[test]
    fn test_export_without_groupby_has_empty_groups() {
        let symbols = symbols();
        let mut buffer = Vec::new();
        JsonReportExporter::new(&symbols).export(&mut buffer).unwrap();

        let report: LoadedReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(report.groupby, None);
        assert_eq!(report.symbols, symbols);
        assert_eq!(report.total_size, 328);

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["groups"].as_array().map(Vec::len), Some(0));
    }
}
