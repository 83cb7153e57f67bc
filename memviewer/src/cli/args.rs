//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::domain::SymbolField;
use crate::filtering::{FilterSpec, SymbolFilter};
use crate::parsing::ParseOptions;

#[derive(Parser, Debug)]
#[command(
    name = "memviewer",
    version,
    about = "View the memory used by each symbol of a linked program",
    after_help = "\
FIELDS:     section, name, addr, size, source
OPERATORS:  equals, contains, startswith, endswith

EXAMPLES:
    memviewer firmware.map                              Browse sizes by symbol
    memviewer firmware.map -g source                    Browse sizes by object file
    memviewer firmware.map -f section,equals,bss        Only .bss symbols
    memviewer firmware.map --address-prefix 0x0800      Only symbols in flash
    memviewer firmware.map --headless -g section        Print a size report"
)]
pub struct Args {
    /// Linker map file (ld -Map=FILE)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Strip this prefix from every source path
    #[arg(long, value_name = "PREFIX")]
    pub filename_prefix: Option<String>,

    /// Only keep symbols whose address starts with PREFIX
    #[arg(long, value_name = "PREFIX")]
    pub address_prefix: Option<String>,

    /// Keep symbols matching FIELD,OPERATOR,VALUE (repeatable)
    #[arg(short, long = "filter", value_name = "FIELD,OPERATOR,VALUE")]
    pub filters: Vec<FilterSpec>,

    /// Group sizes by this field
    #[arg(short, long, value_name = "FIELD")]
    pub groupby: Option<SymbolField>,

    /// Fail on symbol names with an empty name part, like `.text.`
    #[arg(long)]
    pub strict: bool,

    /// Write the symbol table and group summary as JSON
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Print a size report instead of starting the viewer
    #[arg(long)]
    pub headless: bool,

    /// Rows in the headless report
    #[arg(long, value_name = "N", default_value = "20")]
    pub top: usize,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parser options selected on the command line.
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions { strict_names: self.strict }
    }

    /// The filter pipeline selected on the command line.
    #[must_use]
    pub fn symbol_filter(&self) -> SymbolFilter {
        let mut filter =
            self.filters.iter().cloned().fold(SymbolFilter::new(), SymbolFilter::with_spec);
        if let Some(prefix) = &self.address_prefix {
            filter = filter.with_address_prefix(prefix.clone());
        }
        if let Some(prefix) = &self.filename_prefix {
            filter = filter.with_source_prefix(prefix.clone());
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::FilterOp;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("memviewer").chain(args.iter().copied()))
    }

    #[test]
    fn test_minimal_args() {
        let args = parse(&["firmware.map"]).unwrap();
        assert_eq!(args.source, PathBuf::from("firmware.map"));
        assert!(args.filters.is_empty());
        assert_eq!(args.groupby, None);
        assert_eq!(args.top, 20);
        assert!(!args.strict);
        assert!(!args.headless);
    }

    #[test]
    fn test_repeated_filters_keep_order() {
        let args = parse(&[
            "firmware.map",
            "-f",
            "section,equals,text",
            "--filter",
            "source,startswith,obj/",
        ])
        .unwrap();
        assert_eq!(
            args.filters,
            vec![
                FilterSpec::new(SymbolField::Section, FilterOp::Equals, "text"),
                FilterSpec::new(SymbolField::Source, FilterOp::StartsWith, "obj/"),
            ]
        );
    }

    #[test]
    fn test_unknown_operator_is_rejected_at_parse_time() {
        let err = parse(&["firmware.map", "-f", "name,matches,main"]).unwrap_err();
        assert!(err.to_string().contains("invalid filter operator"), "got: {err}");
    }

    #[test]
    fn test_unknown_groupby_field_is_rejected() {
        assert!(parse(&["firmware.map", "-g", "flavour"]).is_err());
        let args = parse(&["firmware.map", "-g", "source"]).unwrap();
        assert_eq!(args.groupby, Some(SymbolField::Source));
    }

    #[test]
    fn test_symbol_filter_built_from_args() {
        let args = parse(&[
            "firmware.map",
            "--address-prefix",
            "0x0800",
            "--filename-prefix",
            "build/",
            "-f",
            "size,equals,0x20",
        ])
        .unwrap();
        let filter = args.symbol_filter();
        assert_eq!(filter.specs.len(), 1);
        assert_eq!(filter.address_prefix.as_deref(), Some("0x0800"));
        assert_eq!(filter.source_prefix.as_deref(), Some("build/"));
        assert_eq!(args.parse_options(), ParseOptions { strict_names: false });
    }
}
