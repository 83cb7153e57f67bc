//! Symbol table export
//!
//! Writes the parsed and filtered symbols, with an optional ranked group
//! summary, as JSON for scripts and other viewers.

pub mod json_report;

pub use json_report::{JsonReportExporter, LoadedReport};
