//! Structured error types for memviewer
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading a linker map report.
///
/// Every variant except [`MapParseError::Io`] means the input does not match
/// the map dialect the parser understands. Those abort the whole parse and
/// no partial symbol table is returned.
#[derive(Error, Debug)]
pub enum MapParseError {
    #[error("line {line_no}: expected 1 or 4 fields in section line, found {count}: {line:?}")]
    UnexpectedFieldCount { line_no: usize, count: usize, line: String },

    #[error("line {line_no}: expected address, size and source, found {count} fields: {line:?}")]
    MalformedContinuation { line_no: usize, count: usize, line: String },

    #[error("symbol {name:?} at line {line_no} has no address line before end of input")]
    MissingContinuation { name: String, line_no: usize },

    #[error("line {line_no}: invalid hex size {value:?}")]
    InvalidSize {
        line_no: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line_no}: address {value:?} does not start with 0x")]
    InvalidAddress { line_no: usize, value: String },

    #[error("line {line_no}: symbol name {name:?} has no name part")]
    MalformedName { line_no: usize, name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MapParseError {
    /// True for errors caused by the report's content rather than by I/O.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        !matches!(self, MapParseError::Io(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid filter specification {0:?}, expected FIELD,OPERATOR,VALUE")]
    InvalidSpec(String),

    #[error("invalid filter operator {0:?}, expected one of equals, contains, startswith, endswith")]
    UnknownOperator(String),

    #[error("unknown symbol field {0:?}, expected one of section, name, addr, size, source")]
    UnknownField(String),
}

/// The input was rejected before parsing.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("{}: unsupported input, expected a linker .map file", path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("{}: ELF files are not yet supported, pass the linker .map file instead", path.display())]
    ObjectFileNotSupported { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
