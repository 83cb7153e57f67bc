//! Domain model for memviewer
//!
//! This module contains the symbol record and the error types shared by the
//! parser, the filters and the viewers.

pub mod errors;
pub mod types;

pub use types::{Symbol, SymbolField};

pub use errors::{ExportError, FilterError, InputError, MapParseError, TuiError};
