//! GNU ld map report parser
//!
//! Turns the "Linker script and memory map" part of a GNU ld `-Map` report
//! into a list of [`Symbol`] records. Works on maps produced with
//! `-ffunction-sections -fdata-sections`, where every input section line
//! names one symbol:
//!
//! ```text
//! Linker script and memory map            <- header, parsing starts here
//!  .text.main     0x08000234       0x48 obj/main.o
//!  .text.SystemClock_Config               <- name too long, record continues
//!                 0x0800027c       0xa4 obj/main.o
//! .debug_info     0x00000000     0x1f3a   <- parsing stops here
//! ```
//!
//! The input is streamed line by line. Nothing before the header counts.

use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::Path;

use crate::domain::{MapParseError, Symbol};

/// Line that starts the memory map section of the report.
pub const MAP_HEADER: &str = "Linker script and memory map";

/// Prefix of the first debug section. Everything from here on is ignored.
pub const DEBUG_INFO_PREFIX: &str = ".debug_info";

/// Input section lines start with exactly one space and a dot.
const SECTION_LINE_PREFIX: &str = " .";

/// Parser options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject symbol names that do not split into a section and a
    /// non-empty name, such as `.text.` or a lone `.`.
    ///
    /// Off by default: such names produce a record with empty fields,
    /// matching the legacy output.
    pub strict_names: bool,
}

#[derive(Debug)]
enum ParseState {
    /// Before the header line.
    Preamble,
    /// Expecting ` .section.name [addr size source]` lines.
    SectionLine,
    /// The previous line held only a name; this one holds the rest.
    Continuation { name: String, line_no: usize },
    /// `.debug_info` was reached.
    Done,
}

/// Line-at-a-time state machine over a linker map report.
#[derive(Debug)]
pub struct MapParser {
    state: ParseState,
    options: ParseOptions,
    symbols: Vec<Symbol>,
    line_no: usize,
    dropped_zero_size: usize,
}

impl Default for MapParser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl MapParser {
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self {
            state: ParseState::Preamble,
            options,
            symbols: Vec::new(),
            line_no: 0,
            dropped_zero_size: 0,
        }
    }

    /// Feed the next line, without its line terminator.
    ///
    /// Returns `ControlFlow::Break` once the debug sections start; further
    /// lines would be ignored.
    ///
    /// # Errors
    /// Returns a format error when the line does not fit the current state.
    pub fn process_line(&mut self, line: &str) -> Result<ControlFlow<()>, MapParseError> {
        self.line_no += 1;
        let line = line.strip_suffix('\r').unwrap_or(line);

        if matches!(self.state, ParseState::Done) {
            return Ok(ControlFlow::Break(()));
        }
        if matches!(self.state, ParseState::Preamble) && line == MAP_HEADER {
            debug!("Memory map starts at line {}", self.line_no);
            self.state = ParseState::SectionLine;
            return Ok(ControlFlow::Continue(()));
        }

        if line.starts_with(DEBUG_INFO_PREFIX) {
            if let ParseState::Continuation { name, line_no } = &self.state {
                warn!("Symbol {name:?} from line {line_no} has no address line before {DEBUG_INFO_PREFIX}");
            }
            debug!("Reached {DEBUG_INFO_PREFIX} at line {}", self.line_no);
            self.state = ParseState::Done;
            return Ok(ControlFlow::Break(()));
        }

        match std::mem::replace(&mut self.state, ParseState::Done) {
            ParseState::Preamble => self.state = ParseState::Preamble,
            ParseState::SectionLine => {
                self.state = ParseState::SectionLine;
                if line.starts_with(SECTION_LINE_PREFIX) {
                    self.section_line(line)?;
                }
            }
            ParseState::Continuation { name, .. } => {
                self.state = ParseState::SectionLine;
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() != 3 {
                    return Err(MapParseError::MalformedContinuation {
                        line_no: self.line_no,
                        count: fields.len(),
                        line: line.to_string(),
                    });
                }
                self.add_record(&name, fields[0], fields[1], fields[2])?;
            }
            ParseState::Done => {}
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Finish parsing and hand out the records in report order.
    ///
    /// # Errors
    /// Fails if the last section line still waits for its address line.
    pub fn finish(self) -> Result<Vec<Symbol>, MapParseError> {
        match self.state {
            ParseState::Continuation { name, line_no } => {
                Err(MapParseError::MissingContinuation { name, line_no })
            }
            ParseState::Preamble => {
                info!("No \"{MAP_HEADER}\" header found, map has no symbols");
                Ok(self.symbols)
            }
            ParseState::SectionLine | ParseState::Done => {
                info!(
                    "Parsed {} symbols from {} lines ({} zero-size entries dropped)",
                    self.symbols.len(),
                    self.line_no,
                    self.dropped_zero_size
                );
                Ok(self.symbols)
            }
        }
    }

    /// Parse every line of `reader`.
    ///
    /// # Errors
    /// Returns the first read or format error; no partial result.
    pub fn parse<R: BufRead>(mut self, reader: R) -> Result<Vec<Symbol>, MapParseError> {
        for line in reader.lines() {
            if self.process_line(&line?)?.is_break() {
                break;
            }
        }
        self.finish()
    }

    fn section_line(&mut self, line: &str) -> Result<(), MapParseError> {
        let fields = split_fields(line, 4);
        match fields.as_slice() {
            [name] => {
                self.state = ParseState::Continuation {
                    name: (*name).to_string(),
                    line_no: self.line_no,
                };
                Ok(())
            }
            [name, addr, size, source] => self.add_record(name, addr, size, source),
            _ => Err(MapParseError::UnexpectedFieldCount {
                line_no: self.line_no,
                count: fields.len(),
                line: line.to_string(),
            }),
        }
    }

    fn add_record(
        &mut self,
        raw_name: &str,
        addr: &str,
        size: &str,
        source: &str,
    ) -> Result<(), MapParseError> {
        let split = split_symbol_name(raw_name);
        if self.options.strict_names && !matches!(&split, Some((_, name)) if !name.is_empty()) {
            return Err(MapParseError::MalformedName {
                line_no: self.line_no,
                name: raw_name.to_string(),
            });
        }
        let (section, name) = split.unwrap_or_default();

        if !addr.starts_with("0x") {
            return Err(MapParseError::InvalidAddress {
                line_no: self.line_no,
                value: addr.to_string(),
            });
        }

        let digits = size.strip_prefix("0x").or_else(|| size.strip_prefix("0X")).unwrap_or(size);
        let size = u64::from_str_radix(digits, 16).map_err(|source| MapParseError::InvalidSize {
            line_no: self.line_no,
            value: size.to_string(),
            source,
        })?;

        if size == 0 {
            self.dropped_zero_size += 1;
            debug!("Dropping zero-size entry {raw_name} at line {}", self.line_no);
            return Ok(());
        }

        self.symbols.push(Symbol {
            section,
            name,
            addr: addr.to_string(),
            size,
            source: strip_object_suffix(source).to_string(),
        });
        Ok(())
    }
}

/// Split on whitespace into at most `max` fields; the last field keeps the
/// rest of the line, inner spacing included.
fn split_fields(line: &str, max: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(max);
    let mut rest = line.trim();
    while !rest.is_empty() {
        if fields.len() + 1 == max {
            fields.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                fields.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                fields.push(rest);
                break;
            }
        }
    }
    fields
}

/// Split `.section.name` into `(section, name)`.
///
/// At most three dot-separated parts are taken, so `.text.foo.part.0` keeps
/// `foo.part.0` as its name. A leading empty part (the leading dot) is
/// dropped. Two parts give section and name, one part gives a bare name.
/// Anything else is `None`.
fn split_symbol_name(raw: &str) -> Option<(String, String)> {
    let mut parts: Vec<&str> = raw.splitn(3, '.').collect();
    if parts.first() == Some(&"") {
        parts.remove(0);
    }
    match parts.as_slice() {
        [section, name] => Some(((*section).to_string(), (*name).to_string())),
        [name] => Some((String::new(), (*name).to_string())),
        _ => None,
    }
}

/// Remove a trailing `.obj` or `.o` from an object path.
#[must_use]
pub fn strip_object_suffix(source: &str) -> &str {
    source
        .strip_suffix(".obj")
        .or_else(|| source.strip_suffix(".o"))
        .unwrap_or(source)
}

/// Parse a linker map from an open line source with default options.
///
/// # Errors
/// See [`MapParser::parse`].
pub fn parse_ld_map_reader<R: BufRead>(reader: R) -> Result<Vec<Symbol>, MapParseError> {
    parse_ld_map_with(reader, ParseOptions::default())
}

/// Parse a linker map from an open line source.
///
/// # Errors
/// See [`MapParser::parse`].
pub fn parse_ld_map_with<R: BufRead>(
    reader: R,
    options: ParseOptions,
) -> Result<Vec<Symbol>, MapParseError> {
    MapParser::new(options).parse(reader)
}

/// Parse the linker map file at `path` with default options.
///
/// # Errors
/// Returns [`MapParseError::Io`] if the file cannot be opened or read, or a
/// format error if the content is not a supported map.
pub fn parse_ld_map(path: impl AsRef<Path>) -> Result<Vec<Symbol>, MapParseError> {
    parse_ld_map_file_with(path, ParseOptions::default())
}

/// Parse the linker map file at `path`.
///
/// # Errors
/// See [`parse_ld_map`].
pub fn parse_ld_map_file_with(
    path: impl AsRef<Path>,
    options: ParseOptions,
) -> Result<Vec<Symbol>, MapParseError> {
    let file = File::open(path.as_ref())?;
    parse_ld_map_with(BufReader::new(file), options)
}
