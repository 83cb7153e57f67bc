//! # Linker Map Parsing
//!
//! Reads the textual map report that GNU ld writes with `-Map=<file>` and
//! turns it into [`Symbol`](crate::domain::Symbol) records.
//!
//! ## The Map Format
//!
//! There is no formal grammar. The parser relies on a handful of markers:
//!
//! - `Linker script and memory map` starts the part we read. Everything above
//!   it (memory configuration, discarded input sections) is skipped.
//! - Input section lines start with exactly one space and a dot. With
//!   `-ffunction-sections -fdata-sections` each of them is one symbol:
//!   `.text.<function>`, `.data.<variable>`, `.bss.<variable>`.
//! - A name too long for its column is printed alone and the address, size
//!   and object file follow on the next line.
//! - The first `.debug_info` line ends the map proper.
//!
//! ## State Machine
//!
//! ```text
//!            header line                 1 field
//! Preamble ─────────────▶ SectionLine ───────────▶ Continuation
//!                            │  ▲  ◀───────────────────┘
//!                   4 fields │  │        3 fields
//!                            └──┘
//! ```
//!
//! Any other field count is a format error and aborts the parse. So does
//! reaching the end of input while in `Continuation`.
//!
//! ## Record Assembly
//!
//! - `.text.main` splits into section `text` and name `main`
//! - sizes are hex and zero-size entries are dropped
//! - `.o`/`.obj` suffixes are removed from the source path
//! - addresses stay as printed

pub mod ld_map;

pub use ld_map::{
    parse_ld_map, parse_ld_map_file_with, parse_ld_map_reader, parse_ld_map_with,
    strip_object_suffix, MapParser, ParseOptions,
};
