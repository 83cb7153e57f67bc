//! # memviewer - Symbol Size Viewer for Linker Map Files
//!
//! memviewer reads the map report a GNU-style linker writes (`ld -Map=FILE`)
//! and shows how much memory every placed symbol takes, grouped by section,
//! object file or name.
//!
//! ## Architecture Overview
//!
//! ```text
//! firmware.map
//!      │
//!      ▼
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │  Preflight  │──▶│   Parsing   │──▶│  Filtering  │──▶│  Analysis   │
//! │ (.map only) │   │ (MapParser) │   │(SymbolFilter│   │ (group_by,  │
//! └─────────────┘   └─────────────┘   │ + rewrites) │   │summarize_by)│
//!                                     └─────────────┘   └──────┬──────┘
//!                                                              │
//!                         ┌────────────────────┬───────────────┴────┐
//!                         ▼                    ▼                    ▼
//!                   ┌───────────┐        ┌───────────┐        ┌───────────┐
//!                   │    TUI    │        │  Report   │        │  Export   │
//!                   │ (viewer)  │        │(headless) │        │  (JSON)   │
//!                   └───────────┘        └───────────┘        └───────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`]: the linker map state machine. Produces [`domain::Symbol`]
//!   records in report order and never mutates them afterwards.
//! - [`filtering`]: `FIELD,OPERATOR,VALUE` predicates, the address prefix
//!   filter and the pure source rewrites (`libc.` folding, prefix strip).
//! - [`analysis`]: nested grouping and ranked size summaries.
//! - [`export`]: JSON export of the filtered table and group summary.
//! - [`report`]: plain text ranking for `--headless`.
//! - [`tui`]: interactive ranked viewer with drill-down and search.
//! - [`preflight`]: rejects inputs that are not map files before parsing.
//! - [`cli`]: command-line argument parsing.
//! - [`domain`]: the symbol record, field names and error types.
//!
//! ## Typical Usage
//!
//! ```bash
//! # Browse the largest symbols
//! memviewer build/firmware.map
//!
//! # Object files by size, as text
//! memviewer build/firmware.map --headless -g source --filename-prefix build/
//!
//! # Flash only, exported for scripts
//! memviewer build/firmware.map --address-prefix 0x0800 --export flash.json
//! ```

pub mod analysis;
pub mod cli;
pub mod domain;
pub mod export;
pub mod filtering;
pub mod parsing;
pub mod preflight;
pub mod report;
pub mod tui;
