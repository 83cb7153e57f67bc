//! # memviewer - Main Entry Point
//!
//! Supports two operational modes:
//! - **Viewer** (`memviewer firmware.map`): Interactive ranked size viewer
//! - **Headless** (`--headless`): Plain text size report on stdout
//!
//! Either mode can also write the symbol table as JSON with `--export FILE`.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter};

use memviewer::cli::Args;
use memviewer::domain::{InputError, MapParseError};
use memviewer::export::JsonReportExporter;
use memviewer::parsing::parse_ld_map_file_with;
use memviewer::preflight::check_input;
use memviewer::report::write_report;
use memviewer::tui::App;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_DATAERR: i32 = 65;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.is::<InputError>() {
        EXIT_USAGE
    } else if err.downcast_ref::<MapParseError>().is_some_and(MapParseError::is_format_error) {
        EXIT_DATAERR
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let quiet = args.quiet;

    check_input(&args.source)?;

    let parsed = parse_ld_map_file_with(&args.source, args.parse_options())
        .with_context(|| format!("Failed to parse {}", args.source.display()))?;
    let symbols = args.symbol_filter().apply(&parsed);
    info!("{} of {} symbols left after filtering", symbols.len(), parsed.len());

    if !quiet {
        eprintln!("memviewer v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("source: {}", args.source.display());
        eprintln!("symbols: {} of {}", symbols.len(), parsed.len());
    }

    if symbols.is_empty() {
        println!("No matching symbols");
        return Ok(());
    }

    if let Some(ref export_path) = args.export {
        let file = File::create(export_path)
            .with_context(|| format!("Failed to create {}", export_path.display()))?;
        JsonReportExporter::new(&symbols)
            .with_groupby(args.groupby)
            .export(BufWriter::new(file))
            .context("Failed to export symbol table")?;

        if !quiet {
            eprintln!("saved: {}", export_path.display());
        }
    }

    if args.headless {
        write_report(io::stdout().lock(), &symbols, args.groupby, args.top)
            .context("Failed to write report")?;
        return Ok(());
    }

    let title = args
        .source
        .file_name()
        .map_or_else(|| args.source.display().to_string(), |n| n.to_string_lossy().into_owned());
    App::new(symbols, args.groupby).with_title(title).run().context("Viewer failed")?;

    Ok(())
}
