use std::io::{BufReader, Cursor, Write};
use std::path::PathBuf;

use memviewer::analysis::total_size;
use memviewer::domain::{MapParseError, Symbol};
use memviewer::parsing::{parse_ld_map, parse_ld_map_file_with, parse_ld_map_reader, ParseOptions};
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn find<'a>(symbols: &'a [Symbol], name: &str) -> Option<&'a Symbol> {
    symbols.iter().find(|s| s.name == name)
}

fn map_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(text.as_bytes()).expect("Failed to write temp file");
    file
}

#[test]
fn test_example_01() {
    let symbols = parse_ld_map(fixture("example_01.map")).expect("Failed to parse example_01.map");
    assert_eq!(symbols.len(), 24);
    assert_eq!(total_size(&symbols), 2544);
    assert!(symbols.iter().all(|s| s.size > 0), "zero-size entries must be dropped");
}

#[test]
fn test_example_01_keeps_report_order() {
    let symbols = parse_ld_map(fixture("example_01.map")).unwrap();
    let first = &symbols[0];
    assert_eq!(first.section, "");
    assert_eq!(first.name, "isr_vector");
    assert_eq!(first.addr, "0x08000000");
    assert_eq!(first.size, 0x188);
    assert_eq!(first.source, "obj/startup/startup_stm32");

    let last = symbols.last().unwrap();
    assert_eq!((last.section.as_str(), last.name.as_str()), ("ARM", "attributes"));
    assert_eq!(last.size, 0x22);
}

#[test]
fn test_example_01_ignores_discarded_sections() {
    let symbols = parse_ld_map(fixture("example_01.map")).unwrap();
    assert!(find(&symbols, "unused_helper").is_none());
    assert!(find(&symbols, "uart_deinit").is_none());
    // Zero-size input sections and linker stubs
    assert!(find(&symbols, "ticks").is_none());
    assert!(symbols.iter().all(|s| s.source != "linker stubs"));
}

#[test]
fn test_example_01_record_forms() {
    let symbols = parse_ld_map(fixture("example_01.map")).unwrap();

    // Name and address on separate lines
    let uart_init = find(&symbols, "uart_init").expect("uart_init");
    assert_eq!(uart_init.section, "text");
    assert_eq!(uart_init.addr, "0x0800022c");
    assert_eq!(uart_init.size, 100);
    assert_eq!(uart_init.source, "obj/drivers/uart");

    // Everything on one line
    let rx_buf = find(&symbols, "rx_buf").expect("rx_buf");
    assert_eq!(rx_buf.section, "bss");
    assert_eq!(rx_buf.size, 256);

    // Only the first dot after the section splits
    assert!(find(&symbols, "startup.main_loop").is_some());
    assert!(find(&symbols, "str1.4").is_some());

    // Archive members keep their full path
    let memset = find(&symbols, "memset").expect("memset");
    assert!(memset.source.ends_with("libc.a(libc_a-memset.o)"), "got {}", memset.source);
}

#[test]
fn test_example_01_rust_symbol_demangles() {
    let symbols = parse_ld_map(fixture("example_01.map")).unwrap();
    let write = symbols.iter().find(|s| s.size == 0x4a8).expect("core::fmt::write");
    assert_eq!(write.name, "_ZN4core3fmt5write17h9a1c8f2e4b6d0a13E");
    assert_eq!(write.display_name(), "core::fmt::write");
}

#[test]
fn test_content_after_debug_info_is_ignored() {
    let text = std::fs::read_to_string(fixture("example_01.map")).unwrap();
    let cut = text.find("\n.debug_info").expect("fixture has .debug_info");
    let truncated = &text[..=cut];
    let with_garbage = format!("{truncated}.debug_info\n 1 2\n totally broken line here\n");

    let from_truncated = parse_ld_map_reader(Cursor::new(truncated)).unwrap();
    let from_full = parse_ld_map_reader(Cursor::new(text.as_str())).unwrap();
    let from_garbage = parse_ld_map_reader(Cursor::new(with_garbage)).unwrap();
    assert_eq!(from_truncated, from_full);
    assert_eq!(from_garbage, from_full);
}

#[test]
fn test_reader_and_path_agree() {
    let file = std::fs::File::open(fixture("example_01.map")).unwrap();
    let from_reader = parse_ld_map_reader(BufReader::new(file)).unwrap();
    let from_path = parse_ld_map(fixture("example_01.map")).unwrap();
    assert_eq!(from_reader, from_path);
}

#[test]
fn test_strict_names_accepts_example_01() {
    let strict = ParseOptions { strict_names: true };
    let symbols = parse_ld_map_file_with(fixture("example_01.map"), strict).unwrap();
    assert_eq!(symbols.len(), 24);
}

#[test]
fn test_two_field_line_aborts_whole_parse() {
    let file = map_file(
        "Linker script and memory map\n\
         \x20.text.ok      0x1000      0x10 ok.o\n\
         \x20.text.bad     0x1010\n\
         \x20.text.later   0x1020      0x10 later.o\n",
    );
    let err = parse_ld_map(file.path()).unwrap_err();
    assert!(err.is_format_error());
    match err {
        MapParseError::UnexpectedFieldCount { line_no, count, .. } => {
            assert_eq!(line_no, 3);
            assert_eq!(count, 2);
        }
        other => panic!("expected UnexpectedFieldCount, got {other:?}"),
    }
}

#[test]
fn test_name_without_address_line_is_an_error() {
    let file = map_file("Linker script and memory map\n .text.dangling\n");
    let err = parse_ld_map(file.path()).unwrap_err();
    assert!(
        matches!(err, MapParseError::MissingContinuation { ref name, line_no: 2 } if name == ".text.dangling"),
        "got {err:?}"
    );
}

#[test]
fn test_map_without_header_is_empty() {
    let file = map_file(" .text.main  0x1000  0x20 main.o\n");
    assert_eq!(parse_ld_map(file.path()).unwrap(), Vec::new());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = parse_ld_map(fixture("does_not_exist.map")).unwrap_err();
    assert!(matches!(err, MapParseError::Io(_)));
    assert!(!err.is_format_error());
}
