//! Parse/serialize round trips and the save policy

mod common;

use common::{csv_text, grid};
use gridedit::csv::{parse_table, serialize_table};
use gridedit::table::Table;

fn reparse(table: &Table) -> Table {
    let bytes = serialize_table(table).unwrap();
    parse_table(std::str::from_utf8(&bytes).unwrap()).unwrap()
}

#[test]
fn test_roundtrip_keeps_non_blank_rows_trimmed() {
    let source = csv_text(
        &["sku", "qty", "note"],
        &[
            &["A-1", " 10 ", "fresh"],
            &[" ", "", "  "],
            &["B-2", "4", ""],
        ],
    );
    let table = parse_table(&source).unwrap();
    assert_eq!(table.row_count(), 3);

    let back = reparse(&table);
    assert_eq!(back.row_count(), 2);
    assert_eq!(back.row(0).unwrap(), &["A-1", "10", "fresh"]);
    assert_eq!(back.row(1).unwrap(), &["B-2", "4", ""]);
}

#[test]
fn test_roundtrip_quoted_content() {
    let table = grid(&[&["semi;colon", "quote\"d", "multi\nline"]]);
    let back = reparse(&table);
    assert_eq!(back, table);
}

#[test]
fn test_serialize_is_lf_only() {
    let table = parse_table("a;b\r\n1;2\r\n").unwrap();
    let bytes = serialize_table(&table).unwrap();
    assert!(!bytes.contains(&b'\r'));
    assert_eq!(bytes, b"a;b\n1;2\n");
}

#[test]
fn test_all_blank_table_serializes_header_only() {
    let table = grid(&[&["", " "], &["\t", ""]]);
    assert_eq!(serialize_table(&table).unwrap(), b"c0;c1\n");
}

#[test]
fn test_header_not_trimmed_or_dropped() {
    let table = parse_table(" id ;name\n1;x\n").unwrap();
    let bytes = serialize_table(&table).unwrap();
    assert!(bytes.starts_with(b" id ;name\n"));
}
