//! CSV serialization
//!
//! Save-time policy: every cell is trimmed, rows that are blank after trimming
//! are dropped from the output (the in-memory table keeps them), fields are
//! separated by `;` and lines by `\n` on every platform. Dropped blank rows do
//! not survive a save/reload cycle.

use crate::error::{GridError, Result};
use crate::table::Table;

use super::parser::DELIMITER;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Options controlling the serialized byte stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Prefix the payload with a UTF-8 byte order mark
    pub bom: bool,
}

/// Serialize a table with default options
pub fn serialize_table(table: &Table) -> Result<Vec<u8>> {
    serialize_table_with(table, WriteOptions::default())
}

/// Serialize a table to `;`-delimited, `\n`-terminated UTF-8 bytes
pub fn serialize_table_with(table: &Table, options: WriteOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    if options.bom {
        out.extend_from_slice(UTF8_BOM);
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(out);

    writer
        .write_record(table.column_names())
        .map_err(write_error)?;

    let mut dropped = 0usize;
    for row in table.rows() {
        if is_blank_row(row) {
            dropped += 1;
            continue;
        }
        writer
            .write_record(row.iter().map(|cell| cell.trim()))
            .map_err(write_error)?;
    }

    if dropped > 0 {
        tracing::debug!(dropped, "skipped blank rows while serializing");
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| GridError::Io(std::io::Error::other(e.to_string())))
}

/// A row whose every cell is empty or whitespace
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn write_error(err: csv::Error) -> GridError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => GridError::Io(io),
        other => GridError::schema(format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_table;

    fn to_string(table: &Table) -> String {
        String::from_utf8(serialize_table(table).unwrap()).unwrap()
    }

    #[test]
    fn test_serialize_simple() {
        let table = parse_table("sku;qty\nA-1;10\n").unwrap();
        assert_eq!(to_string(&table), "sku;qty\nA-1;10\n");
    }

    #[test]
    fn test_serialize_trims_cells() {
        let table = parse_table("a;b\n  x ;\ty\n").unwrap();
        assert_eq!(to_string(&table), "a;b\nx;y\n");
    }

    #[test]
    fn test_serialize_drops_blank_rows() {
        let table = parse_table("a;b\n1;2\n ; \n;\n3;4\n").unwrap();
        assert_eq!(table.row_count(), 4);
        assert_eq!(to_string(&table), "a;b\n1;2\n3;4\n");
    }

    #[test]
    fn test_serialize_quotes_delimiters_and_quotes() {
        let table = parse_table("a;b\n\"x;y\";\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(to_string(&table), "a;b\n\"x;y\";\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_serialize_uses_lf_for_crlf_input() {
        let table = parse_table("a;b\r\n1;2\r\n").unwrap();
        assert_eq!(to_string(&table), "a;b\n1;2\n");
    }

    #[test]
    fn test_serialize_with_bom() {
        let table = parse_table("a\n1\n").unwrap();
        let bytes = serialize_table_with(&table, WriteOptions { bom: true }).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
        assert_eq!(&bytes[3..], b"a\n1\n");
    }

    #[test]
    fn test_blank_row_detection() {
        assert!(is_blank_row(&["".to_string(), "  ".to_string()]));
        assert!(!is_blank_row(&["".to_string(), " x ".to_string()]));
        assert!(is_blank_row(&[]));
    }
}
