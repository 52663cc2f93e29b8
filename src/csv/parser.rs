//! CSV parsing using the csv crate
//!
//! RFC 4180 compliant parsing with quoted fields and escaped quotes. The first
//! record is the header; data rows may be shorter than the header (missing
//! trailing fields become empty cells) but never wider.

use std::io::Cursor;

use crate::error::{GridError, Result};
use crate::table::Table;

/// Field delimiter of the grid file format
pub const DELIMITER: u8 = b';';

const UTF8_BOM: char = '\u{feff}';

/// Parse delimited text into a [`Table`].
///
/// Accepts `\n` and `\r\n` line endings and an optional leading UTF-8 BOM.
/// Nothing is exposed on failure: the table is built only after every row
/// has been validated.
pub fn parse_table(content: &str) -> Result<Table> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    let cursor = Cursor::new(content.as_bytes());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(cursor);

    let mut records = reader.records();

    let columns: Vec<String> = match records.next() {
        Some(Ok(record)) => record.iter().map(|s| s.to_string()).collect(),
        Some(Err(e)) => return Err(record_error(e, 1)),
        None => return Err(GridError::schema("missing header row")),
    };

    let width = columns.len();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, result) in records.enumerate() {
        let record = result.map_err(|e| record_error(e, idx + 2))?;
        if record.len() > width {
            // blank lines are skipped by the reader, so take the line from the record
            let line = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(idx + 2);
            return Err(GridError::schema_at(
                line,
                format!("row has {} fields but the header has {}", record.len(), width),
            ));
        }
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    let table = Table::new(columns, rows)?;
    tracing::debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "parsed CSV table"
    );
    Ok(table)
}

/// Parse raw bytes, rejecting anything that is not UTF-8
pub fn parse_bytes(bytes: &[u8]) -> Result<Table> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| GridError::schema(format!("file is not valid UTF-8: {}", e)))?;
    parse_table(content)
}

fn record_error(err: csv::Error, fallback_line: usize) -> GridError {
    let line = err
        .position()
        .map(|pos| pos.line() as usize)
        .unwrap_or(fallback_line);
    GridError::schema_at(line, err.to_string())
}
