//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;

use gridedit::table::{CellCoord, Table};
use gridedit::{EditorSession, GridConfig, SessionContext};
use tempfile::TempDir;

/// Build a table with generated column names `c0..cN` from literal rows
pub fn grid(rows: &[&[&str]]) -> Table {
    let width = rows.first().map_or(0, |r| r.len());
    let columns = (0..width).map(|i| format!("c{}", i)).collect();
    let rows = rows
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect();
    Table::new(columns, rows).unwrap()
}

/// Render the header plus rows as `;`-delimited text
pub fn csv_text(columns: &[&str], rows: &[&[&str]]) -> String {
    let mut out = columns.join(";");
    out.push('\n');
    for row in rows {
        out.push_str(&row.join(";"));
        out.push('\n');
    }
    out
}

/// Session with default config and no supplier, loaded from CSV text
pub fn test_session(content: &str) -> EditorSession {
    test_session_with(content, SessionContext::default(), GridConfig::default())
}

pub fn test_session_with(content: &str, context: SessionContext, config: GridConfig) -> EditorSession {
    let mut session = EditorSession::new(context, config);
    session.load_str(content).unwrap();
    session
}

/// Cell value of the session's open table
pub fn cell(session: &EditorSession, row: usize, col: usize) -> String {
    session
        .table()
        .expect("table open")
        .get(CellCoord::new(row, col))
        .unwrap()
        .to_string()
}

/// All data rows of the open table
pub fn rows(session: &EditorSession) -> Vec<Vec<String>> {
    session
        .table()
        .expect("table open")
        .rows()
        .map(|r| r.to_vec())
        .collect()
}

/// Write `content` to `name` inside a fresh temp dir
pub fn temp_file(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

pub fn c(row: usize, col: usize) -> CellCoord {
    CellCoord::new(row, col)
}
