//! Table data model
//!
//! The single source of truth for an open CSV file: ordered, unique column
//! names plus rows of string cells. The schema is fixed once a table is built;
//! edits overwrite cells in place and never resize the grid.

use std::collections::HashMap;
use std::fmt;

use crate::error::{GridError, Result};

/// Position of a cell in the grid (zero-based, header excluded)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset this coordinate by a block-relative position
    pub const fn offset(self, rows: usize, cols: usize) -> Self {
        Self {
            row: self.row + rows,
            col: self.col + cols,
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.col), self.row + 1)
    }
}

/// Spreadsheet-style column label: 0 -> "A", 25 -> "Z", 26 -> "AA"
pub fn column_letter(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// In-memory matrix backing one open CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    /// Built once per load; column lookups never scan the header
    column_index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, padding short rows with empty cells.
    ///
    /// Duplicate column names and rows wider than the header are rejected
    /// with `InvalidSchema`. Row numbers in errors are 1-based data rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut column_index = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            if column_index.insert(name.clone(), idx).is_some() {
                return Err(GridError::schema_at(
                    1,
                    format!("duplicate column name \"{}\"", name),
                ));
            }
        }

        let width = columns.len();
        let mut normalized = Vec::with_capacity(rows.len());
        for (idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(GridError::schema_at(
                    idx + 2,
                    format!("row has {} fields but the header has {}", row.len(), width),
                ));
            }
            row.resize(width, String::new());
            normalized.push(row);
        }

        Ok(Self {
            columns,
            column_index,
            rows: normalized,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Index of a column by its header text
    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.column_index
            .get(name)
            .copied()
            .ok_or_else(|| GridError::schema(format!("unknown column \"{}\"", name)))
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows.len() && coord.col < self.columns.len()
    }

    /// Fail with `OutOfBounds` unless `coord` addresses a cell
    pub fn check(&self, coord: CellCoord) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                rows: self.row_count(),
                cols: self.column_count(),
            })
        }
    }

    pub fn get(&self, coord: CellCoord) -> Result<&str> {
        self.check(coord)?;
        Ok(&self.rows[coord.row][coord.col])
    }

    /// Value of a cell addressed by column name
    pub fn get_by_name(&self, row: usize, column: &str) -> Result<&str> {
        let col = self.column_position(column)?;
        self.get(CellCoord::new(row, col))
    }

    /// Overwrite a cell and return its previous value.
    ///
    /// Does not record history; callers wrap the change in a transaction.
    pub fn set(&mut self, coord: CellCoord, value: impl Into<String>) -> Result<String> {
        self.check(coord)?;
        Ok(std::mem::replace(
            &mut self.rows[coord.row][coord.col],
            value.into(),
        ))
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
