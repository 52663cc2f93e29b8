//! Clipboard text codec
//!
//! Copy serializes the selected cells as tab-separated columns and
//! newline-separated rows. Paste picks one of two algorithms from the shape of
//! the text:
//!
//! - single line without a tab: **broadcast** the value into every selected cell
//! - anything else: **block** paste anchored at the active cell, clipping
//!   targets that fall outside the table
//!
//! Both produce [`EditRecord`]s only for cells whose value actually changes.

use std::collections::HashSet;

use crate::error::{GridError, Result};
use crate::history::EditRecord;
use crate::selection::{Region, SelectionModel};
use crate::table::Table;

/// How a clipboard text will be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastePlan {
    /// Empty or whitespace-only text; nothing to do
    Empty,
    /// One value written into every selected cell
    Broadcast(String),
    /// Rows of values written relative to the active cell
    Block(Vec<Vec<String>>),
}

/// Serialize the selection to clipboard text.
///
/// Several regions are accepted only when together they cover their bounding
/// rectangle exactly; a selection with holes is `UnsupportedSelection`.
/// Regions are clipped to the table first.
pub fn encode(table: &Table, selection: &SelectionModel) -> Result<String> {
    let regions: Vec<Region> = selection
        .regions()
        .iter()
        .filter_map(|r| r.clip(table.row_count(), table.column_count()))
        .collect();

    let Some(first) = regions.first().copied() else {
        return Err(GridError::UnsupportedSelection(
            "no selected cells inside the table".to_string(),
        ));
    };
    let bounds = regions.iter().fold(first, |acc, r| acc.union_bounds(r));

    if regions.len() > 1 {
        let covered: HashSet<_> = regions.iter().flat_map(|r| r.cells()).collect();
        if covered.len() != bounds.cell_count() {
            return Err(GridError::UnsupportedSelection(format!(
                "{} regions do not form one rectangle",
                regions.len()
            )));
        }
    }

    let mut lines = Vec::with_capacity(bounds.row_count());
    for row in bounds.start().row..=bounds.end().row {
        let cells = table
            .row(row)
            .map(|r| &r[bounds.start().col..=bounds.end().col])
            .unwrap_or_default();
        lines.push(cells.join("\t"));
    }
    Ok(lines.join("\n"))
}

/// Classify clipboard text.
///
/// Accepts `\n` and `\r\n`; trailing empty lines are dropped.
pub fn decode(text: &str) -> PastePlan {
    if text.trim().is_empty() {
        return PastePlan::Empty;
    }

    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    if lines.len() == 1 && !lines[0].contains('\t') {
        return PastePlan::Broadcast(lines[0].to_string());
    }

    PastePlan::Block(
        lines
            .into_iter()
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect(),
    )
}

/// Compute the edit records a paste would produce, without touching the table.
///
/// Broadcast targets every selected cell (or the active cell when nothing is
/// selected). Block targets outside the table are skipped.
pub fn paste_records(table: &Table, selection: &SelectionModel, text: &str) -> Vec<EditRecord> {
    match decode(text) {
        PastePlan::Empty => Vec::new(),
        PastePlan::Broadcast(value) => broadcast_records(table, selection, &value),
        PastePlan::Block(block) => block_records(table, selection, &block),
    }
}

fn broadcast_records(table: &Table, selection: &SelectionModel, value: &str) -> Vec<EditRecord> {
    let targets = if selection.is_empty() {
        vec![selection.active()]
    } else {
        selection.cells()
    };

    targets
        .into_iter()
        .filter_map(|coord| {
            let old = table.get(coord).ok()?;
            (old != value).then(|| EditRecord::new(coord, old, value))
        })
        .collect()
}

fn block_records(table: &Table, selection: &SelectionModel, block: &[Vec<String>]) -> Vec<EditRecord> {
    let anchor = selection.active();
    let mut records = Vec::new();
    let mut clipped = 0usize;

    for (i, line) in block.iter().enumerate() {
        for (j, value) in line.iter().enumerate() {
            let coord = anchor.offset(i, j);
            match table.get(coord) {
                Ok(old) if old != value.as_str() => {
                    records.push(EditRecord::new(coord, old, value.as_str()))
                }
                Ok(_) => {}
                Err(_) => clipped += 1,
            }
        }
    }

    if clipped > 0 {
        tracing::warn!(clipped, anchor = %anchor, "paste block extends past the table; clipped");
    }
    records
}

/// Source and sink for clipboard text
pub trait ClipboardProvider: Send {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: String);
}

/// In-process clipboard
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }
}

/// Operating-system clipboard
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        arboard::Clipboard::new().ok()?.get_text().ok()
    }

    fn set_text(&mut self, text: String) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    tracing::warn!("failed to write system clipboard: {}", e);
                }
            }
            Err(e) => tracing::warn!("system clipboard unavailable: {}", e),
        }
    }
}
