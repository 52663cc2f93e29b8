//! Edit history (undo/redo) for grid edits.
//!
//! A [`Transaction`] groups the cell changes of one user action. Undo writes
//! the old values back in reverse order and moves the inverse transaction to the
//! redo stack; redo does the same in the other direction. Recording a new
//! transaction clears the redo stack (linear history, no branching).

use crate::error::Result;
use crate::table::{CellCoord, Table};

/// A single cell's before/after value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    pub coord: CellCoord,
    pub old_value: String,
    pub new_value: String,
}

impl EditRecord {
    pub fn new(coord: CellCoord, old_value: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            coord,
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }

    /// Whether applying this record would change nothing
    pub fn is_noop(&self) -> bool {
        self.old_value == self.new_value
    }

    /// Swap old and new values
    pub fn inverse(&self) -> Self {
        Self {
            coord: self.coord,
            old_value: self.new_value.clone(),
            new_value: self.old_value.clone(),
        }
    }
}

/// An ordered, non-empty group of edit records undone as a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    records: Vec<EditRecord>,
}

impl Transaction {
    /// Build a transaction, dropping no-op records.
    ///
    /// Returns `None` when nothing is left, so an empty transaction can never
    /// reach the log.
    pub fn from_records(records: Vec<EditRecord>) -> Option<Self> {
        let records: Vec<EditRecord> = records.into_iter().filter(|r| !r.is_noop()).collect();
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    pub fn records(&self) -> &[EditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Transaction with every record's old/new swapped, in reverse order
    pub fn inverse(&self) -> Self {
        Self {
            records: self.records.iter().rev().map(EditRecord::inverse).collect(),
        }
    }

    /// Write every `new_value` into the table.
    ///
    /// All coordinates are checked first so a failure leaves the table untouched.
    pub fn apply(&self, table: &mut Table) -> Result<()> {
        for record in &self.records {
            table.check(record.coord)?;
        }
        for record in &self.records {
            table.set(record.coord, record.new_value.clone())?;
        }
        Ok(())
    }

    /// Write every `old_value` back, last record first.
    ///
    /// A cell touched by several records ends at the first record's old value.
    fn revert(&self, table: &mut Table) -> Result<()> {
        for record in &self.records {
            table.check(record.coord)?;
        }
        for record in self.records.iter().rev() {
            table.set(record.coord, record.old_value.clone())?;
        }
        Ok(())
    }
}

/// Undo/redo stacks over a [`Table`].
///
/// Unbounded by default. With a limit set, recording past the limit evicts the
/// oldest undo entry; the redo stack is never larger than what was undone.
#[derive(Debug, Clone, Default)]
pub struct EditTransactionLog {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    limit: Option<usize>,
}

impl EditTransactionLog {
    /// Create an unbounded log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `limit` undo entries
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0),
            ..Self::default()
        }
    }

    /// Push an already-applied transaction (clears redo stack)
    pub fn record(&mut self, tx: Transaction) {
        self.redo_stack.clear();
        self.undo_stack.push(tx);

        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
                tracing::debug!(evicted = excess, limit, "history limit reached");
            }
        }
    }

    /// Undo the most recent transaction.
    ///
    /// Returns the transaction that was reverted, or `None` if the undo stack
    /// is empty. On error the transaction stays on the undo stack.
    pub fn undo_transaction(&mut self, table: &mut Table) -> Result<Option<Transaction>> {
        let Some(tx) = self.undo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = tx.revert(table) {
            self.undo_stack.push(tx);
            return Err(e);
        }
        self.redo_stack.push(tx.inverse());
        Ok(Some(tx))
    }

    /// Redo the most recently undone transaction.
    ///
    /// The redo stack holds inverses, so reverting one re-applies the original
    /// edit. Returns the edit as originally recorded.
    pub fn redo_transaction(&mut self, table: &mut Table) -> Result<Option<Transaction>> {
        let Some(inverse) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = inverse.revert(table) {
            self.redo_stack.push(inverse);
            return Err(e);
        }
        let original = inverse.inverse();
        self.undo_stack.push(original.clone());
        Ok(Some(original))
    }

    /// Undo; `false` when there was nothing to undo
    pub fn undo(&mut self, table: &mut Table) -> Result<bool> {
        Ok(self.undo_transaction(table)?.is_some())
    }

    /// Redo; `false` when there was nothing to redo
    pub fn redo(&mut self, table: &mut Table) -> Result<bool> {
        Ok(self.redo_transaction(table)?.is_some())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Drop both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
