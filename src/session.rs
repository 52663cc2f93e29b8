//! Editor session
//!
//! One session edits at most one table. It owns the table, the selection, the
//! undo/redo log and the clipboard provider, and exposes a single
//! [`EditorSession::dispatch`] entry point for editing commands.
//!
//! Opening another file (local, remote or an extracted container file)
//! replaces the table, the selection and both history stacks. Nothing carries
//! over between files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::clipboard::{self, ClipboardProvider, MemoryClipboard};
use crate::commands::{CommandOutcome, GridCommand, ScriptStep, TransactionEvent, TransactionKind};
use crate::config::GridConfig;
use crate::context::SessionContext;
use crate::csv::{self, WriteOptions};
use crate::error::{GridError, Result};
use crate::history::{EditRecord, EditTransactionLog, Transaction};
use crate::selection::{Region, SelectionModel};
use crate::sync::{self, SyncHandle, Transport, UploadAck};
use crate::table::{CellCoord, Table};
use crate::util::file_validation;

/// Where the open table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Memory,
    Local(PathBuf),
    /// Canonical remote path
    Remote(String),
}

/// Tally of an edit script run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub transactions: usize,
    pub undone: usize,
    pub redone: usize,
    /// Editing steps that changed nothing (selection and copy steps excluded)
    pub unchanged: usize,
    pub save_requested: bool,
}

/// State tied to one open file
#[derive(Debug)]
struct OpenTable {
    table: Table,
    selection: SelectionModel,
    history: EditTransactionLog,
    source: TableSource,
}

pub struct EditorSession {
    context: SessionContext,
    config: GridConfig,
    clipboard: Box<dyn ClipboardProvider>,
    open: Option<OpenTable>,
}

impl EditorSession {
    /// Session with an in-process clipboard
    pub fn new(context: SessionContext, config: GridConfig) -> Self {
        Self::with_clipboard(context, config, Box::new(MemoryClipboard::new()))
    }

    pub fn with_clipboard(
        context: SessionContext,
        config: GridConfig,
        clipboard: Box<dyn ClipboardProvider>,
    ) -> Self {
        Self {
            context,
            config,
            clipboard,
            open: None,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn clipboard_mut(&mut self) -> &mut dyn ClipboardProvider {
        self.clipboard.as_mut()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Replace whatever is open with `table`
    pub fn load_table(&mut self, table: Table, source: TableSource) {
        tracing::info!(
            source = ?source,
            rows = table.row_count(),
            columns = table.column_count(),
            "opened table"
        );
        self.open = Some(OpenTable {
            table,
            selection: SelectionModel::new(),
            history: EditTransactionLog::with_limit(self.config.history_limit),
            source,
        });
    }

    /// Parse CSV text and open it. On error the current table stays open.
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let table = csv::parse_table(content)?;
        self.load_table(table, TableSource::Memory);
        Ok(())
    }

    /// Validate, read and parse a local file.
    ///
    /// A file held open by another process fails with `FileLocked` before any
    /// parsing happens.
    pub fn open_local(&mut self, path: &Path) -> Result<()> {
        file_validation::validate_source(path).map_err(|e| {
            tracing::warn!("{}", e.user_message(&file_validation::filename_for_display(path)));
            e.into_grid_error(path)
        })?;
        let bytes = std::fs::read(path)?;
        let table = csv::parse_bytes(&bytes)?;
        self.load_table(table, TableSource::Local(path.to_path_buf()));
        Ok(())
    }

    /// Download and open a remote file; returns the canonical path used
    pub fn open_remote(&mut self, transport: &dyn Transport, raw_path: &str) -> Result<String> {
        self.fetch_remote(transport, raw_path)
            .map(|(canonical, _)| canonical)
    }

    /// Like [`open_remote`](Self::open_remote), also returning the downloaded
    /// bytes exactly as received.
    pub fn fetch_remote(
        &mut self,
        transport: &dyn Transport,
        raw_path: &str,
    ) -> Result<(String, Vec<u8>)> {
        let canonical = self.canonical_path(raw_path)?;
        let bytes = transport.download(&canonical)?;
        let table = csv::parse_bytes(&bytes)?;
        self.load_table(table, TableSource::Remote(canonical.clone()));
        Ok((canonical, bytes))
    }

    /// Switch to extracted file `index` of the current container
    pub fn open_extracted(&mut self, transport: &dyn Transport, index: usize) -> Result<()> {
        let raw = self
            .context
            .extracted_file(index)
            .ok_or(GridError::OutOfBounds {
                row: index,
                col: 0,
                rows: self.context.extracted_files.len(),
                cols: 1,
            })?
            .to_string();

        self.open_remote(transport, &raw)?;
        self.context.current_file = Some(index);
        tracing::info!(
            "switched to {} ({})",
            SessionContext::container_label(index),
            raw
        );
        Ok(())
    }

    /// Discard the table, selection and history
    pub fn close(&mut self) {
        if self.open.take().is_some() {
            tracing::debug!("closed table");
        }
        self.context.current_file = None;
    }

    pub fn has_table(&self) -> bool {
        self.open.is_some()
    }

    /// Where the open table was loaded from
    pub fn source(&self) -> Option<&TableSource> {
        self.open.as_ref().map(|o| &o.source)
    }

    pub fn table(&self) -> Option<&Table> {
        self.open.as_ref().map(|o| &o.table)
    }

    pub fn selection(&self) -> Option<&SelectionModel> {
        self.open.as_ref().map(|o| &o.selection)
    }

    pub fn history(&self) -> Option<&EditTransactionLog> {
        self.open.as_ref().map(|o| &o.history)
    }

    /// "B3 (qty)" style label of the active cell
    pub fn active_cell_label(&self) -> Option<String> {
        let open = self.open.as_ref()?;
        let active = open.selection.active();
        let column = open.table.column_names().get(active.col)?;
        Some(format!("{} ({})", active, column))
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Apply one editing command to the open table
    pub fn dispatch(&mut self, command: GridCommand) -> Result<CommandOutcome> {
        let open = self.open.as_mut().ok_or(GridError::NoTable)?;
        tracing::debug!(command = %command, "dispatch");

        let outcome = match command {
            GridCommand::Copy => {
                if open.selection.is_empty() {
                    return Ok(CommandOutcome::Unchanged);
                }
                let text = clipboard::encode(&open.table, &open.selection)?;
                self.clipboard.set_text(text.clone());
                CommandOutcome::Copied(text)
            }
            GridCommand::Paste => {
                let Some(text) = self.clipboard.get_text() else {
                    return Ok(CommandOutcome::Unchanged);
                };
                let records = clipboard::paste_records(&open.table, &open.selection, &text);
                commit(open, TransactionKind::Paste, records)?
            }
            GridCommand::Delete => {
                let records = delete_records(&open.table, &open.selection);
                commit(open, TransactionKind::Delete, records)?
            }
            GridCommand::Undo => match open.history.undo_transaction(&mut open.table)? {
                Some(tx) => CommandOutcome::Undone(tx),
                None => CommandOutcome::Unchanged,
            },
            GridCommand::Redo => match open.history.redo_transaction(&mut open.table)? {
                Some(tx) => CommandOutcome::Redone(tx),
                None => CommandOutcome::Unchanged,
            },
            GridCommand::SelectAll => {
                open.selection
                    .select_all(open.table.row_count(), open.table.column_count());
                CommandOutcome::SelectionChanged
            }
            GridCommand::SetActive(coord) => {
                open.table.check(coord)?;
                open.selection.set_active(coord);
                CommandOutcome::SelectionChanged
            }
            GridCommand::ExtendSelection(coord) => {
                open.table.check(coord)?;
                open.selection.extend_to(coord);
                CommandOutcome::SelectionChanged
            }
            GridCommand::AddRegion(region) => {
                check_region(&open.table, &region)?;
                open.selection.add_region(region);
                CommandOutcome::SelectionChanged
            }
            GridCommand::Edit { coord, value } => {
                let old = open.table.get(coord)?;
                let record = EditRecord::new(coord, old, value);
                commit(open, TransactionKind::Edit, vec![record])?
            }
            GridCommand::Save => CommandOutcome::SaveRequested,
        };
        Ok(outcome)
    }

    /// Run parsed script steps in order, stopping at the first error
    pub fn run_script(&mut self, steps: &[ScriptStep]) -> Result<ScriptReport> {
        let mut report = ScriptReport::default();
        for step in steps {
            match step {
                ScriptStep::Clip(text) => self.clipboard.set_text(text.clone()),
                ScriptStep::Command(command) => match self.dispatch(command.clone())? {
                    CommandOutcome::Edited(_) => report.transactions += 1,
                    CommandOutcome::Undone(_) => report.undone += 1,
                    CommandOutcome::Redone(_) => report.redone += 1,
                    CommandOutcome::Unchanged if command.is_mutating() => report.unchanged += 1,
                    CommandOutcome::Unchanged => {}
                    CommandOutcome::SaveRequested => report.save_requested = true,
                    CommandOutcome::Copied(_) | CommandOutcome::SelectionChanged => {}
                },
            }
        }
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Serialize the open table with the save policy applied
    pub fn serialized_payload(&self) -> Result<Vec<u8>> {
        let table = self.table().ok_or(GridError::NoTable)?;
        csv::serialize_table_with(
            table,
            WriteOptions {
                bom: self.config.write_bom,
            },
        )
    }

    /// Write the serialized table to a local file; returns the byte count
    pub fn save_local(&self, path: &Path) -> Result<usize> {
        let payload = self.serialized_payload()?;
        std::fs::write(path, &payload)?;
        tracing::info!(path = %path.display(), bytes = payload.len(), "saved table");
        Ok(payload.len())
    }

    /// Canonical remote path for `raw` under this session's supplier
    pub fn canonical_path(&self, raw: &str) -> Result<String> {
        Ok(sync::canonical_path(raw, self.context.supplier())?)
    }

    /// Upload a snapshot of the table. A failure leaves table and history untouched.
    pub fn upload(&self, transport: &dyn Transport, raw_path: &str) -> Result<UploadAck> {
        let payload = self.serialized_payload()?;
        let canonical = self.canonical_path(raw_path)?;
        match transport.upload(&payload, &canonical) {
            Ok(ack) => {
                tracing::info!(path = %ack.path, bytes = ack.bytes, "uploaded table");
                Ok(ack)
            }
            Err(e) => {
                tracing::warn!(path = %canonical, "upload failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Snapshot the table and upload it on a worker thread
    pub fn upload_in_background(
        &self,
        transport: Arc<dyn Transport>,
        raw_path: &str,
    ) -> Result<SyncHandle> {
        let payload = self.serialized_payload()?;
        let canonical = self.canonical_path(raw_path)?;
        tracing::info!(path = %canonical, bytes = payload.len(), "starting background upload");
        Ok(SyncHandle::spawn(transport, payload, canonical))
    }
}

/// Apply records as one transaction; nothing is recorded when all are no-ops
fn commit(
    open: &mut OpenTable,
    kind: TransactionKind,
    records: Vec<EditRecord>,
) -> Result<CommandOutcome> {
    let Some(tx) = Transaction::from_records(records) else {
        return Ok(CommandOutcome::Unchanged);
    };
    tx.apply(&mut open.table)?;
    let event = TransactionEvent {
        kind,
        records: tx.records().to_vec(),
    };
    tracing::debug!(kind = ?kind, cells = tx.len(), "recorded transaction");
    open.history.record(tx);
    Ok(CommandOutcome::Edited(event))
}

/// Clear every selected non-empty cell (the active cell when nothing is selected)
fn delete_records(table: &Table, selection: &SelectionModel) -> Vec<EditRecord> {
    let targets = if selection.is_empty() {
        vec![selection.active()]
    } else {
        selection.cells()
    };

    targets
        .into_iter()
        .filter_map(|coord| {
            let old = table.get(coord).ok()?;
            (!old.is_empty()).then(|| EditRecord::new(coord, old, ""))
        })
        .collect()
}

fn check_region(table: &Table, region: &Region) -> Result<()> {
    table.check(region.start())?;
    table.check(region.end())
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("context", &self.context)
            .field("config", &self.config)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}
