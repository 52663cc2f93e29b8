//! Error types for the grid engine
//!
//! Every fallible engine operation returns [`GridError`]. Transport failures
//! keep their own type so the collaborator's message reaches the caller verbatim.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the crate
pub type Result<T, E = GridError> = std::result::Result<T, E>;

/// Errors raised by the table, codecs and session
#[derive(Error, Debug)]
pub enum GridError {
    /// Coordinate outside the current table dimensions
    #[error("cell ({row}, {col}) is out of bounds for a {rows}x{cols} table")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Malformed CSV or an unknown column name
    #[error("{}", schema_message(.line, .message))]
    InvalidSchema {
        line: Option<usize>,
        message: String,
    },

    /// The local source is held open exclusively by another process
    #[error("file is in use by another process: {}", .0.display())]
    FileLocked(PathBuf),

    /// The local source failed validation before parsing
    #[error("cannot open {}: {reason}", .path.display())]
    FileOpen { path: PathBuf, reason: String },

    /// Copy over regions that do not form a single rectangle
    #[error("unsupported selection: {0}")]
    UnsupportedSelection(String),

    /// The session has no table open
    #[error("no table is open")]
    NoTable,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn schema_message(line: &Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("invalid CSV schema at line {}: {}", line, message),
        None => format!("invalid CSV schema: {}", message),
    }
}

impl GridError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        GridError::InvalidSchema {
            line: None,
            message: message.into(),
        }
    }

    pub(crate) fn schema_at(line: usize, message: impl Into<String>) -> Self {
        GridError::InvalidSchema {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Whether this error came from the sync collaborator
    pub fn is_transport(&self) -> bool {
        matches!(self, GridError::Transport(_))
    }
}

/// Errors reported by a [`Transport`](crate::sync::Transport) implementation
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("remote file not found: {0}")]
    NotFound(String),

    #[error("invalid remote path: {0}")]
    InvalidPath(String),

    /// The remote end answered but refused the request
    #[error("remote rejected the request: {0}")]
    Rejected(String),

    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}
