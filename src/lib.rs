//! gridedit - tabular edit engine for semicolon-delimited CSV files
//!
//! Turns a CSV file into an editable matrix, records every cell change as an
//! undoable transaction, interprets clipboard text (broadcast or block paste)
//! and writes the matrix back on save. Remote storage is reached through an
//! injected [`sync::Transport`].
//!
//! ```text
//! csv ──▶ Table ◀── EditorSession::dispatch(GridCommand)
//!                     │  SelectionModel / clipboard / EditTransactionLog
//!                     ▼
//!              serialized_payload ──▶ save_local / Transport::upload
//! ```

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod context;
pub mod csv;
pub mod error;
pub mod history;
pub mod keymap;
pub mod selection;
pub mod session;
pub mod sync;
pub mod table;
pub mod tracing;
pub mod util;

pub use commands::{CommandOutcome, GridCommand};
pub use config::GridConfig;
pub use context::SessionContext;
pub use error::{GridError, Result, TransportError};
pub use session::EditorSession;
pub use table::{CellCoord, Table};
