//! CSV codec for grid files
//!
//! Parses `;`-delimited UTF-8 text into a [`Table`](crate::table::Table) and
//! writes it back with the save policy applied.
//!
//! ```text
//! bytes ──parse_table──▶ Table ──(edits)──▶ Table ──serialize_table──▶ bytes
//! ```
//!
//! Round trip: `parse(serialize(t))` reproduces every row of `t` that has a
//! non-blank cell, with each cell trimmed. Blank rows are dropped on save.

mod parser;
mod writer;

pub use parser::{parse_bytes, parse_table, DELIMITER};
pub use writer::{is_blank_row, serialize_table, serialize_table_with, WriteOptions};
