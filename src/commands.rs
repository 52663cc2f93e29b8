//! Commands accepted by [`EditorSession::dispatch`](crate::session::EditorSession::dispatch)
//!
//! The host (key handler, script runner, UI) decodes its own events into a
//! [`GridCommand`]; the session answers with a [`CommandOutcome`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::history::{EditRecord, Transaction};
use crate::selection::Region;
use crate::table::CellCoord;

/// A single editing intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand {
    /// Copy the selection to the clipboard
    Copy,
    /// Paste clipboard text (broadcast or block)
    Paste,
    /// Clear every selected cell
    Delete,
    Undo,
    Redo,
    SelectAll,
    /// Move the anchor and select just that cell
    SetActive(CellCoord),
    /// Drag-select from the anchor to a cell
    ExtendSelection(CellCoord),
    /// Add a region without moving the anchor
    AddRegion(Region),
    /// Commit of the in-cell editor
    Edit { coord: CellCoord, value: String },
    /// Ask the host to persist the table
    Save,
}

impl GridCommand {
    /// Name used in keymap files
    pub fn name(&self) -> &'static str {
        match self {
            GridCommand::Copy => "Copy",
            GridCommand::Paste => "Paste",
            GridCommand::Delete => "Delete",
            GridCommand::Undo => "Undo",
            GridCommand::Redo => "Redo",
            GridCommand::SelectAll => "SelectAll",
            GridCommand::SetActive(_) => "SetActive",
            GridCommand::ExtendSelection(_) => "ExtendSelection",
            GridCommand::AddRegion(_) => "AddRegion",
            GridCommand::Edit { .. } => "Edit",
            GridCommand::Save => "Save",
        }
    }

    /// Whether this command can change cell values
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            GridCommand::Paste
                | GridCommand::Delete
                | GridCommand::Undo
                | GridCommand::Redo
                | GridCommand::Edit { .. }
        )
    }
}

impl fmt::Display for GridCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keymap names for the argument-free commands
impl FromStr for GridCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Copy" => Ok(GridCommand::Copy),
            "Paste" => Ok(GridCommand::Paste),
            "Delete" => Ok(GridCommand::Delete),
            "Undo" => Ok(GridCommand::Undo),
            "Redo" => Ok(GridCommand::Redo),
            "SelectAll" => Ok(GridCommand::SelectAll),
            "Save" => Ok(GridCommand::Save),
            _ => Err(()),
        }
    }
}

/// What produced a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Paste,
    Delete,
    Edit,
}

/// A recorded transaction, reported to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEvent {
    pub kind: TransactionKind,
    pub records: Vec<EditRecord>,
}

/// Result of dispatching a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Text placed on the clipboard
    Copied(String),
    /// A new transaction was applied and recorded
    Edited(TransactionEvent),
    /// The transaction that was reverted
    Undone(Transaction),
    /// The transaction that was re-applied
    Redone(Transaction),
    SelectionChanged,
    /// Nothing to do: empty paste, no-op edit, empty undo/redo stack
    Unchanged,
    /// The host should save the table
    SaveRequested,
}

impl CommandOutcome {
    /// Whether the table changed
    pub fn changed_table(&self) -> bool {
        matches!(
            self,
            CommandOutcome::Edited(_) | CommandOutcome::Undone(_) | CommandOutcome::Redone(_)
        )
    }
}

/// One line of an edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Replace the clipboard contents
    Clip(String),
    Command(GridCommand),
}

/// Edit script syntax error
#[derive(Debug, Error, PartialEq, Eq)]
#[error("script line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// Parse a whole edit script; blank lines and `#` comments are skipped
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let parsed = parse_script_line(line).map_err(|message| ScriptError {
            line: idx + 1,
            message,
        })?;
        if let Some(step) = parsed {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Parse one script line. `Ok(None)` for blank lines and comments.
pub fn parse_script_line(line: &str) -> Result<Option<ScriptStep>, String> {
    let line = line.trim_start();
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = next_token(line);
    let step = match word {
        "clip" => ScriptStep::Clip(unescape(rest.strip_prefix(' ').unwrap_or(rest))),
        "copy" => ScriptStep::Command(GridCommand::Copy),
        "paste" => ScriptStep::Command(GridCommand::Paste),
        "delete" => ScriptStep::Command(GridCommand::Delete),
        "undo" => ScriptStep::Command(GridCommand::Undo),
        "redo" => ScriptStep::Command(GridCommand::Redo),
        "select-all" => ScriptStep::Command(GridCommand::SelectAll),
        "save" => ScriptStep::Command(GridCommand::Save),
        "select" => {
            let [row, col] = numbers::<2>(rest)?;
            ScriptStep::Command(GridCommand::SetActive(CellCoord::new(row, col)))
        }
        "extend" => {
            let [row, col] = numbers::<2>(rest)?;
            ScriptStep::Command(GridCommand::ExtendSelection(CellCoord::new(row, col)))
        }
        "add" => {
            let [r1, c1, r2, c2] = numbers::<4>(rest)?;
            ScriptStep::Command(GridCommand::AddRegion(Region::from_bounds(r1, c1, r2, c2)))
        }
        "edit" => {
            let (row, rest) = next_token(rest);
            let (col, value) = next_token(rest);
            let coord = CellCoord::new(number(row)?, number(col)?);
            let value = unescape(value.strip_prefix(' ').unwrap_or(value));
            ScriptStep::Command(GridCommand::Edit { coord, value })
        }
        other => return Err(format!("unknown command \"{}\"", other)),
    };
    Ok(Some(step))
}

/// Split off the first whitespace-delimited token
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], &s[end..]),
        None => (s, ""),
    }
}

fn number(token: &str) -> Result<usize, String> {
    token
        .parse()
        .map_err(|_| format!("expected a number, found \"{}\"", token))
}

fn numbers<const N: usize>(rest: &str) -> Result<[usize; N], String> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() != N {
        return Err(format!("expected {} numbers, found {}", N, tokens.len()));
    }
    let mut out = [0usize; N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = number(token)?;
    }
    Ok(out)
}

/// Expand `\t`, `\n` and `\\`; other backslashes are kept as-is
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_keymap_names() {
        assert_eq!("Copy".parse::<GridCommand>(), Ok(GridCommand::Copy));
        assert_eq!("SelectAll".parse::<GridCommand>(), Ok(GridCommand::SelectAll));
        assert!("SetActive".parse::<GridCommand>().is_err());
        assert!("copy".parse::<GridCommand>().is_err());
    }

    #[test]
    fn test_is_mutating() {
        assert!(GridCommand::Paste.is_mutating());
        assert!(GridCommand::Undo.is_mutating());
        assert!(!GridCommand::Copy.is_mutating());
        assert!(!GridCommand::SelectAll.is_mutating());
        assert!(!GridCommand::Save.is_mutating());
    }

    #[test]
    fn test_parse_plain_commands() {
        let steps = parse_script("copy\npaste\ndelete\nundo\nredo\nselect-all\nsave\n").unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep::Command(GridCommand::Copy),
                ScriptStep::Command(GridCommand::Paste),
                ScriptStep::Command(GridCommand::Delete),
                ScriptStep::Command(GridCommand::Undo),
                ScriptStep::Command(GridCommand::Redo),
                ScriptStep::Command(GridCommand::SelectAll),
                ScriptStep::Command(GridCommand::Save),
            ]
        );
    }

    #[test]
    fn test_parse_positional_commands() {
        let steps = parse_script("select 1 2\nextend 3 4\nadd 0 0 1 1").unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep::Command(GridCommand::SetActive(CellCoord::new(1, 2))),
                ScriptStep::Command(GridCommand::ExtendSelection(CellCoord::new(3, 4))),
                ScriptStep::Command(GridCommand::AddRegion(Region::from_bounds(0, 0, 1, 1))),
            ]
        );
    }

    #[test]
    fn test_parse_edit_keeps_inner_spaces() {
        let step = parse_script_line("edit 0 1 hello  world").unwrap();
        assert_eq!(
            step,
            Some(ScriptStep::Command(GridCommand::Edit {
                coord: CellCoord::new(0, 1),
                value: "hello  world".into(),
            }))
        );
    }

    #[test]
    fn test_parse_edit_empty_value() {
        let step = parse_script_line("edit 2 0").unwrap();
        assert_eq!(
            step,
            Some(ScriptStep::Command(GridCommand::Edit {
                coord: CellCoord::new(2, 0),
                value: String::new(),
            }))
        );
    }

    #[test]
    fn test_parse_clip_escapes() {
        let step = parse_script_line("clip 1\\t2\\n3\\t4").unwrap();
        assert_eq!(step, Some(ScriptStep::Clip("1\t2\n3\t4".into())));
        let step = parse_script_line("clip a\\\\b").unwrap();
        assert_eq!(step, Some(ScriptStep::Clip("a\\b".into())));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let steps = parse_script("# header\n\n   \ncopy\n  # indented\n").unwrap();
        assert_eq!(steps, vec![ScriptStep::Command(GridCommand::Copy)]);
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = parse_script("copy\nselect 1\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("expected 2 numbers"));

        let err = parse_script("frobnicate").unwrap_err();
        assert_eq!(err.line, 1);

        let err = parse_script("select a b").unwrap_err();
        assert!(err.message.contains("expected a number"));
    }

    #[test]
    fn test_outcome_changed_table() {
        assert!(!CommandOutcome::Unchanged.changed_table());
        assert!(!CommandOutcome::Copied(String::new()).changed_table());
        assert!(CommandOutcome::Edited(TransactionEvent {
            kind: TransactionKind::Edit,
            records: vec![],
        })
        .changed_table());
    }
}
