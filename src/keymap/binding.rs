//! Keybinding: one keystroke mapped to a grid command

use crate::commands::GridCommand;

use super::types::Keystroke;

/// A single keybinding.
///
/// `command: None` is an unbind entry: merged over other bindings it removes
/// whatever they map to the same keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Option<GridCommand>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: GridCommand) -> Self {
        Self {
            keystroke,
            command: Some(command),
        }
    }

    /// Entry that removes a binding when merged
    pub fn unbound(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            command: None,
        }
    }

    pub fn is_unbound(&self) -> bool {
        self.command.is_none()
    }
}
