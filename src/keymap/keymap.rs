//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use crate::commands::GridCommand;

use super::binding::Keybinding;
use super::types::Keystroke;

/// Keystroke to command lookup table
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Index into `bindings`; the last binding for a keystroke wins
    lookup: HashMap<Keystroke, usize>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a keymap; unbind entries are ignored
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        if binding.is_unbound() {
            return;
        }
        self.lookup.insert(binding.keystroke, self.bindings.len());
        self.bindings.push(binding);
    }

    /// Command bound to a keystroke
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<GridCommand> {
        let idx = *self.lookup.get(keystroke)?;
        self.bindings[idx].command.clone()
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// First keystroke bound to a command
    pub fn binding_for(&self, command: &GridCommand) -> Option<Keystroke> {
        self.bindings
            .iter()
            .find(|b| b.command.as_ref() == Some(command))
            .map(|b| b.keystroke)
    }

    /// Display string for a command's keystroke, e.g. "Ctrl+Z"
    pub fn display_for(&self, command: &GridCommand) -> Option<String> {
        self.binding_for(command).map(|k| k.to_string())
    }
}
