//! Default keybindings for the grid
//!
//! The defaults ship as an embedded keymap.yaml with a hardcoded fallback.
//! A user keymap at `~/.config/gridedit/keymap.yaml` is merged on top.

use crate::commands::GridCommand;

use super::binding::Keybinding;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap text
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: embedded defaults, then user overrides.
///
/// User bindings with `command: Unbound` remove the matching default.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let mut bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    if let Some(user_path) = crate::config_paths::keymap_file() {
        if user_path.exists() {
            match load_keymap_file(&user_path) {
                Ok(user_bindings) => {
                    tracing::info!(
                        "Merging user keymap from {} ({} bindings)",
                        user_path.display(),
                        user_bindings.len()
                    );
                    bindings = merge_bindings(bindings, user_bindings);
                }
                Err(e) => {
                    tracing::warn!("Failed to load user keymap from {}: {}", user_path.display(), e);
                }
            }
        }
    }

    bindings
}

/// Merge user bindings into base bindings
///
/// - unbind entry: removes base bindings with the same keystroke
/// - same keystroke: replaces the base binding
/// - otherwise: appended
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.is_unbound() {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        match result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded defaults for the current platform
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;

    vec![
        bind(KeyCode::Char('c'), cmd, GridCommand::Copy),
        bind(KeyCode::Char('v'), cmd, GridCommand::Paste),
        bind(KeyCode::Delete, Modifiers::NONE, GridCommand::Delete),
        bind(KeyCode::Backspace, Modifiers::NONE, GridCommand::Delete),
        bind(KeyCode::Char('z'), cmd, GridCommand::Undo),
        bind(KeyCode::Char('y'), cmd, GridCommand::Redo),
        bind(KeyCode::Char('z'), cmd_shift, GridCommand::Redo),
        bind(KeyCode::Char('a'), cmd, GridCommand::SelectAll),
        bind(KeyCode::Char('s'), cmd, GridCommand::Save),
    ]
}

fn bind(key: KeyCode, mods: Modifiers, command: GridCommand) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}
