//! Configurable keyboard mapping for the grid
//!
//! Maps keystrokes decoded by the host UI to [`GridCommand`](crate::commands::GridCommand)s:
//!
//! ```text
//! host key event → Keystroke → Keymap::lookup() → GridCommand → EditorSession::dispatch
//! ```
//!
//! Defaults follow the usual spreadsheet shortcuts; users override them in YAML.

mod binding;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use defaults::{default_bindings, get_default_keymap_yaml, load_default_keymap, merge_bindings};
pub use keymap::Keymap;
pub use types::{KeyCode, Keystroke, Modifiers};
