//! YAML configuration parsing for keymaps
//!
//! ```yaml
//! bindings:
//!   - key: cmd+c
//!     command: Copy
//!   - key: ctrl+y
//!     command: Unbound
//!   - key: cmd+shift+z
//!     command: Redo
//!     platform: macos
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::commands::GridCommand;

use super::binding::Keybinding;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Command name that removes a default binding
const UNBOUND: &str = "Unbound";

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;
    parse_keymap_yaml(&content)
}

/// Parse keybindings from a YAML string, skipping other platforms' entries
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = current_platform();
    let mut bindings = Vec::with_capacity(config.bindings.len());

    for entry in config.bindings {
        if entry
            .platform
            .as_deref()
            .is_some_and(|p| p != current_platform)
        {
            continue;
        }

        let keystroke = parse_key_string(&entry.key)?;
        if entry.command == UNBOUND {
            bindings.push(Keybinding::unbound(keystroke));
            continue;
        }
        let command: GridCommand = entry
            .command
            .parse()
            .map_err(|_| KeymapError::InvalidCommand(entry.command.clone()))?;
        bindings.push(Keybinding::new(keystroke, command));
    }

    Ok(bindings)
}

/// Parse a key string like "cmd+shift+z" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        let part_lower = part.trim().to_lowercase();
        match part_lower.as_str() {
            "cmd" => mods = mods | Modifiers::cmd(),
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" => mods = mods | Modifiers::META,
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "insert" | "ins" => Ok(KeyCode::Insert),
        _ => key
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=24).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

fn current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}
