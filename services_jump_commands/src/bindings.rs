//! Command bindings and their persisted JSON form
//!
//! The canonical format maps command names to key descriptors:
//!
//! ```json
//! { "close": "KeyX", "edit": "KeyE" }
//! ```
//!
//! An older format keyed bindings by the produced character instead
//! (`{ "x": "close" }`). It is recognised and migrated on load.

use crate::descriptor::{DescriptorError, KeyDescriptor};
use input_types::{KeyCode, KeyEvent, Modifiers};
use std::collections::BTreeMap;
use thiserror::Error;

/// Settings identifier the bindings are stored under
pub const SETTINGS_ID: &str = "JumpKeysSettings";

pub const CLOSE_COMMAND: &str = "close";
pub const EDIT_COMMAND: &str = "edit";

#[derive(Debug, Error)]
pub enum BindingsError {
    #[error("Bindings are not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid key for command '{command}': {source}")]
    Descriptor {
        command: String,
        #[source]
        source: DescriptorError,
    },

    #[error("Legacy binding key '{0}' is not a single typeable character")]
    LegacyKey(String),
}

/// How a configuration text was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingsFormat {
    /// Command name to key descriptor
    Descriptors,
    /// Character to command name; needs rewriting
    LegacyCharacters,
}

/// Command name to key-combination table, one binding per command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBindings {
    bindings: BTreeMap<String, KeyDescriptor>,
}

impl HotkeyBindings {
    /// Creates an empty table
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Built-in bindings: `close` on X, `edit` on E
    pub fn defaults() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(CLOSE_COMMAND, KeyDescriptor::key(KeyCode::X));
        bindings.bind(EDIT_COMMAND, KeyDescriptor::key(KeyCode::E));
        bindings
    }

    /// Binds a command, replacing its previous key
    pub fn bind(&mut self, command: impl Into<String>, key: KeyDescriptor) {
        self.bindings.insert(command.into(), key);
    }

    pub fn unbind(&mut self, command: &str) -> Option<KeyDescriptor> {
        self.bindings.remove(command)
    }

    pub fn get(&self, command: &str) -> Option<&KeyDescriptor> {
        self.bindings.get(command)
    }

    /// Finds the command bound to a key pressed while `held` is held
    ///
    /// If several commands share a key, the first by name wins.
    pub fn command_for(&self, event: &KeyEvent, held: Modifiers) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, key)| key.matches(event, held))
            .map(|(command, _)| command.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyDescriptor)> {
        self.bindings.iter().map(|(command, key)| (command.as_str(), key))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Parses configuration text in either format
    pub fn from_json(text: &str) -> Result<(Self, BindingsFormat), BindingsError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(text)?;

        let looks_legacy = !raw.is_empty()
            && raw.keys().all(|key| key.chars().count() == 1)
            && !raw.values().any(|value| looks_like_key(value));

        if looks_legacy {
            return Self::from_legacy(raw).map(|b| (b, BindingsFormat::LegacyCharacters));
        }

        let mut bindings = Self::empty();
        for (command, key) in raw {
            let descriptor = key
                .parse()
                .map_err(|source| BindingsError::Descriptor {
                    command: command.clone(),
                    source,
                })?;
            bindings.bind(command, descriptor);
        }
        Ok((bindings, BindingsFormat::Descriptors))
    }

    fn from_legacy(raw: BTreeMap<String, String>) -> Result<Self, BindingsError> {
        let mut bindings = Self::empty();
        for (key, command) in raw {
            let code = key
                .chars()
                .next()
                .and_then(KeyCode::from_char)
                .ok_or_else(|| BindingsError::LegacyKey(key.clone()))?;
            bindings.bind(command, KeyDescriptor::key(code));
        }
        Ok(bindings)
    }

    /// Serializes to the canonical format, commands in name order
    pub fn to_json(&self) -> String {
        let raw: BTreeMap<&str, String> = self
            .bindings
            .iter()
            .map(|(command, key)| (command.as_str(), key.to_string()))
            .collect();
        // A map of strings always serializes
        serde_json::to_string_pretty(&raw).unwrap_or_default()
    }
}

/// Whether a value reads as a key descriptor, even a malformed one
///
/// Legacy values are command names, which never carry a `+` or start
/// with a key-code family prefix.
fn looks_like_key(value: &str) -> bool {
    const CODE_PREFIXES: [&str; 5] = ["key", "digit", "arrow", "numpad", "f"];

    let lower = value.trim().to_ascii_lowercase();
    if lower.contains('+') || value.parse::<KeyDescriptor>().is_ok() {
        return true;
    }
    CODE_PREFIXES.iter().any(|prefix| {
        lower
            .strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|next| {
                if *prefix == "f" {
                    next.is_ascii_digit()
                } else {
                    next.is_ascii_alphanumeric()
                }
            })
    })
}

impl Default for HotkeyBindings {
    fn default() -> Self {
        Self::defaults()
    }
}
