//! Key-combination descriptors
//!
//! A descriptor is zero or more modifier names followed by a physical key
//! code, joined with `+`: `KeyX`, `Shift+KeyE`, `Ctrl+Alt+Digit1`.

use input_types::{KeyCode, KeyEvent, Modifiers};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Empty key descriptor")]
    Empty,

    #[error("Unknown key code: {0}")]
    UnknownKeyCode(String),

    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("Modifier key cannot be bound: {0}")]
    ModifierKey(String),
}

/// Physical key plus the exact set of modifier flags it must be pressed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyDescriptor {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyDescriptor {
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A bare key with no extra modifiers
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, Modifiers::none())
    }

    /// Checks a key-down event pressed while `held` is being held
    ///
    /// The held modifier is not part of the comparison; every other
    /// modifier flag must match exactly.
    pub fn matches(&self, event: &KeyEvent, held: Modifiers) -> bool {
        self.code == event.code && event.modifiers.without(held) == self.modifiers.without(held)
    }
}

impl FromStr for KeyDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DescriptorError::Empty);
        }

        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let code_name = parts.pop().unwrap_or_default();

        let mut modifiers = Modifiers::none();
        for name in parts {
            modifiers = modifiers.with(parse_modifier(name)?);
        }

        let code = KeyCode::from_code_name(code_name)
            .ok_or_else(|| DescriptorError::UnknownKeyCode(code_name.to_string()))?;
        if code.is_modifier() {
            return Err(DescriptorError::ModifierKey(code_name.to_string()));
        }

        Ok(Self { code, modifiers })
    }
}

/// Resolves a modifier name such as `Ctrl` or `option`, ignoring case
pub fn parse_modifier(name: &str) -> Result<Modifiers, DescriptorError> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(Modifiers::CTRL),
        "alt" | "option" => Ok(Modifiers::ALT),
        "shift" => Ok(Modifiers::SHIFT),
        "meta" | "super" | "cmd" => Ok(Modifiers::META),
        _ => Err(DescriptorError::UnknownModifier(name.to_string())),
    }
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.modifiers.is_empty() {
            write!(f, "{}+", self.modifiers)?;
        }
        f.write_str(self.code.code_name())
    }
}

impl TryFrom<String> for KeyDescriptor {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyDescriptor> for String {
    fn from(descriptor: KeyDescriptor) -> Self {
        descriptor.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_key() {
        let descriptor: KeyDescriptor = "KeyX".parse().unwrap();
        assert_eq!(descriptor, KeyDescriptor::key(KeyCode::X));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let descriptor: KeyDescriptor = "shift+keye".parse().unwrap();
        assert_eq!(descriptor, KeyDescriptor::new(KeyCode::E, Modifiers::SHIFT));
    }

    #[test]
    fn test_parse_multiple_modifiers() {
        let descriptor: KeyDescriptor = "Ctrl + Alt + Digit1".parse().unwrap();
        assert_eq!(
            descriptor,
            KeyDescriptor::new(KeyCode::Num1, Modifiers::CTRL.with(Modifiers::ALT))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<KeyDescriptor>(), Err(DescriptorError::Empty));
        assert_eq!(
            "x".parse::<KeyDescriptor>(),
            Err(DescriptorError::UnknownKeyCode("x".to_string()))
        );
        assert_eq!(
            "Hyper+KeyX".parse::<KeyDescriptor>(),
            Err(DescriptorError::UnknownModifier("Hyper".to_string()))
        );
        assert_eq!(
            "ControlLeft".parse::<KeyDescriptor>(),
            Err(DescriptorError::ModifierKey("ControlLeft".to_string()))
        );
    }

    #[test]
    fn test_display_is_canonical() {
        let descriptor: KeyDescriptor = "alt+shift+keyq".parse().unwrap();
        assert_eq!(descriptor.to_string(), "Alt+Shift+KeyQ");
        assert_eq!(KeyDescriptor::key(KeyCode::X).to_string(), "KeyX");
    }

    #[test]
    fn test_matches_ignores_held_modifier() {
        let close = KeyDescriptor::key(KeyCode::X);
        let event = KeyEvent::pressed(KeyCode::X, Modifiers::CTRL);

        assert!(close.matches(&event, Modifiers::CTRL));
        assert!(!close.matches(&event, Modifiers::ALT));
    }

    #[test]
    fn test_matches_requires_exact_extra_modifiers() {
        let close = KeyDescriptor::key(KeyCode::X);
        let shifted = KeyDescriptor::new(KeyCode::X, Modifiers::SHIFT);
        let event = KeyEvent::pressed(KeyCode::X, Modifiers::CTRL.with(Modifiers::SHIFT));

        assert!(!close.matches(&event, Modifiers::CTRL));
        assert!(shifted.matches(&event, Modifiers::CTRL));
        assert!(!shifted.matches(&KeyEvent::pressed(KeyCode::X, Modifiers::CTRL), Modifiers::CTRL));
    }

    #[test]
    fn test_matches_requires_same_code() {
        let close = KeyDescriptor::key(KeyCode::X);
        let event = KeyEvent::pressed(KeyCode::E, Modifiers::CTRL);
        assert!(!close.matches(&event, Modifiers::CTRL));
    }

    #[test]
    fn test_serde_as_string() {
        let descriptor = KeyDescriptor::new(KeyCode::E, Modifiers::SHIFT);
        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(json, "\"Shift+KeyE\"");

        let back: KeyDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
        assert!(serde_json::from_str::<KeyDescriptor>("\"Nope\"").is_err());
    }
}
