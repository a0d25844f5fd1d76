#![no_std]

//! # Input Types
//!
//! Structured input events consumed by the jump-keys services.
//!
//! ## Philosophy
//!
//! - **Events, not bytes**: Input is structured events, not raw scan codes
//! - **Physical keys**: Key codes name the physical key (`KeyX`, `ArrowUp`),
//!   so bindings keep working under any keyboard layout
//! - **Testable**: Events are serializable and can be injected for testing
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - Raw hardware scan codes (PS/2, USB HID)
//! - Text input / IME composition
//! - Global keyboard state

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Input event delivered by the host event queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Keyboard event
    Key(KeyEvent),
    /// Pointer (mouse/touch) event
    Pointer(PointerEvent),
    /// Window-level event (focus changes)
    Window(WindowEvent),
}

impl InputEvent {
    /// Creates a key event
    pub fn key(event: KeyEvent) -> Self {
        Self::Key(event)
    }

    /// Creates a pointer-down event at the given position
    pub fn pointer_down(x: i32, y: i32) -> Self {
        Self::Pointer(PointerEvent::down(x, y))
    }

    /// Creates a window blur event
    pub fn blur() -> Self {
        Self::Window(WindowEvent::Blur)
    }

    /// Returns the key event if this is a key event
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(event) => Some(event),
            _ => None,
        }
    }
}

/// Keyboard event
///
/// Represents a single keyboard state change (key press, release, or repeat).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The physical key that changed state
    pub code: KeyCode,
    /// Modifier keys active when the event fired
    pub modifiers: Modifiers,
    /// Event state (pressed, released, repeat)
    pub state: KeyState,
}

impl KeyEvent {
    /// Creates a new key event
    pub fn new(code: KeyCode, modifiers: Modifiers, state: KeyState) -> Self {
        Self {
            code,
            modifiers,
            state,
        }
    }

    /// Creates a key pressed event
    pub fn pressed(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Pressed)
    }

    /// Creates a key released event
    pub fn released(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Released)
    }

    /// Creates a key repeat event
    pub fn repeat(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Repeat)
    }

    /// Returns true for key-down events, auto-repeat included
    pub fn is_down(&self) -> bool {
        matches!(self.state, KeyState::Pressed | KeyState::Repeat)
    }

    /// Returns true if this is a release event
    pub fn is_released(&self) -> bool {
        self.state == KeyState::Released
    }

    /// Returns true if this is a repeat event
    pub fn is_repeat(&self) -> bool {
        self.state == KeyState::Repeat
    }
}

/// Key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    /// Key was pressed down
    Pressed,
    /// Key was released
    Released,
    /// Key is auto-repeating
    Repeat,
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressed => write!(f, "pressed"),
            Self::Released => write!(f, "released"),
            Self::Repeat => write!(f, "repeat"),
        }
    }
}

/// Pointer event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    /// Primary button went down
    Down,
}

/// Pointer event in host viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub kind: PointerKind,
}

impl PointerEvent {
    /// Creates a pointer-down event
    pub fn down(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            kind: PointerKind::Down,
        }
    }
}

/// Window-level event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowEvent {
    /// The host window lost input focus
    Blur,
    /// The host window regained input focus
    Focus,
}

/// Physical key code
///
/// Names follow the physical key position, not the produced character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Digit row
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Modifier keys
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftMeta,
    RightMeta,

    // Editing and navigation
    Escape,
    Tab,
    Space,
    Enter,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,

    // Punctuation
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Grave,

    // Unknown/unmapped key
    Unknown,
}

/// Physical code names, as reported by browser-style `KeyboardEvent.code`
const CODE_NAMES: &[(KeyCode, &str)] = &[
    (KeyCode::A, "KeyA"),
    (KeyCode::B, "KeyB"),
    (KeyCode::C, "KeyC"),
    (KeyCode::D, "KeyD"),
    (KeyCode::E, "KeyE"),
    (KeyCode::F, "KeyF"),
    (KeyCode::G, "KeyG"),
    (KeyCode::H, "KeyH"),
    (KeyCode::I, "KeyI"),
    (KeyCode::J, "KeyJ"),
    (KeyCode::K, "KeyK"),
    (KeyCode::L, "KeyL"),
    (KeyCode::M, "KeyM"),
    (KeyCode::N, "KeyN"),
    (KeyCode::O, "KeyO"),
    (KeyCode::P, "KeyP"),
    (KeyCode::Q, "KeyQ"),
    (KeyCode::R, "KeyR"),
    (KeyCode::S, "KeyS"),
    (KeyCode::T, "KeyT"),
    (KeyCode::U, "KeyU"),
    (KeyCode::V, "KeyV"),
    (KeyCode::W, "KeyW"),
    (KeyCode::X, "KeyX"),
    (KeyCode::Y, "KeyY"),
    (KeyCode::Z, "KeyZ"),
    (KeyCode::Num0, "Digit0"),
    (KeyCode::Num1, "Digit1"),
    (KeyCode::Num2, "Digit2"),
    (KeyCode::Num3, "Digit3"),
    (KeyCode::Num4, "Digit4"),
    (KeyCode::Num5, "Digit5"),
    (KeyCode::Num6, "Digit6"),
    (KeyCode::Num7, "Digit7"),
    (KeyCode::Num8, "Digit8"),
    (KeyCode::Num9, "Digit9"),
    (KeyCode::F1, "F1"),
    (KeyCode::F2, "F2"),
    (KeyCode::F3, "F3"),
    (KeyCode::F4, "F4"),
    (KeyCode::F5, "F5"),
    (KeyCode::F6, "F6"),
    (KeyCode::F7, "F7"),
    (KeyCode::F8, "F8"),
    (KeyCode::F9, "F9"),
    (KeyCode::F10, "F10"),
    (KeyCode::F11, "F11"),
    (KeyCode::F12, "F12"),
    (KeyCode::LeftShift, "ShiftLeft"),
    (KeyCode::RightShift, "ShiftRight"),
    (KeyCode::LeftCtrl, "ControlLeft"),
    (KeyCode::RightCtrl, "ControlRight"),
    (KeyCode::LeftAlt, "AltLeft"),
    (KeyCode::RightAlt, "AltRight"),
    (KeyCode::LeftMeta, "MetaLeft"),
    (KeyCode::RightMeta, "MetaRight"),
    (KeyCode::Escape, "Escape"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::Space, "Space"),
    (KeyCode::Enter, "Enter"),
    (KeyCode::Backspace, "Backspace"),
    (KeyCode::Delete, "Delete"),
    (KeyCode::Insert, "Insert"),
    (KeyCode::Home, "Home"),
    (KeyCode::End, "End"),
    (KeyCode::PageUp, "PageUp"),
    (KeyCode::PageDown, "PageDown"),
    (KeyCode::Up, "ArrowUp"),
    (KeyCode::Down, "ArrowDown"),
    (KeyCode::Left, "ArrowLeft"),
    (KeyCode::Right, "ArrowRight"),
    (KeyCode::Minus, "Minus"),
    (KeyCode::Equal, "Equal"),
    (KeyCode::LeftBracket, "BracketLeft"),
    (KeyCode::RightBracket, "BracketRight"),
    (KeyCode::Backslash, "Backslash"),
    (KeyCode::Semicolon, "Semicolon"),
    (KeyCode::Quote, "Quote"),
    (KeyCode::Comma, "Comma"),
    (KeyCode::Period, "Period"),
    (KeyCode::Slash, "Slash"),
    (KeyCode::Grave, "Backquote"),
];

impl KeyCode {
    /// Parses a physical code name (`"KeyX"`, `"arrowup"`), ignoring case
    pub fn from_code_name(name: &str) -> Option<Self> {
        CODE_NAMES
            .iter()
            .find(|(_, code_name)| code_name.eq_ignore_ascii_case(name))
            .map(|(code, _)| *code)
    }

    /// Returns the canonical physical code name
    pub fn code_name(&self) -> &'static str {
        CODE_NAMES
            .iter()
            .find(|(code, _)| code == self)
            .map(|(_, name)| *name)
            .unwrap_or("Unidentified")
    }

    /// Maps a character to the key that produces it on a US layout
    pub fn from_char(c: char) -> Option<Self> {
        let name = match c.to_ascii_uppercase() {
            upper @ 'A'..='Z' => return Self::lookup_prefixed("Key", upper),
            digit @ '0'..='9' => return Self::lookup_prefixed("Digit", digit),
            ' ' => "Space",
            '-' => "Minus",
            '=' => "Equal",
            '[' => "BracketLeft",
            ']' => "BracketRight",
            '\\' => "Backslash",
            ';' => "Semicolon",
            '\'' => "Quote",
            ',' => "Comma",
            '.' => "Period",
            '/' => "Slash",
            '`' => "Backquote",
            _ => return None,
        };
        Self::from_code_name(name)
    }

    fn lookup_prefixed(prefix: &str, c: char) -> Option<Self> {
        let mut name = String::with_capacity(prefix.len() + 1);
        name.push_str(prefix);
        name.push(c);
        Self::from_code_name(&name)
    }

    /// Returns the modifier flag this key controls, if it is a modifier key
    pub fn modifier_flag(&self) -> Option<Modifiers> {
        match self {
            Self::LeftCtrl | Self::RightCtrl => Some(Modifiers::CTRL),
            Self::LeftAlt | Self::RightAlt => Some(Modifiers::ALT),
            Self::LeftShift | Self::RightShift => Some(Modifiers::SHIFT),
            Self::LeftMeta | Self::RightMeta => Some(Modifiers::META),
            _ => None,
        }
    }

    /// Returns true for Ctrl/Alt/Shift/Meta keys
    pub fn is_modifier(&self) -> bool {
        self.modifier_flag().is_some()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code_name())
    }
}

/// Modifier keys
///
/// Bitflags representing modifier key states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self { bits: 0 };
    /// Control key
    pub const CTRL: Self = Self { bits: 1 << 0 };
    /// Alt key
    pub const ALT: Self = Self { bits: 1 << 1 };
    /// Shift key
    pub const SHIFT: Self = Self { bits: 1 << 2 };
    /// Meta/Super/Windows key
    pub const META: Self = Self { bits: 1 << 3 };

    /// Creates a new modifier set with no modifiers
    pub fn none() -> Self {
        Self::NONE
    }

    /// Returns the raw bits
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Adds a modifier
    pub fn with(mut self, other: Modifiers) -> Self {
        self.bits |= other.bits;
        self
    }

    /// Removes a modifier
    pub fn without(mut self, other: Modifiers) -> Self {
        self.bits &= !other.bits;
        self
    }

    /// Checks if a modifier is present
    pub fn contains(&self, other: Modifiers) -> bool {
        (self.bits & other.bits) == other.bits
    }

    pub fn is_ctrl(&self) -> bool {
        self.contains(Self::CTRL)
    }

    pub fn is_alt(&self) -> bool {
        self.contains(Self::ALT)
    }

    pub fn is_shift(&self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub fn is_meta(&self) -> bool {
        self.contains(Self::META)
    }

    /// Returns true if no modifiers are pressed
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }

        let mut parts = Vec::new();
        if self.is_ctrl() {
            parts.push("Ctrl");
        }
        if self.is_alt() {
            parts.push("Alt");
        }
        if self.is_shift() {
            parts.push("Shift");
        }
        if self.is_meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_key_event_down_includes_repeat() {
        let pressed = KeyEvent::pressed(KeyCode::J, Modifiers::CTRL);
        let repeat = KeyEvent::repeat(KeyCode::J, Modifiers::CTRL);
        let released = KeyEvent::released(KeyCode::J, Modifiers::CTRL);

        assert!(pressed.is_down());
        assert!(repeat.is_down());
        assert!(repeat.is_repeat());
        assert!(!released.is_down());
        assert!(released.is_released());
    }

    #[test]
    fn test_input_event_as_key() {
        let key_event = KeyEvent::pressed(KeyCode::A, Modifiers::none());
        let event = InputEvent::key(key_event.clone());
        assert_eq!(event.as_key(), Some(&key_event));

        assert!(InputEvent::blur().as_key().is_none());
        assert!(InputEvent::pointer_down(1, 2).as_key().is_none());
    }

    #[test]
    fn test_code_name_parsing_ignores_case() {
        assert_eq!(KeyCode::from_code_name("KeyX"), Some(KeyCode::X));
        assert_eq!(KeyCode::from_code_name("keyx"), Some(KeyCode::X));
        assert_eq!(KeyCode::from_code_name("ARROWUP"), Some(KeyCode::Up));
        assert_eq!(KeyCode::from_code_name("Digit7"), Some(KeyCode::Num7));
        assert_eq!(KeyCode::from_code_name("x"), None);
        assert_eq!(KeyCode::from_code_name("Hyper"), None);
    }

    #[test]
    fn test_code_names_are_unique() {
        for (i, (code_a, name_a)) in CODE_NAMES.iter().enumerate() {
            for (code_b, name_b) in &CODE_NAMES[i + 1..] {
                assert_ne!(code_a, code_b);
                assert!(!name_a.eq_ignore_ascii_case(name_b));
            }
        }
    }

    #[test]
    fn test_code_name_display() {
        assert_eq!(KeyCode::E.to_string(), "KeyE");
        assert_eq!(KeyCode::LeftCtrl.to_string(), "ControlLeft");
        assert_eq!(KeyCode::Unknown.to_string(), "Unidentified");
    }

    #[test]
    fn test_from_char() {
        assert_eq!(KeyCode::from_char('x'), Some(KeyCode::X));
        assert_eq!(KeyCode::from_char('E'), Some(KeyCode::E));
        assert_eq!(KeyCode::from_char('3'), Some(KeyCode::Num3));
        assert_eq!(KeyCode::from_char('/'), Some(KeyCode::Slash));
        assert_eq!(KeyCode::from_char('é'), None);
    }

    #[test]
    fn test_modifier_keys() {
        assert_eq!(KeyCode::LeftCtrl.modifier_flag(), Some(Modifiers::CTRL));
        assert_eq!(KeyCode::RightCtrl.modifier_flag(), Some(Modifiers::CTRL));
        assert_eq!(KeyCode::RightMeta.modifier_flag(), Some(Modifiers::META));
        assert!(KeyCode::LeftShift.is_modifier());
        assert!(!KeyCode::J.is_modifier());
    }

    #[test]
    fn test_modifiers_with_and_without() {
        let mods = Modifiers::CTRL.with(Modifiers::SHIFT);
        assert!(mods.is_ctrl());
        assert!(mods.is_shift());
        assert!(!mods.is_alt());

        let stripped = mods.without(Modifiers::CTRL);
        assert_eq!(stripped, Modifiers::SHIFT);
        assert!(Modifiers::CTRL.without(Modifiers::CTRL).is_empty());
    }

    #[test]
    fn test_modifiers_display() {
        assert_eq!(Modifiers::none().to_string(), "none");
        assert_eq!(Modifiers::CTRL.to_string(), "Ctrl");
        assert_eq!(
            Modifiers::META.with(Modifiers::CTRL).with(Modifiers::ALT).to_string(),
            "Ctrl+Alt+Meta"
        );
    }

    #[test]
    fn test_key_event_serialization() {
        let event = InputEvent::key(KeyEvent::pressed(KeyCode::J, Modifiers::CTRL));
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: InputEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event, deserialized);
    }
}
