//! Gesture key configuration

use input_types::{KeyCode, KeyEvent, Modifiers};
use serde::{Deserialize, Serialize};
use services_jump_commands::KeyDescriptor;

/// The modifier that is held for the whole gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldModifier {
    #[default]
    Ctrl,
    Alt,
    Shift,
    Meta,
}

impl HoldModifier {
    pub fn flag(&self) -> Modifiers {
        match self {
            Self::Ctrl => Modifiers::CTRL,
            Self::Alt => Modifiers::ALT,
            Self::Shift => Modifiers::SHIFT,
            Self::Meta => Modifiers::META,
        }
    }

    /// Returns true for either physical key of this modifier
    pub fn is_key(&self, code: KeyCode) -> bool {
        code.modifier_flag() == Some(self.flag())
    }
}

/// Keys recognised while the hold modifier is down
///
/// Key descriptors are compared with the hold modifier stripped, so
/// `"KeyJ"` means Ctrl+J when the hold modifier is Ctrl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    pub hold: HoldModifier,
    /// Opens the overlay, then advances the selection
    pub trigger: KeyDescriptor,
    pub previous: KeyDescriptor,
    pub next: KeyDescriptor,
    /// Closes the overlay without jumping
    pub cancel: KeyDescriptor,
}

impl GestureSettings {
    /// Classifies a key-down pressed during the gesture
    pub fn action_for(&self, event: &KeyEvent) -> Option<GestureKey> {
        let held = self.hold.flag();
        [
            (self.trigger, GestureKey::Trigger),
            (self.previous, GestureKey::Previous),
            (self.next, GestureKey::Next),
            (self.cancel, GestureKey::Cancel),
        ]
        .into_iter()
        .find(|(key, _)| key.matches(event, held))
        .map(|(_, action)| action)
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            hold: HoldModifier::Ctrl,
            trigger: KeyDescriptor::key(KeyCode::J),
            previous: KeyDescriptor::key(KeyCode::Up),
            next: KeyDescriptor::key(KeyCode::Down),
            cancel: KeyDescriptor::key(KeyCode::Left),
        }
    }
}

/// Role of a gesture key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKey {
    Trigger,
    Previous,
    Next,
    Cancel,
}
