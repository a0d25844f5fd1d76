//! Adapter configuration

use serde::{Deserialize, Serialize};
use services_jump_gesture::GestureSettings;
use services_jump_overlay::OverlayMetrics;

/// Host command that opens the jump overlay when overridden
pub const JUMP_COMMAND: &str = "jump";

/// Everything configurable about the adapter except command bindings,
/// which live in host-stored settings text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpKeysConfig {
    pub gesture: GestureSettings,
    pub overlay: OverlayMetrics,
    /// Make the host's jump command open the overlay instead of its own UI
    pub override_jump_command: bool,
}

impl Default for JumpKeysConfig {
    fn default() -> Self {
        Self {
            gesture: GestureSettings::default(),
            overlay: OverlayMetrics::default(),
            override_jump_command: true,
        }
    }
}
