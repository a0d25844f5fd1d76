//! # Jump Commands
//!
//! Single-key commands run against the selected overlay document while the
//! hold modifier is down.
//!
//! ## Philosophy
//!
//! - **Never fatal**: A broken configuration falls back to the built-in
//!   bindings; an unregistered command is skipped
//! - **Host-owned commands**: This crate only maps keys to command names; the
//!   host registry decides what a command does
//! - **Synchronous round trip**: Host animations are paused while a command
//!   runs so the overlay can re-render against the final document set
//!
//! ## Example
//!
//! ```ignore
//! let dispatcher = CommandDispatcher::load_from_host(&mut host);
//! if let Some(command) = dispatcher.command_for(&event, Modifiers::CTRL) {
//!     dispatcher.invoke(&mut host, command, &document);
//! }
//! ```

pub mod bindings;
pub mod descriptor;

pub use bindings::{BindingsError, BindingsFormat, HotkeyBindings, SETTINGS_ID};
pub use descriptor::{parse_modifier, DescriptorError, KeyDescriptor};

use input_types::{KeyEvent, Modifiers};
use jump_types::{DocumentId, JumpHost};
use tracing::{debug, trace};

/// Disables host animations until dropped, then restores the prior setting
struct AnimationPause<'a, H: JumpHost + ?Sized> {
    host: &'a mut H,
    previous: bool,
}

impl<'a, H: JumpHost + ?Sized> AnimationPause<'a, H> {
    fn new(host: &'a mut H) -> Self {
        let previous = host.animations_enabled();
        host.set_animations_enabled(false);
        Self { host, previous }
    }

    fn host(&mut self) -> &mut H {
        self.host
    }
}

impl<H: JumpHost + ?Sized> Drop for AnimationPause<'_, H> {
    fn drop(&mut self) {
        self.host.set_animations_enabled(self.previous);
    }
}

/// Maps key presses to host commands and runs them
#[derive(Debug, Clone, Default)]
pub struct CommandDispatcher {
    bindings: HotkeyBindings,
}

impl CommandDispatcher {
    pub fn new(bindings: HotkeyBindings) -> Self {
        Self { bindings }
    }

    /// Loads bindings from the host configuration
    ///
    /// Missing or malformed configuration yields the defaults. The effective
    /// bindings are published back when nothing was stored yet or a legacy
    /// table was migrated.
    pub fn load_from_host<H: JumpHost + ?Sized>(host: &mut H) -> Self {
        let Some(text) = host.config_text(SETTINGS_ID) else {
            let bindings = HotkeyBindings::defaults();
            debug!("no stored bindings, publishing defaults");
            host.publish_config_text(SETTINGS_ID, &bindings.to_json());
            return Self::new(bindings);
        };

        match HotkeyBindings::from_json(&text) {
            Ok((bindings, BindingsFormat::Descriptors)) => Self::new(bindings),
            Ok((bindings, BindingsFormat::LegacyCharacters)) => {
                debug!(commands = bindings.len(), "migrated legacy bindings");
                host.publish_config_text(SETTINGS_ID, &bindings.to_json());
                Self::new(bindings)
            }
            Err(err) => {
                debug!(error = %err, "ignoring stored bindings, using defaults");
                Self::new(HotkeyBindings::defaults())
            }
        }
    }

    pub fn bindings(&self) -> &HotkeyBindings {
        &self.bindings
    }

    /// Returns the command bound to `event`, if any
    pub fn command_for(&self, event: &KeyEvent, held: Modifiers) -> Option<&str> {
        self.bindings.command_for(event, held)
    }

    /// Runs a host command against `document` with animations paused
    ///
    /// Returns false without side effects if the host has no such command.
    pub fn invoke<H: JumpHost + ?Sized>(
        &self,
        host: &mut H,
        command: &str,
        document: &DocumentId,
    ) -> bool {
        if !host.has_command(command) {
            trace!(command, "command not registered");
            return false;
        }

        debug!(command, document = %document, "invoking command");
        let mut pause = AnimationPause::new(host);
        pause.host().run_command(command, document);
        true
    }
}
