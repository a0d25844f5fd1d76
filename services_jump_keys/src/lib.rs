//! # Jump Keys
//!
//! Host adapter that wires the recency tracker, jump overlay, command
//! bindings and hold-key gesture into one component the host feeds with
//! events and lifecycle notifications.
//!
//! ## Philosophy
//!
//! - **Owned host**: `JumpKeys` owns its host adapter; there is no ambient
//!   state and no second instance to fall out of sync with
//! - **Install once**: Installing is guarded by a flag, so repeated
//!   initialization leaves exactly one set of hooks
//! - **Quiet before install**: Hooks do nothing until [`JumpKeys::install`]
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A settings editor (users edit the published bindings text)
//! - A renderer (see [`JumpKeys::frame`])

pub mod config;

pub use config::{JumpKeysConfig, JUMP_COMMAND};

use input_types::InputEvent;
use jump_types::{DocumentId, JumpHost};
use services_jump_commands::CommandDispatcher;
use services_jump_gesture::{EventDisposition, GestureInterpreter, JumpContext};
use services_jump_overlay::{OverlayController, OverlayFrame};
use services_recency::RecencyTracker;
use tracing::{debug, info};

/// Jump-list overlay attached to a host
pub struct JumpKeys<H: JumpHost> {
    host: H,
    config: JumpKeysConfig,
    recency: RecencyTracker,
    overlay: OverlayController,
    commands: CommandDispatcher,
    gesture: GestureInterpreter,
    installed: bool,
}

impl<H: JumpHost> JumpKeys<H> {
    pub fn new(host: H, config: JumpKeysConfig) -> Self {
        Self {
            host,
            recency: RecencyTracker::new(),
            overlay: OverlayController::new(config.overlay),
            commands: CommandDispatcher::default(),
            gesture: GestureInterpreter::new(config.gesture),
            config,
            installed: false,
        }
    }

    /// Loads bindings and takes over the host's jump command
    ///
    /// Returns false if already installed; nothing is repeated.
    pub fn install(&mut self) -> bool {
        if self.installed {
            debug!("jump keys already installed");
            return false;
        }

        self.commands = CommandDispatcher::load_from_host(&mut self.host);
        if self.config.override_jump_command {
            self.host.claim_command(JUMP_COMMAND);
        }
        self.installed = true;
        info!(
            bindings = self.commands.bindings().len(),
            override_jump = self.config.override_jump_command,
            "jump keys installed"
        );
        true
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// The host is about to display a document
    pub fn on_document_displayed(&mut self, id: &DocumentId) {
        if self.installed {
            self.recency.push(id.clone());
        }
    }

    /// A document's container received input focus
    pub fn on_document_focused(&mut self, id: &DocumentId) {
        if self.installed {
            self.recency.push(id.clone());
        }
    }

    /// The host closed a document outside of a jump command
    pub fn on_document_closed(&mut self, id: &DocumentId) {
        if !self.installed {
            return;
        }
        self.recency.remove(id);
        self.overlay.refresh(&self.host, &self.recency);
    }

    /// The host's jump command was invoked
    ///
    /// Returns true if the overlay opened in response.
    pub fn on_jump_command(&mut self) -> bool {
        if !self.installed || !self.config.override_jump_command {
            return false;
        }
        self.overlay.show(&self.host, &self.recency)
    }

    /// The host stylesheet or theme changed
    pub fn on_theme_changed(&mut self) {
        if self.installed {
            self.overlay.restyle();
        }
    }

    /// Feeds one host input event through the gesture
    pub fn handle_event(&mut self, event: &InputEvent) -> EventDisposition {
        if !self.installed {
            return EventDisposition::PassThrough;
        }

        let mut ctx = JumpContext {
            host: &mut self.host,
            recency: &mut self.recency,
            overlay: &mut self.overlay,
            commands: &self.commands,
        };
        self.gesture.handle_event(event, &mut ctx)
    }

    /// Renders the overlay; `None` while closed
    pub fn frame(&self) -> Option<OverlayFrame> {
        self.overlay.frame()
    }

    pub fn config(&self) -> &JumpKeysConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn recency(&self) -> &RecencyTracker {
        &self.recency
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn commands(&self) -> &CommandDispatcher {
        &self.commands
    }

    pub fn gesture(&self) -> &GestureInterpreter {
        &self.gesture
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_types::{KeyCode, KeyEvent, Modifiers};
    use jump_types::fake::FakeHost;
    use pretty_assertions::assert_eq;
    use services_jump_commands::SETTINGS_ID;

    fn uninstalled(titles: &[&str]) -> JumpKeys<FakeHost> {
        JumpKeys::new(FakeHost::with_documents(titles), JumpKeysConfig::default())
    }

    fn installed(titles: &[&str]) -> JumpKeys<FakeHost> {
        let mut keys = uninstalled(titles);
        keys.install();
        keys
    }

    fn key(keys: &mut JumpKeys<FakeHost>, event: KeyEvent) -> EventDisposition {
        keys.handle_event(&InputEvent::key(event))
    }

    #[test]
    fn test_install_is_idempotent() {
        let mut keys = uninstalled(&["A", "B"]);

        assert!(keys.install());
        assert!(!keys.install());
        assert!(keys.is_installed());

        keys.on_document_displayed(&DocumentId::new("A"));
        assert_eq!(keys.recency().len(), 1);
        assert_eq!(keys.host().claimed, vec![JUMP_COMMAND.to_string()]);
        assert_eq!(keys.host().published.len(), 1);
        assert_eq!(keys.host().published[0].0, SETTINGS_ID);
    }

    #[test]
    fn test_hooks_inactive_before_install() {
        let mut keys = uninstalled(&["A", "B"]);

        keys.on_document_displayed(&DocumentId::new("A"));
        assert!(keys.recency().is_empty());
        assert!(!keys.on_jump_command());

        let disposition = key(&mut keys, KeyEvent::pressed(KeyCode::LeftCtrl, Modifiers::CTRL));
        assert_eq!(disposition, EventDisposition::PassThrough);
        assert!(!keys.gesture().is_modifier_held());
    }

    #[test]
    fn test_display_and_focus_touch_recency() {
        let mut keys = installed(&["A", "B", "C"]);

        keys.on_document_displayed(&DocumentId::new("C"));
        keys.on_document_focused(&DocumentId::new("B"));
        keys.on_document_displayed(&DocumentId::new("C"));

        let order: Vec<&str> = keys.recency().iter().map(|id| id.as_str()).collect();
        assert_eq!(order, vec!["C", "B"]);
    }

    #[test]
    fn test_jump_command_opens_overlay() {
        let mut keys = installed(&["A", "B"]);

        assert!(keys.on_jump_command());
        assert!(!keys.on_jump_command());
        assert_eq!(keys.frame().unwrap().rows.len(), 2);
    }

    #[test]
    fn test_jump_command_not_overridden() {
        let config = JumpKeysConfig {
            override_jump_command: false,
            ..JumpKeysConfig::default()
        };
        let mut keys = JumpKeys::new(FakeHost::with_documents(&["A", "B"]), config);
        keys.install();

        assert!(keys.host().claimed.is_empty());
        assert!(!keys.on_jump_command());
        assert!(keys.frame().is_none());
    }

    #[test]
    fn test_external_close_refreshes_overlay() {
        let mut keys = installed(&["A", "B", "C"]);
        keys.on_document_displayed(&DocumentId::new("C"));
        keys.on_jump_command();

        let closed = DocumentId::new("C");
        keys.host_mut().close(&closed);
        keys.on_document_closed(&closed);

        assert!(!keys.recency().contains(&closed));
        let frame = keys.frame().unwrap();
        let titles: Vec<String> = frame.rows.into_iter().map(|row| row.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_theme_change_bumps_revision_only() {
        let mut keys = installed(&["A", "B"]);
        keys.on_jump_command();
        let before = keys.frame().unwrap();

        keys.on_theme_changed();
        let after = keys.frame().unwrap();

        assert_eq!(after.revision, before.revision + 1);
        assert_eq!(after.rows, before.rows);
    }

    #[test]
    fn test_full_gesture_through_adapter() {
        let mut keys = installed(&["A", "B", "C"]);
        keys.on_document_displayed(&DocumentId::new("B"));

        key(&mut keys, KeyEvent::pressed(KeyCode::LeftCtrl, Modifiers::CTRL));
        assert!(key(&mut keys, KeyEvent::pressed(KeyCode::J, Modifiers::CTRL)).is_consumed());
        key(&mut keys, KeyEvent::pressed(KeyCode::Down, Modifiers::CTRL));
        key(&mut keys, KeyEvent::released(KeyCode::LeftCtrl, Modifiers::none()));

        assert!(keys.frame().is_none());
        assert_eq!(keys.host().activated_titles(), vec!["C"]);
        let order: Vec<&str> = keys.recency().iter().map(|id| id.as_str()).collect();
        assert_eq!(order, vec!["C", "B"]);
    }

    #[test]
    fn test_stored_bindings_drive_commands() {
        let mut host = FakeHost::with_documents(&["A", "B"]);
        host.config
            .insert(SETTINGS_ID.to_string(), r#"{ "x": "close" }"#.to_string());
        let mut keys = JumpKeys::new(host, JumpKeysConfig::default());
        keys.install();

        key(&mut keys, KeyEvent::pressed(KeyCode::LeftCtrl, Modifiers::CTRL));
        key(&mut keys, KeyEvent::pressed(KeyCode::J, Modifiers::CTRL));
        key(&mut keys, KeyEvent::pressed(KeyCode::X, Modifiers::CTRL));

        assert_eq!(keys.host().documents.len(), 1);
        assert!(keys.frame().is_some());
        assert_eq!(
            keys.host().config_text(SETTINGS_ID).as_deref(),
            Some("{\n  \"close\": \"KeyX\"\n}")
        );
    }
}
