//! Host capability set
//!
//! The jump-keys services never reach into host globals. Every query or
//! side effect on the host application goes through this trait, which the
//! host implements once and passes in explicitly.

use crate::{DocumentHandle, DocumentId, OpenDocument, Size};

/// Capabilities the host application provides to the jump-keys services
pub trait JumpHost {
    /// Reports the currently open documents, in host order
    fn open_documents(&self) -> Vec<OpenDocument>;

    /// Brings a document into focus/view
    ///
    /// Editable documents should get their editor focused; others scrolled
    /// into view.
    fn activate_document(&mut self, document: &DocumentHandle);

    /// Returns true if a command with a handler is registered under `name`
    fn has_command(&self, name: &str) -> bool;

    /// Runs a registered command against a document
    ///
    /// Only called after [`JumpHost::has_command`] returned true.
    fn run_command(&mut self, name: &str, document: &DocumentId);

    /// Reads persisted configuration text
    fn config_text(&self, settings_id: &str) -> Option<String>;

    /// Publishes configuration text so users can edit it
    fn publish_config_text(&mut self, settings_id: &str, text: &str);

    /// Reads the global transition animation setting
    fn animations_enabled(&self) -> bool;

    /// Writes the global transition animation setting
    fn set_animations_enabled(&mut self, enabled: bool);

    /// Size of the host viewport the overlay is centered in
    fn viewport_size(&self) -> Size;

    /// Routes the host's own "jump" command to the overlay instead of its
    /// original UI
    fn claim_command(&mut self, _name: &str) {}
}
