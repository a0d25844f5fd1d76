//! # Simulated Host
//!
//! In-memory document host for deterministic runs. Keeps the open document
//! list, the active document, stored settings text and a small command
//! registry, and records every visible side effect as a log line.

use jump_types::{
    DocumentHandle, DocumentId, JumpHost, OpenDocument, Size, MISSING_CLASS, SHADOW_CLASS,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Commands the simulated host registers
pub const CLOSE_COMMAND: &str = "close";
pub const EDIT_COMMAND: &str = "edit";

/// Document host backed by plain collections
#[derive(Debug, Clone)]
pub struct SimHost {
    documents: Vec<OpenDocument>,
    active: Option<DocumentId>,
    commands: BTreeSet<String>,
    settings: BTreeMap<String, String>,
    claimed: BTreeSet<String>,
    animations: bool,
    viewport: Size,
    log: Vec<String>,
}

impl SimHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            documents: Vec::new(),
            active: None,
            commands: [CLOSE_COMMAND, EDIT_COMMAND]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            settings: BTreeMap::new(),
            claimed: BTreeSet::new(),
            animations: true,
            viewport,
            log: Vec::new(),
        }
    }

    /// Opens a document at the end of the host order
    ///
    /// Returns false if a document with this id is already open.
    pub fn open(&mut self, document: OpenDocument) -> bool {
        if self.is_open(&document.id) {
            return false;
        }
        debug!(document = %document.id, "host opened document");
        self.documents.push(document);
        true
    }

    /// Closes a document; returns false if it was not open
    pub fn close(&mut self, id: &DocumentId) -> bool {
        let before = self.documents.len();
        self.documents.retain(|doc| &doc.id != id);
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        before != self.documents.len()
    }

    pub fn is_open(&self, id: &DocumentId) -> bool {
        self.documents.iter().any(|doc| &doc.id == id)
    }

    pub fn documents(&self) -> &[OpenDocument] {
        &self.documents
    }

    pub fn active(&self) -> Option<&DocumentId> {
        self.active.as_ref()
    }

    pub fn set_active(&mut self, id: &DocumentId) {
        self.active = Some(id.clone());
    }

    /// Stores settings text as if a user had saved it
    pub fn store_settings(&mut self, settings_id: &str, text: impl Into<String>) {
        self.settings.insert(settings_id.to_string(), text.into());
    }

    pub fn stored_settings(&self, settings_id: &str) -> Option<&str> {
        self.settings.get(settings_id).map(String::as_str)
    }

    pub fn is_claimed(&self, command: &str) -> bool {
        self.claimed.contains(command)
    }

    /// Removes and returns the side-effect log
    pub fn take_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}

impl JumpHost for SimHost {
    fn open_documents(&self) -> Vec<OpenDocument> {
        self.documents.clone()
    }

    fn activate_document(&mut self, document: &DocumentHandle) {
        let how = if document.status.editable {
            "focus editor"
        } else {
            "scroll into view"
        };
        self.log.push(format!("activate {} ({})", document.id, how));
        self.active = Some(document.id.clone());
    }

    fn has_command(&self, name: &str) -> bool {
        self.commands.contains(name)
    }

    fn run_command(&mut self, name: &str, document: &DocumentId) {
        self.log.push(format!(
            "command {} {} (animations {})",
            name,
            document,
            if self.animations { "on" } else { "off" }
        ));
        match name {
            CLOSE_COMMAND => {
                self.close(document);
            }
            EDIT_COMMAND => {
                if let Some(doc) = self.documents.iter_mut().find(|doc| &doc.id == document) {
                    doc.has_editor = true;
                }
            }
            _ => {}
        }
    }

    fn config_text(&self, settings_id: &str) -> Option<String> {
        self.settings.get(settings_id).cloned()
    }

    fn publish_config_text(&mut self, settings_id: &str, text: &str) {
        self.log.push(format!("publish {}", settings_id));
        self.settings.insert(settings_id.to_string(), text.to_string());
    }

    fn animations_enabled(&self) -> bool {
        self.animations
    }

    fn set_animations_enabled(&mut self, enabled: bool) {
        self.animations = enabled;
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn claim_command(&mut self, name: &str) {
        if self.claimed.insert(name.to_string()) {
            self.log.push(format!("claim {}", name));
        }
    }
}

/// Builds a host document from script flags
pub fn scripted_document(title: &str, shadow: bool, missing: bool, editing: bool) -> OpenDocument {
    let mut document = OpenDocument::new(title);
    if shadow {
        document = document.with_class(SHADOW_CLASS);
    }
    if missing {
        document = document.with_class(MISSING_CLASS);
    }
    if editing {
        document = document.with_editor();
    }
    document
}
