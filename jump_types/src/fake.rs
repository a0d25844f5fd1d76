//! Fake host implementation for testing
//!
//! In-memory, deterministic [`JumpHost`] that records every side effect so
//! tests can assert on them. Registers `close` and `edit` commands by
//! default.

use crate::{DocumentHandle, DocumentId, JumpHost, OpenDocument, Size};
use std::collections::{BTreeMap, BTreeSet};

/// A command run recorded by [`FakeHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRun {
    pub name: String,
    pub document: DocumentId,
    /// Animation setting observed while the command ran
    pub animations_enabled: bool,
}

/// Fake host for testing
pub struct FakeHost {
    pub documents: Vec<OpenDocument>,
    pub commands: BTreeSet<String>,
    pub config: BTreeMap<String, String>,
    pub published: Vec<(String, String)>,
    pub activated: Vec<DocumentHandle>,
    pub command_runs: Vec<CommandRun>,
    pub claimed: Vec<String>,
    pub animations: bool,
    pub viewport: Size,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            commands: ["close", "edit"].iter().map(|c| c.to_string()).collect(),
            config: BTreeMap::new(),
            published: Vec::new(),
            activated: Vec::new(),
            command_runs: Vec::new(),
            claimed: Vec::new(),
            animations: true,
            viewport: Size::new(1024, 768),
        }
    }

    /// Creates a host with plain documents open, in the given order
    pub fn with_documents(titles: &[&str]) -> Self {
        let mut host = Self::new();
        host.documents = titles.iter().map(|t| OpenDocument::new(*t)).collect();
        host
    }

    pub fn open(&mut self, document: OpenDocument) {
        self.documents.push(document);
    }

    pub fn close(&mut self, id: &DocumentId) {
        self.documents.retain(|doc| &doc.id != id);
    }

    /// Titles of activated documents, in activation order
    pub fn activated_titles(&self) -> Vec<&str> {
        self.activated.iter().map(|doc| doc.id.as_str()).collect()
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpHost for FakeHost {
    fn open_documents(&self) -> Vec<OpenDocument> {
        self.documents.clone()
    }

    fn activate_document(&mut self, document: &DocumentHandle) {
        self.activated.push(document.clone());
    }

    fn has_command(&self, name: &str) -> bool {
        self.commands.contains(name)
    }

    fn run_command(&mut self, name: &str, document: &DocumentId) {
        self.command_runs.push(CommandRun {
            name: name.to_string(),
            document: document.clone(),
            animations_enabled: self.animations,
        });
        match name {
            "close" => self.close(document),
            "edit" => {
                if let Some(doc) = self.documents.iter_mut().find(|d| &d.id == document) {
                    doc.has_editor = true;
                }
            }
            _ => {}
        }
    }

    fn config_text(&self, settings_id: &str) -> Option<String> {
        self.config.get(settings_id).cloned()
    }

    fn publish_config_text(&mut self, settings_id: &str, text: &str) {
        self.published.push((settings_id.to_string(), text.to_string()));
        self.config.insert(settings_id.to_string(), text.to_string());
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
        self.claimed.push(name.to_string());
    }
}
