//! Open documents as reported by the host, and the snapshots built from them

use crate::DocumentId;
use serde::{Deserialize, Serialize};

/// Host class name marking a template/system-provided document
pub const SHADOW_CLASS: &str = "shadow";
/// Host class name marking a referenced but nonexistent document
pub const MISSING_CLASS: &str = "missing";

/// An open document as reported by the host
///
/// This is the raw classification; [`DocumentStatus`] is derived from it
/// every time a snapshot is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDocument {
    pub id: DocumentId,
    /// Whether the document region currently contains an editor
    pub has_editor: bool,
    /// Presentation classes the host attached to the document region
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class_names: Vec<String>,
}

impl OpenDocument {
    pub fn new(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            has_editor: false,
            class_names: Vec::new(),
        }
    }

    /// Marks the document as being edited
    pub fn with_editor(mut self) -> Self {
        self.has_editor = true;
        self
    }

    /// Adds a host class name
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_names.push(class_name.into());
        self
    }

    /// Checks for a host class name
    pub fn has_class(&self, class_name: &str) -> bool {
        self.class_names.iter().any(|c| c == class_name)
    }
}

/// Status flags derived from the host classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub editable: bool,
    pub shadow: bool,
    pub missing: bool,
}

impl DocumentStatus {
    /// Derives status flags from what the host reported
    pub fn classify(document: &OpenDocument) -> Self {
        Self {
            editable: document.has_editor,
            shadow: document.has_class(SHADOW_CLASS),
            missing: document.has_class(MISSING_CLASS),
        }
    }
}

/// An open document with its derived status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHandle {
    pub id: DocumentId,
    pub status: DocumentStatus,
}

impl DocumentHandle {
    pub fn new(id: impl Into<DocumentId>, status: DocumentStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }

    /// Builds a handle from a host report
    pub fn from_open(document: &OpenDocument) -> Self {
        Self {
            id: document.id.clone(),
            status: DocumentStatus::classify(document),
        }
    }
}

/// Recency-ordered sequence of open documents
///
/// Immutable once built; superseded by the next rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDocumentSnapshot {
    documents: Vec<DocumentHandle>,
}

impl OpenDocumentSnapshot {
    pub fn new(documents: Vec<DocumentHandle>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the document at a snapshot position
    pub fn get(&self, index: usize) -> Option<&DocumentHandle> {
        self.documents.get(index)
    }

    /// Returns the snapshot position of a document
    pub fn position(&self, id: &DocumentId) -> Option<usize> {
        self.documents.iter().position(|doc| &doc.id == id)
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentHandle> {
        self.documents.iter()
    }

    /// Returns the identifiers in snapshot order
    pub fn ids(&self) -> Vec<DocumentId> {
        self.documents.iter().map(|doc| doc.id.clone()).collect()
    }
}
