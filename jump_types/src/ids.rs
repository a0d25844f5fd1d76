//! Document identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of an open document
///
/// Documents are identified by title, which is unique among the documents
/// currently open in the host.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Returns the title
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for DocumentId {
    fn from(title: String) -> Self {
        Self(title)
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_display() {
        let id = DocumentId::new("GettingStarted");
        assert_eq!(id.as_str(), "GettingStarted");
        assert_eq!(id.to_string(), "GettingStarted");
    }

    #[test]
    fn test_document_id_serializes_as_plain_string() {
        let id = DocumentId::from("Journal 2026");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Journal 2026\"");

        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
