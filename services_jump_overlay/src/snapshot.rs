//! Open-document snapshot builder

use jump_types::{DocumentHandle, JumpHost, OpenDocumentSnapshot};
use services_recency::RecencyTracker;

/// Builds a recency-ordered snapshot of the documents open in the host
///
/// Touched documents come first, most recent first; untouched documents
/// follow in host order.
pub fn build_snapshot<H: JumpHost + ?Sized>(
    host: &H,
    recency: &RecencyTracker,
) -> OpenDocumentSnapshot {
    let mut documents: Vec<DocumentHandle> = host
        .open_documents()
        .iter()
        .map(DocumentHandle::from_open)
        .collect();

    // Stable: untouched entries keep host order at the tail
    documents.sort_by_key(|doc| recency.rank(&doc.id).unwrap_or(usize::MAX));

    OpenDocumentSnapshot::new(documents)
}
