//! # Jump Overlay
//!
//! The selectable list of open documents shown while the hold modifier is
//! down.
//!
//! ## Philosophy
//!
//! - **One overlay at most**: The controller is either `Closed` or `Open`;
//!   the open state owns the only rendered frame
//! - **Rebuilt, not patched**: Every refresh rebuilds the snapshot and the
//!   whole row list; row identity is the snapshot position
//! - **Wrong-state calls are no-ops**: Refreshing or hiding a closed
//!   overlay, or showing an open one, does nothing
//!
//! ## Example
//!
//! ```ignore
//! let mut overlay = OverlayController::new(OverlayMetrics::default());
//! if overlay.show(&host, &recency) {
//!     overlay.select_next();
//!     overlay.commit_jump(&mut host, &mut recency);
//! }
//! ```

pub mod layout;
pub mod snapshot;

pub use layout::{OverlayHit, OverlayLayout, OverlayMetrics};
pub use snapshot::build_snapshot;

use jump_types::{
    DocumentHandle, DocumentId, DocumentStatus, JumpHost, OpenDocumentSnapshot, Point, Rect,
};
use services_recency::RecencyTracker;
use tracing::debug;

pub const MODAL_CLASS: &str = "jump-modal";
pub const ITEM_CLASS: &str = "jump-modal__item";
pub const SELECTED_ITEM_CLASS: &str = "jump-modal__item_selected";
pub const SHADOW_ITEM_CLASS: &str = "jump-modal__item_shadow";
pub const MISSING_ITEM_CLASS: &str = "jump-modal__item_missing";
pub const EDITABLE_ITEM_CLASS: &str = "jump-modal__item_editable";

/// Index selected when the overlay opens: the most recent document is the
/// current one, the second most recent is the natural jump target
const INITIAL_SELECTION: usize = 1;

/// Minimum number of open documents for the overlay to be useful
const MIN_DOCUMENTS: usize = 2;

/// One rendered list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRow {
    /// Snapshot position
    pub index: usize,
    pub title: String,
    pub status: DocumentStatus,
    pub selected: bool,
}

impl OverlayRow {
    /// Presentation classes for this row
    ///
    /// Shadow takes precedence over missing.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![ITEM_CLASS];
        if self.selected {
            classes.push(SELECTED_ITEM_CLASS);
        }
        if self.status.shadow {
            classes.push(SHADOW_ITEM_CLASS);
        } else if self.status.missing {
            classes.push(MISSING_ITEM_CLASS);
        }
        if self.status.editable {
            classes.push(EDITABLE_ITEM_CLASS);
        }
        classes
    }
}

/// A rendered overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayFrame {
    /// Bumped on every re-render
    pub revision: u64,
    pub bounds: Rect,
    pub list: Rect,
    pub scroll_top: u32,
    pub rows: Vec<OverlayRow>,
}

/// State that exists only while the overlay is open
#[derive(Debug, Clone)]
struct OpenOverlay {
    snapshot: OpenDocumentSnapshot,
    layout: OverlayLayout,
    /// Always `< snapshot.len()`
    selected: usize,
    scroll_top: u32,
}

/// Overlay lifecycle, selection and scrolling
pub struct OverlayController {
    metrics: OverlayMetrics,
    /// `Some` exactly while the overlay is open
    open: Option<OpenOverlay>,
    revision: u64,
}

impl OverlayController {
    pub fn new(metrics: OverlayMetrics) -> Self {
        Self {
            metrics,
            open: None,
            revision: 0,
        }
    }

    pub fn metrics(&self) -> &OverlayMetrics {
        &self.metrics
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Opens the overlay with the second entry selected
    ///
    /// Returns true only if this call opened it. Fails when already open or
    /// when fewer than two documents are open.
    pub fn show<H: JumpHost + ?Sized>(&mut self, host: &H, recency: &RecencyTracker) -> bool {
        let snapshot = build_snapshot(host, recency);
        if snapshot.len() < MIN_DOCUMENTS || self.is_open() {
            return false;
        }

        let layout = OverlayLayout::compute(&self.metrics, host.viewport_size(), snapshot.len());
        debug!(documents = snapshot.len(), "jump overlay shown");
        self.open = Some(OpenOverlay {
            snapshot,
            layout,
            selected: 0,
            scroll_top: 0,
        });
        self.select_by_index(INITIAL_SELECTION);
        true
    }

    /// Rebuilds the snapshot and re-renders the rows
    ///
    /// The selection is kept, clamped into the new range. If no documents
    /// remain the overlay closes.
    pub fn refresh<H: JumpHost + ?Sized>(&mut self, host: &H, recency: &RecencyTracker) {
        let Some(open) = self.open.as_mut() else {
            return;
        };

        let snapshot = build_snapshot(host, recency);
        if snapshot.is_empty() {
            self.hide();
            return;
        }

        open.layout = OverlayLayout::compute(&self.metrics, host.viewport_size(), snapshot.len());
        open.selected = open.selected.min(snapshot.len() - 1);
        open.snapshot = snapshot;
        open.scroll_top = open
            .layout
            .scroll_into_view(open.scroll_top.min(open.layout.max_scroll()), open.selected);
        self.revision += 1;
    }

    /// Closes the overlay, dropping the rendered frame
    pub fn hide(&mut self) {
        if self.open.take().is_some() {
            debug!("jump overlay hidden");
            self.revision += 1;
        }
    }

    /// Selects a row and scrolls it fully into view
    ///
    /// Out-of-range indices are ignored.
    pub fn select_by_index(&mut self, index: usize) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        if index >= open.snapshot.len() {
            return;
        }

        open.selected = index;
        open.scroll_top = open.layout.scroll_into_view(open.scroll_top, index);
        self.revision += 1;
    }

    /// Moves the selection up, wrapping to the last row
    pub fn select_prev(&mut self) {
        let prev = self
            .open
            .as_ref()
            .map(|open| (open.selected + open.snapshot.len() - 1) % open.snapshot.len());
        if let Some(index) = prev {
            self.select_by_index(index);
        }
    }

    /// Moves the selection down, wrapping to the first row
    pub fn select_next(&mut self) {
        let next = self
            .open
            .as_ref()
            .map(|open| (open.selected + 1) % open.snapshot.len());
        if let Some(index) = next {
            self.select_by_index(index);
        }
    }

    /// Returns the selected snapshot position; `None` while closed
    pub fn selected_index(&self) -> Option<usize> {
        self.open.as_ref().map(|open| open.selected)
    }

    /// Returns the selected document as rendered
    pub fn selected_document(&self) -> Option<&DocumentHandle> {
        self.open
            .as_ref()
            .and_then(|open| open.snapshot.get(open.selected))
    }

    /// Returns the rendered snapshot; `None` while closed
    pub fn snapshot(&self) -> Option<&OpenDocumentSnapshot> {
        self.open.as_ref().map(|open| &open.snapshot)
    }

    /// Activates the selected document, records the touch, and closes
    ///
    /// The document is resolved against a fresh snapshot so its status flags
    /// are current. Returns the activated document.
    pub fn commit_jump<H: JumpHost + ?Sized>(
        &mut self,
        host: &mut H,
        recency: &mut RecencyTracker,
    ) -> Option<DocumentId> {
        let selected = self.selected_index()?;

        let target = build_snapshot(&*host, recency).get(selected).cloned();
        let activated = target.map(|document| {
            debug!(document = %document.id, index = selected, "jump committed");
            host.activate_document(&document);
            recency.push(document.id.clone());
            document.id
        });

        self.hide();
        activated
    }

    /// Resolves a viewport position against the open overlay
    pub fn hit_test(&self, point: Point) -> OverlayHit {
        match &self.open {
            Some(open) => open.layout.hit_test(point, open.scroll_top),
            None => OverlayHit::Outside,
        }
    }

    /// Re-renders without changing state, e.g. after a theme change
    pub fn restyle(&mut self) {
        if self.is_open() {
            self.revision += 1;
        }
    }

    /// Current render revision
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Renders the open overlay
    pub fn frame(&self) -> Option<OverlayFrame> {
        let open = self.open.as_ref()?;
        let rows = open
            .snapshot
            .iter()
            .enumerate()
            .map(|(index, document)| OverlayRow {
                index,
                title: document.id.to_string(),
                status: document.status,
                selected: index == open.selected,
            })
            .collect();

        Some(OverlayFrame {
            revision: self.revision,
            bounds: open.layout.bounds,
            list: open.layout.list,
            scroll_top: open.scroll_top,
            rows,
        })
    }
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(OverlayMetrics::default())
    }
}
