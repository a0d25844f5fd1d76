//! Overlay geometry
//!
//! The overlay is a box centered in the host viewport holding a vertical
//! list of fixed-height rows. The list scrolls when the rows do not fit.

use jump_types::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Overlay sizing parameters, in host pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayMetrics {
    /// Preferred overlay width
    pub width: u32,
    /// Inset between the overlay edge and the list
    pub padding: u32,
    pub row_height: u32,
    /// Vertical space between consecutive rows
    pub row_gap: u32,
    /// Cap on overlay width and height, as a percentage of the viewport
    pub max_viewport_percent: u32,
}

impl Default for OverlayMetrics {
    fn default() -> Self {
        Self {
            width: 420,
            padding: 16,
            row_height: 28,
            row_gap: 8,
            max_viewport_percent: 80,
        }
    }
}

/// What a pointer position lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayHit {
    /// Outside the overlay bounds
    Outside,
    /// Inside the overlay but not on a row (padding, row gaps)
    Chrome,
    /// On the row at this snapshot position
    Row(usize),
}

/// Resolved geometry for a given row count and viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    /// Overlay box in viewport coordinates
    pub bounds: Rect,
    /// Visible list area in viewport coordinates
    pub list: Rect,
    row_height: u32,
    row_gap: u32,
    rows: usize,
}

impl OverlayLayout {
    pub fn compute(metrics: &OverlayMetrics, viewport: Size, rows: usize) -> Self {
        let percent = metrics.max_viewport_percent.min(100) as u64;
        let max_width = (viewport.width as u64 * percent / 100) as u32;
        let max_height = (viewport.height as u64 * percent / 100) as u32;

        let content_height = content_height(metrics.row_height, metrics.row_gap, rows);
        let size = Size::new(
            metrics.width.min(max_width),
            content_height
                .saturating_add(metrics.padding.saturating_mul(2))
                .min(max_height),
        );

        let bounds = Rect::centered_in(viewport, size);
        Self {
            bounds,
            list: bounds.inset(metrics.padding),
            row_height: metrics.row_height,
            row_gap: metrics.row_gap,
            rows,
        }
    }

    /// Total height of all rows, gaps between them included
    pub fn content_height(&self) -> u32 {
        content_height(self.row_height, self.row_gap, self.rows)
    }

    /// Largest valid scroll offset
    pub fn max_scroll(&self) -> u32 {
        self.content_height().saturating_sub(self.list.height)
    }

    /// Top of a row, in list content coordinates
    pub fn row_top(&self, index: usize) -> u32 {
        (index as u32).saturating_mul(self.stride())
    }

    /// Returns the scroll offset that brings row `index` fully into view,
    /// moving as little as possible from `scroll_top`
    pub fn scroll_into_view(&self, scroll_top: u32, index: usize) -> u32 {
        let top = self.row_top(index);
        let bottom = top.saturating_add(self.row_height);
        let viewport_bottom = scroll_top.saturating_add(self.list.height);

        let scroll_top = if bottom > viewport_bottom {
            scroll_top.saturating_add(bottom - viewport_bottom)
        } else if top < scroll_top {
            top
        } else {
            scroll_top
        };
        scroll_top.min(self.max_scroll())
    }

    /// Resolves a viewport position against the list scrolled to `scroll_top`
    pub fn hit_test(&self, point: Point, scroll_top: u32) -> OverlayHit {
        if !self.bounds.contains(point) {
            return OverlayHit::Outside;
        }
        if !self.list.contains(point) {
            return OverlayHit::Chrome;
        }

        let content_y = ((point.y - self.list.y) as u32).saturating_add(scroll_top);
        let stride = self.stride();
        if stride == 0 {
            return OverlayHit::Chrome;
        }
        let index = (content_y / stride) as usize;
        if index < self.rows && content_y % stride < self.row_height {
            OverlayHit::Row(index)
        } else {
            OverlayHit::Chrome
        }
    }

    fn stride(&self) -> u32 {
        self.row_height.saturating_add(self.row_gap)
    }
}

fn content_height(row_height: u32, row_gap: u32, rows: usize) -> u32 {
    if rows == 0 {
        return 0;
    }
    let rows = u32::try_from(rows).unwrap_or(u32::MAX);
    rows.saturating_mul(row_height)
        .saturating_add((rows - 1).saturating_mul(row_gap))
}
