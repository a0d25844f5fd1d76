//! # Text Renderer
//!
//! Renders overlay frames as plain text. No ANSI, no cursor addressing;
//! every frame is printed whole.

use services_jump_overlay::{OverlayFrame, OverlayRow, ITEM_CLASS, SELECTED_ITEM_CLASS};

/// Text shown while the overlay is closed
pub const CLOSED_TEXT: &str = "[jump] closed";

/// Renders overlay frames, skipping revisions already drawn
#[derive(Debug, Default)]
pub struct TextRenderer {
    last_revision: Option<u64>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer that treats `revision` as already drawn
    pub fn starting_at(revision: u64) -> Self {
        Self {
            last_revision: Some(revision),
        }
    }

    /// Renders if `revision` differs from the last rendered one
    pub fn render_if_changed(
        &mut self,
        revision: u64,
        frame: Option<&OverlayFrame>,
    ) -> Option<String> {
        if self.last_revision == Some(revision) {
            return None;
        }
        self.last_revision = Some(revision);
        Some(self.render(frame))
    }

    /// Renders the overlay, or the closed marker
    pub fn render(&self, frame: Option<&OverlayFrame>) -> String {
        let Some(frame) = frame else {
            return CLOSED_TEXT.to_string();
        };

        let mut out = format!(
            "[jump] r{} {}x{} at ({},{}) scroll {}",
            frame.revision,
            frame.bounds.width,
            frame.bounds.height,
            frame.bounds.x,
            frame.bounds.y,
            frame.scroll_top
        );
        let title_width = frame
            .rows
            .iter()
            .map(|row| row.title.chars().count())
            .max()
            .unwrap_or(0);

        for row in &frame.rows {
            out.push('\n');
            out.push_str(&render_row(row, title_width));
        }
        out
    }
}

fn render_row(row: &OverlayRow, title_width: usize) -> String {
    let marker = if row.selected { '>' } else { ' ' };
    let tags: Vec<&str> = row
        .classes()
        .into_iter()
        .filter(|class| *class != ITEM_CLASS && *class != SELECTED_ITEM_CLASS)
        .filter_map(|class| class.rsplit('_').next())
        .collect();

    let line = format!(
        "{} {:>2}  {:<width$}  {}",
        marker,
        row.index,
        row.title,
        tags.join(" "),
        width = title_width
    );
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jump_types::{DocumentStatus, Rect};
    use pretty_assertions::assert_eq;

    fn row(index: usize, title: &str, status: DocumentStatus, selected: bool) -> OverlayRow {
        OverlayRow {
            index,
            title: title.to_string(),
            status,
            selected,
        }
    }

    fn frame() -> OverlayFrame {
        OverlayFrame {
            revision: 4,
            bounds: Rect::new(10, 20, 200, 100),
            list: Rect::new(26, 36, 168, 68),
            scroll_top: 0,
            rows: vec![
                row(0, "Alpha", DocumentStatus::default(), false),
                row(
                    1,
                    "Beta Notes",
                    DocumentStatus {
                        editable: true,
                        shadow: true,
                        missing: true,
                    },
                    true,
                ),
                row(
                    2,
                    "Gamma",
                    DocumentStatus {
                        editable: false,
                        shadow: false,
                        missing: true,
                    },
                    false,
                ),
            ],
        }
    }

    #[test]
    fn test_render_frame() {
        let output = TextRenderer::new().render(Some(&frame()));
        let expected = [
            "[jump] r4 200x100 at (10,20) scroll 0",
            "   0  Alpha",
            ">  1  Beta Notes  shadow editable",
            "   2  Gamma       missing",
        ]
        .join("\n");
        assert_eq!(output, expected);
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_render_closed() {
        assert_eq!(TextRenderer::new().render(None), CLOSED_TEXT);
    }

    #[test]
    fn test_render_if_changed_skips_same_revision() {
        let mut renderer = TextRenderer::new();
        let frame = frame();

        assert!(renderer.render_if_changed(4, Some(&frame)).is_some());
        assert!(renderer.render_if_changed(4, Some(&frame)).is_none());
        assert_eq!(renderer.render_if_changed(5, None).as_deref(), Some(CLOSED_TEXT));
    }

    #[test]
    fn test_starting_at_skips_baseline() {
        let mut renderer = TextRenderer::starting_at(0);
        assert!(renderer.render_if_changed(0, None).is_none());
        assert!(renderer.render_if_changed(1, None).is_some());
    }
}
