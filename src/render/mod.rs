//! Turning decoded bitmaps into terminal text.
//!
//! - [`rasterizer`] - half-block rasterization of a bitmap
//! - [`svg`] - vector documents to bitmaps at their intrinsic size
//!
//! The output type is [`Rendering`], an immutable, cheaply cloned block of
//! styled lines. Views replace a `Rendering` wholesale; nothing ever edits
//! one in place.

pub mod rasterizer;
pub mod svg;

pub use rasterizer::{rasterize, RasterOptions, QUIT_HINT, UPPER_HALF_BLOCK};
pub use svg::rasterize_svg;

use ratatui::text::Text;
use std::sync::Arc;

/// A terminal-ready block of text: image rows followed by a footer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    text: Arc<Text<'static>>,
}

impl Rendering {
    pub fn new(text: Text<'static>) -> Self {
        Self {
            text: Arc::new(text),
        }
    }

    /// The styled text, ready to hand to a ratatui widget.
    pub fn text(&self) -> &Text<'static> {
        &self.text
    }

    /// Total number of lines including the footer.
    pub fn line_count(&self) -> usize {
        self.text.lines.len()
    }

    /// Printable width of every line, in terminal columns.
    pub fn line_widths(&self) -> Vec<usize> {
        self.text.lines.iter().map(|line| line.width()).collect()
    }

    /// Lines with styling stripped.
    pub fn plain_lines(&self) -> Vec<String> {
        self.text
            .lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    /// True when both values share the same underlying text allocation.
    pub fn ptr_eq(&self, other: &Rendering) -> bool {
        Arc::ptr_eq(&self.text, &other.text)
    }
}
