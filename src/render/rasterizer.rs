//! Half-block rasterization.
//!
//! Terminal cells are about twice as tall as they are wide, so each output
//! row packs two pixel rows into one `▀` glyph: the foreground paints the
//! upper pixel and the background paints the lower one.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

use super::Rendering;
use crate::color::ColorProfile;

/// Upper half block; foreground = top pixel, background = bottom pixel.
pub const UPPER_HALF_BLOCK: &str = "▀";

/// Fixed hint at the start of every footer.
pub const QUIT_HINT: &str = "q to quit";

/// Everything besides the bitmap that shapes the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    /// Viewport width in columns
    pub width: u16,
    /// Viewport height in rows
    pub height: u16,
    /// Pixel rows kept free below the image for the footer
    pub vertical_margin: u32,
    /// Color tier to degrade to
    pub profile: ColorProfile,
}

impl RasterOptions {
    pub fn new(width: u16, height: u16, profile: ColorProfile) -> Self {
        Self {
            width,
            height,
            vertical_margin: 4,
            profile,
        }
    }

    pub fn with_vertical_margin(mut self, margin: u32) -> Self {
        self.vertical_margin = margin;
        self
    }

    /// Pixel bounds the thumbnail must fit inside.
    pub fn pixel_bounds(&self) -> (u32, u32) {
        let height = (2 * self.height as u32).saturating_sub(self.vertical_margin);
        (self.width as u32, height)
    }
}

/// Render `image` into a block of half-block rows plus a footer line.
///
/// The image is shrunk (never enlarged) with Lanczos3 to fit the viewport,
/// and every row is left-padded so that all rows share one printable width.
pub fn rasterize(image: &DynamicImage, options: &RasterOptions, footer: Option<&str>) -> Rendering {
    let mut lines = Vec::new();

    if let Some(thumb) = thumbnail(image, options.pixel_bounds()) {
        let (w, h) = thumb.dimensions();
        let bound_w = options.width as u32;
        let pad = ((bound_w - w + 1) / 2) as usize;

        for y in (0..h).step_by(2) {
            let mut spans = Vec::with_capacity(w as usize + 1);
            if pad > 0 {
                spans.push(Span::raw(" ".repeat(pad)));
            }
            for x in 0..w {
                let top = options.profile.nearest(flatten(*thumb.get_pixel(x, y)));
                let bottom = if y + 1 < h {
                    options.profile.nearest(flatten(*thumb.get_pixel(x, y + 1)))
                } else {
                    Color::Reset
                };
                spans.push(Span::styled(
                    UPPER_HALF_BLOCK,
                    Style::new().fg(top).bg(bottom),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(footer_line(footer));
    Rendering::new(Text::from(lines))
}

fn footer_line(caption: Option<&str>) -> Line<'static> {
    match caption {
        Some(caption) => Line::from(format!("{} | {}", QUIT_HINT, caption)),
        None => Line::from(QUIT_HINT),
    }
}

/// Shrink to fit `(max_w, max_h)` preserving aspect ratio.
///
/// Returns `None` when either the bounds or the image are empty.
fn thumbnail(image: &DynamicImage, (max_w, max_h): (u32, u32)) -> Option<RgbaImage> {
    let (w, h) = image.dimensions();
    if max_w == 0 || max_h == 0 || w == 0 || h == 0 {
        return None;
    }
    if w <= max_w && h <= max_h {
        return Some(image.to_rgba8());
    }
    let resized = image.resize(max_w, max_h, FilterType::Lanczos3);
    if resized.width() == 0 || resized.height() == 0 {
        return None;
    }
    Some(resized.to_rgba8())
}

/// Composite over black so transparent regions read as dark.
fn flatten(pixel: Rgba<u8>) -> [u8; 3] {
    let [r, g, b, a] = pixel.0;
    let scale = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
    [scale(r), scale(g), scale(b)]
}
