//! Vector documents to bitmaps.
//!
//! An SVG is rendered at its own intrinsic size into an off-screen pixmap,
//! not at the viewport size: the block rasterizer downsamples afterwards,
//! so detail defined in the document's coordinate space survives.

use image::{DynamicImage, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};

use crate::error::{LoadError, LoadResult};

/// Rasterize SVG `data` into an RGBA bitmap.
pub fn rasterize_svg(source_id: &str, data: &[u8]) -> LoadResult<DynamicImage> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &options)
        .map_err(|e| LoadError::decode(source_id, e.to_string()))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| LoadError::decode(source_id, "SVG has an empty canvas"))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let mut bitmap = RgbaImage::new(size.width(), size.height());
    for (dst, src) in bitmap.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }

    tracing::debug!(
        source_id,
        width = size.width(),
        height = size.height(),
        "Rasterized SVG"
    );
    Ok(DynamicImage::ImageRgba8(bitmap))
}
