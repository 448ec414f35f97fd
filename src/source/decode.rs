//! Byte decoding for stills and animations.

use image::codecs::gif::GifDecoder;
use image::error::ImageError;
use image::metadata::Orientation;
use image::{AnimationDecoder, DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::io::Cursor;

use super::media::MediaKind;
use crate::error::{LoadError, LoadResult};
use crate::render::rasterize_svg;

/// One decoded animation frame and how long it stays on screen.
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    pub image: DynamicImage,
    /// Declared delay in hundredths of a second
    pub delay_cs: u16,
}

/// All frames of a looping animation, in display order.
#[derive(Debug, Clone)]
pub struct DecodedAnimation {
    pub frames: Vec<AnimationFrame>,
}

impl DecodedAnimation {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// The outcome of resolving a source's bytes: the path the load takes.
#[derive(Debug, Clone)]
pub enum Decoded {
    Still(DynamicImage),
    Animated(DecodedAnimation),
}

fn image_error(source_id: &str, err: ImageError) -> LoadError {
    match err {
        ImageError::Unsupported(e) => LoadError::unsupported(source_id, e.to_string()),
        other => LoadError::from_image(source_id, other),
    }
}

/// Decode a single still according to `kind`.
pub fn decode_still(source_id: &str, kind: &MediaKind, bytes: &[u8]) -> LoadResult<DynamicImage> {
    match kind {
        MediaKind::Still(format) => decode_raster(source_id, *format, bytes),
        MediaKind::Animated => decode_raster(source_id, ImageFormat::Gif, bytes),
        MediaKind::Vector => rasterize_svg(source_id, bytes),
        MediaKind::InMemory => Err(LoadError::decode(source_id, "no encoded bytes to decode")),
        MediaKind::Unsupported(media_type) => Err(LoadError::unsupported(source_id, media_type)),
    }
}

/// Decode a raster image in `format`, applying any EXIF orientation.
fn decode_raster(source_id: &str, format: ImageFormat, bytes: &[u8]) -> LoadResult<DynamicImage> {
    let reader = ImageReader::with_format(Cursor::new(bytes), format);
    let mut decoder = reader
        .into_decoder()
        .map_err(|e| image_error(source_id, e))?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut image = DynamicImage::from_decoder(decoder).map_err(|e| image_error(source_id, e))?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Decode every frame of an animated source.
///
/// Returns `Ok(None)` when `kind` is not an animated format.
pub fn decode_animated(
    source_id: &str,
    kind: &MediaKind,
    bytes: &[u8],
) -> LoadResult<Option<DecodedAnimation>> {
    if !kind.is_animated() {
        return Ok(None);
    }

    let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(|e| image_error(source_id, e))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| image_error(source_id, e))?;

    if frames.is_empty() {
        return Err(LoadError::decode(source_id, "animation has no frames"));
    }

    let frames = frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay_ms = if denom == 0 { 0 } else { numer / denom };
            AnimationFrame {
                delay_cs: ((delay_ms + 5) / 10).min(u16::MAX as u32) as u16,
                image: DynamicImage::ImageRgba8(frame.into_buffer()),
            }
        })
        .collect();

    Ok(Some(DecodedAnimation { frames }))
}
