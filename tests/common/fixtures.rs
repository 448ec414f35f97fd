//! Image fixtures written to memory or temporary files.

use std::io::{Cursor, Write};
use std::sync::Arc;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, ImageFormat, Rgba, RgbaImage};
use pixcat::source::{FileSource, ImageSource};
use ratatui::style::Color;
use tempfile::NamedTempFile;

/// A solid-color RGBA bitmap.
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([rgb[0], rgb[1], rgb[2], 255]),
    ))
}

/// A bitmap with a horizontal and vertical gradient, so resampling matters.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let buffer = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
            255,
        ])
    });
    DynamicImage::ImageRgba8(buffer)
}

/// PNG-encoded solid image.
pub fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut out = Vec::new();
    solid_image(width, height, rgb)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("encode png");
    out
}

/// Looping GIF with one 4x4 frame per delay (in centiseconds).
///
/// Frame `i` is `base` with its green channel set to `i * 60`, so every
/// frame renders differently.
pub fn gif_bytes(delays_cs: &[u16], base: [u8; 3]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder.set_repeat(Repeat::Infinite).expect("set repeat");
        for (i, delay_cs) in delays_cs.iter().enumerate() {
            let color = Rgba([base[0], (i * 60) as u8, base[2], 255]);
            let buffer = RgbaImage::from_pixel(4, 4, color);
            let delay = Delay::from_numer_denom_ms(u32::from(*delay_cs) * 10, 1);
            encoder
                .encode_frame(Frame::from_parts(buffer, 0, 0, delay))
                .expect("encode frame");
        }
    }
    out
}

/// Write `bytes` to a temporary file ending in `.{extension}`.
pub fn temp_file(extension: &str, bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("pixcat-")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

pub fn png_file(width: u32, height: u32, rgb: [u8; 3]) -> NamedTempFile {
    temp_file("png", &png_bytes(width, height, rgb))
}

pub fn gif_file(delays_cs: &[u16], base: [u8; 3]) -> NamedTempFile {
    temp_file("gif", &gif_bytes(delays_cs, base))
}

pub fn file_source(file: &NamedTempFile) -> Arc<dyn ImageSource> {
    Arc::new(FileSource::new(file.path()))
}

/// RGB of the first image cell's top pixel in a rendering's first line.
pub fn first_pixel(rendering: &pixcat::render::Rendering) -> Option<(u8, u8, u8)> {
    rendering.text().lines.first()?.spans.iter().find_map(|span| {
        match span.style.fg {
            Some(Color::Rgb(r, g, b)) => Some((r, g, b)),
            _ => None,
        }
    })
}
