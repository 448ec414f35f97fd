//! Media type resolution.
//!
//! Format dispatch goes by the declared type of a source (its extension, or
//! a `Content-Type` header for URLs without one), never by sniffing bytes.
//! A `.png` that actually holds JPEG data therefore fails to decode instead
//! of being silently accepted.

use image::ImageFormat;
use std::path::Path;

/// How a source's bytes are to be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    /// A single raster frame in the given container format
    Still(ImageFormat),
    /// An animated format (GIF); may still hold a single frame
    Animated,
    /// An SVG document
    Vector,
    /// Already decoded, no bytes to interpret
    InMemory,
    /// Recognisably something, but nothing we render
    Unsupported(String),
}

impl MediaKind {
    /// Resolve from a source identifier, falling back to a declared MIME type.
    pub fn resolve(id: &str, declared: Option<&str>) -> MediaKind {
        let extension = extension_of(id);

        if let Some(kind) = extension.as_deref().and_then(Self::from_extension) {
            return kind;
        }
        if let Some(kind) = declared.and_then(Self::from_mime) {
            return kind;
        }

        let described = extension
            .or_else(|| declared.map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());
        MediaKind::Unsupported(described)
    }

    pub fn from_extension(ext: &str) -> Option<MediaKind> {
        let ext = ext.to_ascii_lowercase();
        match ext.as_str() {
            "gif" => Some(MediaKind::Animated),
            "svg" => Some(MediaKind::Vector),
            _ => ImageFormat::from_extension(&ext).map(MediaKind::Still),
        }
    }

    pub fn from_mime(mime: &str) -> Option<MediaKind> {
        let mime = mime.trim().to_ascii_lowercase();
        match mime.as_str() {
            "image/gif" => Some(MediaKind::Animated),
            "image/svg+xml" => Some(MediaKind::Vector),
            _ => ImageFormat::from_mime_type(&mime).map(MediaKind::Still),
        }
    }

    /// True for formats that go through the animation path.
    pub fn is_animated(&self) -> bool {
        matches!(self, MediaKind::Animated)
    }
}

/// Lowercased extension of a path or URL, ignoring query and fragment.
fn extension_of(id: &str) -> Option<String> {
    if is_url(id) {
        let without_scheme = id.split_once("://").map(|(_, rest)| rest).unwrap_or(id);
        let path = without_scheme
            .split(['?', '#'])
            .next()
            .unwrap_or(without_scheme);
        // Host-only URLs have no path to take an extension from
        let (_, path) = path.split_once('/')?;
        let segment = path.rsplit('/').next()?;
        let (_, ext) = segment.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        return Some(ext.to_ascii_lowercase());
    }

    Path::new(id)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// True for identifiers fetched over the network.
pub fn is_url(id: &str) -> bool {
    id.starts_with("http://") || id.starts_with("https://")
}
