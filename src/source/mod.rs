//! Image sources.
//!
//! An [`ImageSource`] is anything that can produce a picture: a file path, a
//! URL, or a bitmap already in memory. All variants expose the same
//! capability set:
//!
//! - [`fetch_bytes`](ImageSource::fetch_bytes) opens the underlying resource
//! - [`decode_still`](ImageSource::decode_still) and
//!   [`decode_animated`](ImageSource::decode_animated) interpret the bytes
//! - [`loading_caption`](ImageSource::loading_caption) and
//!   [`footer_caption`](ImageSource::footer_caption) are optional text
//!
//! [`resolve`] runs the decode capabilities once per load and yields a tagged
//! [`Decoded`] value, so callers never probe a source's type again.

pub mod decode;
pub mod file;
pub mod http;
pub mod media;
pub mod memory;

pub use decode::{AnimationFrame, Decoded, DecodedAnimation};
pub use file::FileSource;
pub use http::HttpSource;
pub use media::{is_url, MediaKind};
pub use memory::MemorySource;

use async_trait::async_trait;
use bytes::Bytes;
use image::DynamicImage;
use std::ffi::OsStr;
use std::fmt;
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::traits::HttpClient;

/// Raw bytes of a source plus any media type the transport declared.
#[derive(Debug, Clone, Default)]
pub struct Fetched {
    pub bytes: Bytes,
    pub media_type: Option<String>,
}

impl Fetched {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

#[async_trait]
pub trait ImageSource: Send + Sync + fmt::Debug {
    /// Path, URL, or other descriptor identifying this source.
    fn id(&self) -> &str;

    async fn fetch_bytes(&self) -> LoadResult<Fetched>;

    fn media_kind(&self, fetched: &Fetched) -> MediaKind {
        MediaKind::resolve(self.id(), fetched.media_type.as_deref())
    }

    fn decode_still(&self, fetched: &Fetched) -> LoadResult<DynamicImage> {
        decode::decode_still(self.id(), &self.media_kind(fetched), &fetched.bytes)
    }

    /// `Ok(None)` means "not an animated format", not a failure.
    fn decode_animated(&self, fetched: &Fetched) -> LoadResult<Option<DecodedAnimation>> {
        decode::decode_animated(self.id(), &self.media_kind(fetched), &fetched.bytes)
    }

    fn loading_caption(&self) -> Option<String> {
        None
    }

    fn footer_caption(&self) -> Option<String> {
        None
    }
}

/// Decode fetched bytes into either a still or an animation.
pub fn resolve(source: &dyn ImageSource, fetched: &Fetched) -> LoadResult<Decoded> {
    if let MediaKind::Unsupported(media_type) = source.media_kind(fetched) {
        return Err(LoadError::unsupported(source.id(), media_type));
    }
    match source.decode_animated(fetched)? {
        Some(animation) => Ok(Decoded::Animated(animation)),
        None => Ok(Decoded::Still(source.decode_still(fetched)?)),
    }
}

/// Build a source from a command-line argument.
///
/// `http://` and `https://` arguments become network sources; everything
/// else is treated as a file path.
pub fn from_arg(arg: impl AsRef<OsStr>, client: Arc<dyn HttpClient>) -> Arc<dyn ImageSource> {
    let arg = arg.as_ref();
    match arg.to_str() {
        Some(url) if is_url(url) => Arc::new(HttpSource::new(url, client)),
        _ => Arc::new(FileSource::new(arg)),
    }
}
