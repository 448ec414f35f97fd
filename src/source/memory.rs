//! Sources backed by a bitmap that is already decoded.

use async_trait::async_trait;
use image::DynamicImage;

use super::{Fetched, ImageSource, MediaKind};
use crate::error::LoadResult;

#[derive(Debug, Clone)]
pub struct MemorySource {
    id: String,
    image: DynamicImage,
    caption: Option<String>,
}

impl MemorySource {
    pub fn new(id: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            id: id.into(),
            image,
            caption: None,
        }
    }

    /// Show `caption` in the footer below the image.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

#[async_trait]
impl ImageSource for MemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch_bytes(&self) -> LoadResult<Fetched> {
        Ok(Fetched::default())
    }

    fn media_kind(&self, _fetched: &Fetched) -> MediaKind {
        MediaKind::InMemory
    }

    fn decode_still(&self, _fetched: &Fetched) -> LoadResult<DynamicImage> {
        Ok(self.image.clone())
    }

    fn footer_caption(&self) -> Option<String> {
        self.caption.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{resolve, Decoded};
    use image::{Rgba, RgbaImage};

    #[tokio::test]
    async fn test_resolves_to_still() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        let source = MemorySource::new("generated", image);

        let fetched = source.fetch_bytes().await.unwrap();
        match resolve(&source, &fetched).unwrap() {
            Decoded::Still(still) => assert_eq!(still.width(), 2),
            Decoded::Animated(_) => panic!("memory source should never animate"),
        }
        assert!(source.loading_caption().is_none());
        assert!(source.footer_caption().is_none());
    }

    #[test]
    fn test_caption() {
        let image = DynamicImage::new_rgba8(1, 1);
        let source = MemorySource::new("generated", image).with_caption("a gradient");
        assert_eq!(source.footer_caption().as_deref(), Some("a gradient"));
    }
}
