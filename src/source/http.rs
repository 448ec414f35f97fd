//! Network-backed sources.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use super::{Fetched, ImageSource};
use crate::error::{LoadError, LoadResult};
use crate::traits::{Headers, HttpClient, Response};

/// Sent with every request so servers doing content negotiation pick an image.
pub const ACCEPT_IMAGES: &str = "image/*,*/*;q=0.8";

/// An image fetched with a GET request.
#[derive(Clone)]
pub struct HttpSource {
    url: String,
    client: Arc<dyn HttpClient>,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, client: Arc<dyn HttpClient>) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource").field("url", &self.url).finish()
    }
}

#[async_trait]
impl ImageSource for HttpSource {
    fn id(&self) -> &str {
        &self.url
    }

    async fn fetch_bytes(&self) -> LoadResult<Fetched> {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), ACCEPT_IMAGES.to_string());

        let response = self
            .client
            .get(&self.url, &headers)
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| LoadError::from_http(&self.url, e))?;

        tracing::debug!(
            url = %self.url,
            status = response.status,
            len = response.body.len(),
            "Fetched image over HTTP"
        );

        let mut fetched = Fetched::new(response.body.clone());
        if let Some(content_type) = response.content_type() {
            fetched = fetched.with_media_type(content_type);
        }
        Ok(fetched)
    }

    fn loading_caption(&self) -> Option<String> {
        Some(format!("Loading {} ✨", self.url))
    }

    fn footer_caption(&self) -> Option<String> {
        Some(self.url.clone())
    }
}
