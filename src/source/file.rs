//! File-backed sources.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{Fetched, ImageSource};
use crate::error::{classify_io_error, LoadResult};

#[derive(Debug, Clone)]
pub struct FileSource {
    id: String,
    path: PathBuf,
}

impl FileSource {
    /// The id is the path as text, with invalid UTF-8 replaced, so captions
    /// and errors can always name the file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: path.to_string_lossy().into_owned(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ImageSource for FileSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch_bytes(&self) -> LoadResult<Fetched> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| classify_io_error(&self.id, &e))?;
        tracing::debug!(path = %self.id, len = bytes.len(), "Read image file");
        Ok(Fetched::new(bytes))
    }

    fn loading_caption(&self) -> Option<String> {
        Some(format!("Loading {} ✨", self.id))
    }

    fn footer_caption(&self) -> Option<String> {
        Some(self.id.clone())
    }
}
