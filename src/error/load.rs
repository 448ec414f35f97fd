//! The [`LoadError`] type and conversions into it.

use std::io;

use thiserror::Error;

use crate::traits::HttpError;

/// Result alias used throughout the loading pipeline.
pub type LoadResult<T> = Result<T, LoadError>;

/// A failure while fetching, decoding, or rasterizing a source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The underlying resource could not be read.
    #[error("{source_id}: {message}")]
    Fetch { source_id: String, message: String },

    /// The bytes did not decode as the declared format.
    #[error("{source_id}: {message}")]
    Decode { source_id: String, message: String },

    /// The media type is not one we know how to render.
    #[error("{source_id}: unsupported format ({media_type})")]
    UnsupportedFormat {
        source_id: String,
        media_type: String,
    },
}

impl LoadError {
    pub fn fetch(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        LoadError::Fetch {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    pub fn decode(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        LoadError::Decode {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    pub fn unsupported(source_id: impl Into<String>, media_type: impl Into<String>) -> Self {
        LoadError::UnsupportedFormat {
            source_id: source_id.into(),
            media_type: media_type.into(),
        }
    }

    /// Build a fetch error from an HTTP transport failure.
    pub fn from_http(source_id: impl Into<String>, err: HttpError) -> Self {
        Self::fetch(source_id, err.to_string())
    }

    /// Build a decode error from an `image` crate failure.
    pub fn from_image(source_id: impl Into<String>, err: image::ImageError) -> Self {
        Self::decode(source_id, err.to_string())
    }

    /// Identifier of the source that failed.
    pub fn source_id(&self) -> &str {
        match self {
            LoadError::Fetch { source_id, .. }
            | LoadError::Decode { source_id, .. }
            | LoadError::UnsupportedFormat { source_id, .. } => source_id,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            LoadError::Fetch { .. } => "E_FETCH",
            LoadError::Decode { .. } => "E_DECODE",
            LoadError::UnsupportedFormat { .. } => "E_UNSUPPORTED",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::Fetch { source_id, message } => {
                format!("Could not read '{}': {}", source_id, message)
            }
            LoadError::Decode { source_id, message } => {
                format!("'{}' is not a valid image: {}", source_id, message)
            }
            LoadError::UnsupportedFormat {
                source_id,
                media_type,
            } => format!("'{}' has an unsupported format ({})", source_id, media_type),
        }
    }
}

/// Classify an I/O error raised while reading `path` into a fetch error.
pub fn classify_io_error(path: &str, err: &io::Error) -> LoadError {
    let message = match err.kind() {
        io::ErrorKind::NotFound => "no such file or directory".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => err.to_string(),
    };
    LoadError::fetch(path, message)
}
