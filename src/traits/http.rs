//! HTTP client trait abstraction.
//!
//! Network-backed image sources fetch through this trait so tests can swap
//! in [`MockHttpClient`](crate::adapters::mock::MockHttpClient).

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers (names lowercased)
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`HttpError::ServerError`].
    ///
    /// The message is the first line of the body, if it is text.
    pub fn error_for_status(self) -> Result<Self, HttpError> {
        if self.is_success() {
            return Ok(self);
        }
        let message: String = std::str::from_utf8(&self.body)
            .ok()
            .and_then(|body| body.lines().next())
            .map(|line| line.trim().chars().take(120).collect())
            .unwrap_or_default();
        Err(HttpError::ServerError {
            status: self.status,
            message,
        })
    }

    /// The `Content-Type` header without parameters, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.split(';').next().unwrap_or(value).trim())
    }
}

/// HTTP client errors.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } if message.is_empty() => {
                write!(f, "HTTP status {}", status)
            }
            HttpError::ServerError { status, message } => {
                write!(f, "HTTP status {}: {}", status, message)
            }
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// # Example
///
/// ```ignore
/// use pixcat::traits::{HttpClient, Headers, HttpError};
///
/// async fn fetch<C: HttpClient>(client: &C) -> Result<bytes::Bytes, HttpError> {
///     let response = client.get("https://example.com/cat.png", &Headers::new()).await?;
///     Ok(response.body)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync + std::fmt::Debug {
    /// Perform a GET request and buffer the full body.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;
}
