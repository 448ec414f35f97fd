//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP GET used by network-backed image sources

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
