//! Error types for loading image sources.
//!
//! Every failure while turning a source into terminal output collapses into
//! a [`LoadError`]:
//!
//! | Variant | Raised when | Code |
//! |---------|-------------|------|
//! | `Fetch` | the file or URL cannot be read | `E_FETCH` |
//! | `Decode` | bytes do not match the declared format, or are corrupt | `E_DECODE` |
//! | `UnsupportedFormat` | the media type is recognised but not handled | `E_UNSUPPORTED` |
//!
//! None of them are retried automatically; the navigation layer surfaces the
//! message and stops.
//!
//! # Example
//!
//! ```
//! use pixcat::error::LoadError;
//!
//! let err = LoadError::fetch("missing.png", "No such file or directory");
//! assert_eq!(err.error_code(), "E_FETCH");
//! assert!(err.to_string().contains("missing.png"));
//! ```

mod load;

pub use load::{classify_io_error, LoadError, LoadResult};
