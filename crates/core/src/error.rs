//! Error types for hnsift operations.
//!
//! This module defines the main error type [`SiftError`] which represents
//! every failure the fetch, parse, and select pipeline can surface to a caller.
//!
//! Malformed markup is not an error: the HTML5 parser recovers from it, and
//! blank input becomes [`Document::Empty`](crate::Document::Empty). Likewise an
//! unparseable score only drops the affected entry.
//!
//! # Example
//!
//! ```rust
//! use hnsift_core::{SiftError, Result};
//!
//! fn require_scheme(url: &str) -> Result<&str> {
//!     if !url.starts_with("http") {
//!         return Err(SiftError::InvalidUrl(url.to_string()));
//!     }
//!     Ok(url)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetch and extraction operations.
///
/// # Example
///
/// ```rust,no_run
/// use hnsift_core::{FetchConfig, SiftError, fetch_url};
///
/// match fetch_url("https://news.ycombinator.com/news", &FetchConfig::default()) {
///     Ok(page) => println!("Fetched {} bytes", page.body.len()),
///     Err(SiftError::RetriesExhausted { attempts, reason, .. }) => {
///         println!("Gave up after {} attempts: {}", attempts, reason);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum SiftError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport-level problems. Retryable.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout. Retryable.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status. Retryable.
    #[error("Server responded with HTTP status {status}")]
    Status { status: u16 },

    /// Every attempt against `url` failed.
    ///
    /// `reason` is the message of the last failed attempt.
    #[error("Giving up on {url} after {attempts} attempts: {reason}")]
    RetriesExhausted { url: String, attempts: u32, reason: String },

    /// A multi-page fetch did not retrieve a single page.
    #[error("No pages could be fetched ({failures} failed): {reason}")]
    NoPagesFetched { failures: usize, reason: String },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed. Never retried.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization errors.
    #[error("Failed to serialize output: {0}")]
    Serialize(String),
}

impl SiftError {
    /// Whether a fetch attempt that failed with this error may be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            #[cfg(feature = "fetch")]
            SiftError::HttpError(_) => true,
            SiftError::Timeout { .. } | SiftError::Status { .. } => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        SiftError::Serialize(err.to_string())
    }
}

/// Result type alias for SiftError.
///
/// This is a convenience alias for `std::result::Result<T, SiftError>`.
pub type Result<T> = std::result::Result<T, SiftError>;
