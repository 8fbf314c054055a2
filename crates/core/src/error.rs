//! Error types for homedigest operations.
//!
//! Extraction itself never fails: a missing price, an unpriced block or a
//! block without listing links are normal outcomes tallied in
//! [`ParseStats`](crate::ParseStats). The variants below cover the few
//! things that can actually go wrong around the engine: reading input,
//! compiling recognizers for a custom region, and serializing output.
//!
//! # Example
//!
//! ```rust
//! use homedigest_core::{DigestError, Result};
//!
//! fn require_pages(pages: &[String]) -> Result<()> {
//!     if pages.is_empty() {
//!         return Err(DigestError::FileNotFound("listings/".into()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for digest processing.
#[derive(Error, Debug)]
pub enum DigestError {
    /// File not found.
    ///
    /// Returned when an input path does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading pages or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTML query errors.
    ///
    /// Returned when a CSS selector is invalid.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// A field recognizer could not be compiled.
    ///
    /// Only reachable through a custom [`Region`](crate::Region); the
    /// built-in patterns always compile.
    #[error("Invalid field pattern: {0}")]
    InvalidPattern(String),

    /// Region settings that cannot describe a state/zip constraint.
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// Output serialization errors.
    #[error("Failed to serialize output: {0}")]
    SerializeError(String),
}

impl From<regex::Error> for DigestError {
    fn from(err: regex::Error) -> Self {
        DigestError::InvalidPattern(err.to_string())
    }
}

impl From<fancy_regex::Error> for DigestError {
    fn from(err: fancy_regex::Error) -> Self {
        DigestError::InvalidPattern(err.to_string())
    }
}

/// Result type alias for DigestError.
pub type Result<T> = std::result::Result<T, DigestError>;
