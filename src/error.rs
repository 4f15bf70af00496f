//! Error types for the cache and http surfaces.
//!
//! The conversion layer never uses these: its contract is absence on
//! failure, not an error value.

use thiserror::Error;

/// Errors surfaced by the cache wrapper and logging middleware.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON encoding or decoding of a cached payload failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying cache store reported a failure.
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Convenience alias used throughout the cache and http modules.
pub type Result<T> = std::result::Result<T, Error>;
