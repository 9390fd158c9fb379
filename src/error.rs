//! Error types for the cache subsystem
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache subsystem.
///
/// `InvalidPattern` never crosses the public API boundary: pattern
/// operations log it and report a no-op (rule ignored, zero keys removed).
#[derive(Error, Debug)]
pub enum CacheError {
    /// No store registered under the requested namespace
    #[error("Unknown cache store: {0}")]
    UnknownStore(String),

    /// Malformed regex passed to a pattern operation
    #[error("Invalid invalidation pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// The compilation failure
        #[source]
        source: regex::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the cache subsystem.
pub type Result<T> = std::result::Result<T, CacheError>;
