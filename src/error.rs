//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror. The public pool and
//! manager surface folds these into `bool`/`Option` results; the variants
//! are exposed for callers that want to log why a write was rejected.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Value could not be round-tripped through serialization
    #[error("Transform failed: {0}")]
    Transform(#[from] serde_json::Error),

    /// Pool was configured with `max_entries == 0`
    #[error("Pool has zero capacity")]
    ZeroCapacity,

    /// Category name is not part of the policy table
    #[error("Unknown cache category: {0}")]
    UnknownCategory(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
