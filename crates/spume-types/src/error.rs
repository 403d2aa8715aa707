//! Error types for the Spume collision core.
//!
//! All crates return `SpumeResult<T>` from fallible operations. The hot
//! collision path itself is infallible by design — "no true overlap" is
//! an expected `None`, not an error — so these variants cover the
//! construction, configuration, and tooling surfaces only.

use thiserror::Error;

/// Unified error type for the Spume collision core.
#[derive(Debug, Error)]
pub enum SpumeError {
    /// Body data is malformed (non-positive radius, non-finite position).
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Worker pool construction failed.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A simulation invariant was violated (e.g., an immovable body moved).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, SpumeError>`.
pub type SpumeResult<T> = Result<T, SpumeError>;
