//! Crate-wide error taxonomy.
//!
//! Four caller-visible failure classes: missing or foreign-owned records,
//! rejected input, rendering failures, and storage errors. Asset-resolution
//! failures have no variant here on purpose — a missing clinic logo degrades
//! to "no logo" instead of failing an export.

use thiserror::Error;

/// The unified error type returned by all public rxpad API functions.
#[derive(Debug, Error)]
pub enum Error {
    /// The prescription does not exist, or belongs to another user.
    /// The two cases are intentionally indistinguishable.
    #[error("prescription not found")]
    NotFound,

    /// Malformed or out-of-bound input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Document layout, rasterization, or PDF encoding failed.
    #[error("render failed: {0}")]
    Render(String),

    /// The persistence layer failed.
    #[error("storage error: {0}")]
    Store(#[from] sqlx::Error),

    /// Reading or writing a stored asset failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
