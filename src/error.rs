//! Pipeline boundary error type.
//!
//! Internal plumbing uses `anyhow` with context; this enum is the shape
//! surfaced at the pipeline's public boundary so callers can distinguish
//! configuration mistakes, browser failures, and store write failures.

use thiserror::Error;

/// Errors surfaced by a pipeline run.
///
/// Per-target and per-image failures never reach this type: extraction
/// failures skip the target and media failures skip the image. What does
/// surface here is anything that would corrupt catalog invariants if ignored,
/// most importantly store write failures.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("source batch error: {0}")]
    SourceBatch(String),

    #[error("catalog store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias for results at the pipeline boundary.
pub type IngestResult<T> = Result<T, IngestError>;
