//! Feed-subsystem error type.
//!
//! The three variants are deliberately distinct — "the request failed", "the
//! server said no", and "the payload made no sense" are different failures
//! and are tested independently.  None of them ever propagates into query
//! handling; the refresher logs and skips the cycle.

use thiserror::Error;

/// Errors produced by `hl-feed`.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("feed payload malformed: {0}")]
    Parse(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
