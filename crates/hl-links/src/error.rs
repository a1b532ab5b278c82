//! Link-subsystem error type.

use thiserror::Error;

/// Errors produced by `hl-links`.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("unknown system: {0}")]
    UnknownSystem(String),

    #[error("cannot link {0} to itself")]
    SelfLink(String),

    #[error("snapshot parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LinkResult<T> = Result<T, LinkError>;
