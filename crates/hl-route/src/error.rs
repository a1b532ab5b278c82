//! Route-subsystem error type.

use thiserror::Error;

/// Errors produced by `hl-route`.
///
/// `NoRoute` is a normal negative result — an exhausted search, not a fault.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("unknown system: {0}")]
    UnknownSystem(String),

    #[error("system {0} has no connections")]
    Disconnected(String),

    #[error("no route from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error("invalid jump policy: {0:?}")]
    InvalidPolicy(String),
}

pub type RouteResult<T> = Result<T, RouteError>;
