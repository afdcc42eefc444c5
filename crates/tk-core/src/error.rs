//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `TickError` via `From` impls, or keep them separate.  The scheduler itself
//! is total; errors only arise at configuration and persistence boundaries.

use thiserror::Error;

/// The top-level error type for `tk-core`.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tk-core`.
pub type TickResult<T> = Result<T, TickError>;
