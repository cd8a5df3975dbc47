//! Crate error type
//!
//! Errors only come from the edges: loading tuning files and reading or
//! writing high scores. Ticking the simulation never fails.

use thiserror::Error;

/// Errors raised by configuration and persistence
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed or produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A tuning value is out of range
    #[error("Invalid tuning value `{field}`: {reason}")]
    InvalidTuning {
        field: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
