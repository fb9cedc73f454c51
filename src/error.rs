//! @acp:module "Errors"
//! @acp:summary "Error types for storage ports, configuration and the CLI surface"
//! @acp:domain cli
//! @acp:layer model
//!
//! The gate and the collection stores never hand these to their callers:
//! they log and fall back. Errors only surface from the ports themselves,
//! from config loading and from the command layer.

use thiserror::Error;

/// @acp:summary "Failure of a storage backend (session or local area)"
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached (private mode, no backend yet)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A write would exceed the backend's quota
    #[error("quota exceeded writing '{key}': {needed} bytes needed, limit {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing data could not be decoded
    #[error("corrupt storage data: {0}")]
    Corrupt(String),
}

/// @acp:summary "Crate-level error type"
#[derive(Debug, Error)]
pub enum GateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
