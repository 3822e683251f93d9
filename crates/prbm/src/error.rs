//! Error types.

use prbm_decode::DecodeError;
use thiserror::Error;

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode tile: {0}")]
    Decode(#[from] DecodeError),

    #[error("invalid map settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("coordinate ({x}, {z}) is out of range for this grid")]
    OutOfRange { x: i32, z: i32 },
}
