//! Room errors.

use thiserror::Error;

/// Faults raised by a room. Input normalization never produces one of these.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Room is busy: a mutation is already running")]
    Reentrant,
    #[error("Invalid room configuration: {0}")]
    Config(String),
}

/// Result type for room operations.
pub type RoomResult<T> = Result<T, RoomError>;
