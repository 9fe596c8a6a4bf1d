//! Wire encoding error types.

use thiserror::Error;

/// Errors that can occur while encoding an outgoing message
#[derive(Debug, Error)]
pub enum SerializationError {
    /// Failed to encode a message
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
