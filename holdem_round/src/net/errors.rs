//! Network error types for serialization and framing operations.

use std::io;
use thiserror::Error;

/// Errors that can occur while framing messages
#[derive(Debug, Error)]
pub enum SerializationError {
    /// Failed to encode a message
    #[error("Failed to encode message: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Failed to decode a message
    #[error("Failed to decode message: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Message size exceeded maximum allowed
    #[error("Message size {actual} exceeds maximum {max}")]
    MessageTooLarge { actual: usize, max: usize },

    /// Not enough bytes buffered for a whole frame yet
    #[error("Frame needs {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    /// Invalid message format
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    /// Reading or writing the underlying stream failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for serialization operations
pub type Result<T> = std::result::Result<T, SerializationError>;
