//! Error types for reading encoding and decoding

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while encoding or decoding readings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Buffer is shorter than the next fixed-width field
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },

    /// Buffer ran out before the text terminator was found
    #[error("unterminated text field in {remaining} remaining bytes")]
    UnterminatedText { remaining: usize },

    /// Text bytes are not valid UTF-8
    #[error("text field is not valid UTF-8")]
    InvalidText,

    /// Text to encode contains the terminator byte
    #[error("text field contains a nul byte at offset {offset}")]
    TextContainsNul { offset: usize },

    /// Tag does not name any known reading kind
    #[error("unknown reading kind tag {0:#04x}")]
    UnknownKind(i64),

    /// Integer does not fit the logical type of its field
    #[error("value {value} out of range for field '{field}'")]
    IntegerOutOfRange { field: &'static str, value: i64 },
}

impl CodecError {
    /// Create an unexpected end error
    #[inline]
    pub fn unexpected_end(needed: usize, remaining: usize) -> Self {
        Self::UnexpectedEnd { needed, remaining }
    }

    /// Create an out of range error
    #[inline]
    pub fn out_of_range(field: &'static str, value: i64) -> Self {
        Self::IntegerOutOfRange { field, value }
    }
}

/// Errors raised by the latest-snapshot cache
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Temperature sensor id has no slot in the cache
    #[error("temperature sensor {sensor_id} exceeds cache capacity {capacity}")]
    SensorOutOfRange { sensor_id: u8, capacity: usize },
}
