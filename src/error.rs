//! Error types for typed buffer encoding and decoding.

/// Errors that can occur while encoding or decoding typed buffers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypedBufError {
    /// No bytes are left to decode. A normal end-of-sequence condition.
    #[error("empty buffer")]
    EmptyBuffer,

    #[error("corrupted buffer: {0}")]
    Corrupted(String),

    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("byte string too long: {len} bytes (max {max})")]
    Oversize { len: u64, max: u64 },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl TypedBufError {
    /// Wraps any displayable message as a corrupted-buffer error.
    pub fn corrupted(e: impl std::fmt::Display) -> Self {
        Self::Corrupted(e.to_string())
    }

    /// Returns `true` for the end-of-data condition.
    pub fn is_empty_buffer(&self) -> bool {
        matches!(self, Self::EmptyBuffer)
    }
}
