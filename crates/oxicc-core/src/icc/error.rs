//! ICC Codec Error Types

use std::fmt;

/// Errors that can occur when parsing or serializing ICC profiles
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IccError {
    /// Profile data is too small
    TooSmall { expected: usize, actual: usize },
    /// Invalid profile signature (should be 'acsp')
    InvalidSignature(u32),
    /// Tag table declares more entries than any sane profile carries
    TooManyTags(u32),
    /// Tag table runs past the end of the data
    TruncatedTagTable { count: u32, available: usize },
    /// Tag payload could not be encoded
    Encode { tag: u32, reason: String },
    /// Output buffer does not match the encoded length
    BufferSize { expected: usize, actual: usize },
    /// Corrupted or invalid data
    CorruptedData(String),
}

impl fmt::Display for IccError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { expected, actual } => {
                write!(
                    f,
                    "Profile too small: expected {} bytes, got {}",
                    expected, actual
                )
            }
            Self::InvalidSignature(sig) => {
                write!(
                    f,
                    "Invalid profile signature: 0x{:08X} (expected 'acsp')",
                    sig
                )
            }
            Self::TooManyTags(count) => {
                write!(f, "Tag table declares {} entries", count)
            }
            Self::TruncatedTagTable { count, available } => {
                write!(
                    f,
                    "Tag table of {} entries does not fit in {} bytes",
                    count, available
                )
            }
            Self::Encode { tag, reason } => {
                write!(f, "Cannot encode tag '{:08X}': {}", tag, reason)
            }
            Self::BufferSize { expected, actual } => {
                write!(
                    f,
                    "Output buffer is {} bytes, profile needs {}",
                    actual, expected
                )
            }
            Self::CorruptedData(msg) => {
                write!(f, "Corrupted data: {}", msg)
            }
        }
    }
}

impl std::error::Error for IccError {}
