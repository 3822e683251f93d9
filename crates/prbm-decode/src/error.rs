//! Decode errors.

use thiserror::Error;

/// Result alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while decoding a PRBM buffer.
///
/// Every variant records the byte offset at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of data at offset {offset}: could not read {requested} bytes")]
    UnexpectedEndOfData { offset: usize, requested: usize },

    #[error("unsupported PRBM version {version} at offset {offset}")]
    UnsupportedVersion { offset: usize, version: u8 },

    #[error("unsupported encoding at offset {offset}: only little-endian tiles are supported")]
    UnsupportedEncoding { offset: usize },

    #[error("malformed header at offset {offset}: {reason}")]
    MalformedHeader { offset: usize, reason: String },

    #[error("attribute '{name}' at offset {offset} needs {required} bytes, {available} available")]
    AttributeSizeMismatch {
        offset: usize,
        name: String,
        required: u64,
        available: usize,
    },

    #[error("malformed material group at offset {offset}: {reason}")]
    MalformedMaterialGroup { offset: usize, reason: String },

    #[error("attribute name at offset {offset} is not ASCII")]
    InvalidAttributeName { offset: usize },

    #[error("attribute '{name}' at offset {offset} uses unknown component encoding {encoding}")]
    UnsupportedComponentType {
        offset: usize,
        name: String,
        encoding: u8,
    },

    #[error("attribute '{name}' at offset {offset} must be {expected}")]
    AttributeShapeMismatch {
        offset: usize,
        name: String,
        expected: &'static str,
    },

    #[error("attribute '{name}' at offset {offset} is declared twice")]
    DuplicateAttribute { offset: usize, name: String },
}

impl DecodeError {
    /// Byte offset at which the error was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedEndOfData { offset, .. }
            | Self::UnsupportedVersion { offset, .. }
            | Self::UnsupportedEncoding { offset }
            | Self::MalformedHeader { offset, .. }
            | Self::AttributeSizeMismatch { offset, .. }
            | Self::MalformedMaterialGroup { offset, .. }
            | Self::InvalidAttributeName { offset }
            | Self::UnsupportedComponentType { offset, .. }
            | Self::AttributeShapeMismatch { offset, .. }
            | Self::DuplicateAttribute { offset, .. } => *offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_reported() {
        let err = DecodeError::UnexpectedEndOfData {
            offset: 4,
            requested: 3,
        };
        assert_eq!(err.offset(), 4);
        assert_eq!(
            err.to_string(),
            "unexpected end of data at offset 4: could not read 3 bytes"
        );
    }

    #[test]
    fn test_message_includes_reason() {
        let err = DecodeError::MalformedHeader {
            offset: 5,
            reason: "non-indexed tile declares 3 indices".into(),
        };
        assert!(err.to_string().contains("non-indexed tile declares 3 indices"));
    }
}
