//! # Error Types
//!
//! Fine-grained failures raised while building, addressing, decoding, or
//! parsing a status list. All errors use `thiserror`.
//!
//! ## Design
//!
//! These kinds exist for diagnostics. The fetching clients collapse every
//! one of them into `QueryOutcome::InvalidState`, so callers never branch
//! on the variant.

use thiserror::Error;

/// Convenience alias used throughout `tsl-core`.
pub type Result<T, E = StatusListError> = std::result::Result<T, E>;

/// Errors produced by the status list model, codec, and token parser.
#[derive(Error, Debug)]
pub enum StatusListError {
    /// Entry index outside `[0, len)`.
    #[error("index {index} is out of range for a status list of {len} entries")]
    Range {
        /// The requested entry index.
        index: usize,
        /// Number of entries in the list.
        len: usize,
    },

    /// Status value does not fit into the configured bit width.
    #[error("value {value} exceeds the maximum status value {max} for this list")]
    ValueOutOfRange {
        /// The rejected value.
        value: u8,
        /// Largest value representable with the list's bit width.
        max: u8,
    },

    /// Bits-per-entry is not one of 1, 2, 4 or 8.
    #[error("the allowed values for bits are 1, 2, 4 and 8, got {0}")]
    InvalidBits(u8),

    /// Entry count is zero or does not fill whole bytes.
    #[error("status list size {entries} must be greater than 0 and a multiple of {entries_per_byte}")]
    InvalidSize {
        /// Requested number of entries.
        entries: usize,
        /// Entries sharing one byte at the requested width.
        entries_per_byte: usize,
    },

    /// Base64url decoding failed.
    #[error("invalid base64url encoding: {0}")]
    Decode(String),

    /// The zlib stream could not be inflated.
    #[error("failed to inflate status list: {0}")]
    Decompression(String),

    /// The packed buffer could not be deflated.
    #[error("failed to deflate status list: {0}")]
    Compression(String),

    /// The body is neither a well-formed compact token nor a status list document.
    #[error("malformed status list token: {0}")]
    MalformedToken(String),

    /// CBOR encoding or decoding failed.
    #[error("cbor error: {0}")]
    Cbor(String),

    /// A configured token verifier rejected the signature.
    #[error("token signature rejected: {0}")]
    Signature(String),
}

impl From<base64ct::Error> for StatusListError {
    fn from(err: base64ct::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_names_index_and_length() {
        let err = StatusListError::Range { index: 16, len: 16 };
        assert_eq!(
            err.to_string(),
            "index 16 is out of range for a status list of 16 entries"
        );
    }

    #[test]
    fn base64_errors_map_to_decode() {
        let err: StatusListError = base64ct::Error::InvalidEncoding.into();
        assert!(matches!(err, StatusListError::Decode(_)));
    }
}
