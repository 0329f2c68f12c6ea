//! Unified error types for jsonfield.
//!
//! Wraps the wire crate's encode and decode errors so field callers deal with
//! a single type.

use jsonfield_wire::{DecodeError, EncodeError};
use thiserror::Error;

/// All jsonfield errors.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The value cannot be represented as JSON text
    #[error("serialization error: {0}")]
    Serialization(#[from] EncodeError),

    /// The stored text is not valid JSON
    #[error("parse error: {0}")]
    Parse(#[from] DecodeError),

    /// Raw bytes handed to the field are not UTF-8
    #[error("invalid UTF-8 at byte {valid_up_to}")]
    InvalidUtf8 {
        /// Length of the valid prefix
        valid_up_to: usize,
    },
}

/// Result type for jsonfield operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from decoding stored text.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Check if this error came from encoding a value.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization(_) | Error::InvalidUtf8 { .. })
    }
}
