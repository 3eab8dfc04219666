//! ABI codec errors

use thiserror::Error;

/// ABI encode/decode error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Buffer length is not a whole number of words, or a read runs past its end
    #[error("truncated buffer: {0}")]
    TruncatedBuffer(String),

    /// Type string or type parameters outside what the ABI allows
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Value does not match its declared type
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Declared type
        expected: String,
        /// Type of the value actually given
        found: String,
    },

    /// Integer or decimal does not fit its declared width
    #[error("value out of range for {0}")]
    ValueOutOfRange(String),

    /// String payload is not UTF-8
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,

    /// Word content that no encoder would produce
    #[error("invalid data: {0}")]
    InvalidData(String),
}
