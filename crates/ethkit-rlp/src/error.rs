//! RLP errors

use thiserror::Error;

/// RLP encode/decode error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlpError {
    /// A string or list payload is longer than the configured cap
    #[error("payload of {len} bytes exceeds limit of {limit}")]
    PayloadTooLarge {
        /// Offending payload length
        len: usize,
        /// Cap in force
        limit: usize,
    },

    /// Input ends before the item does
    #[error("input is too short")]
    Truncated,

    /// Length prefix not in its shortest form
    #[error("non-canonical length prefix")]
    NonCanonicalSize,

    /// Bytes left over after the top-level item
    #[error("{0} trailing bytes after item")]
    TrailingBytes(usize),

    /// List nesting deeper than the decoder accepts
    #[error("list nesting exceeds {0}")]
    TooDeep(usize),

    /// Found a list where a string was expected
    #[error("expected a byte string")]
    ExpectedBytes,

    /// Found a string where a list was expected
    #[error("expected a list")]
    ExpectedList,

    /// Integer wider than the target type, or with leading zeros
    #[error("invalid integer for {0}")]
    InvalidInteger(&'static str),
}
