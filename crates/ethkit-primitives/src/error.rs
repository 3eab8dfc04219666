//! Common error types for primitives

use thiserror::Error;
use crate::address::AddressError;
use crate::hash::HashError;

/// Primitive operation error
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// Address error
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Hash error
    #[error("hash error: {0}")]
    Hash(#[from] HashError),

    /// Malformed hex string (bad digit, odd length, missing prefix)
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Malformed decimal integer
    #[error("invalid decimal integer: {0}")]
    InvalidDecimal(String),

    /// Quantity does not fit the target integer type
    #[error("quantity overflows {0}")]
    Overflow(&'static str),
}
