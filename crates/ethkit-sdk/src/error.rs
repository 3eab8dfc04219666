//! SDK error types

use ethkit_crypto::CryptoError;
use ethkit_primitives::{AddressError, HashError, PrimitiveError};
use ethkit_rlp::RlpError;
use thiserror::Error;

use crate::abi::AbiError;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport/network error
    #[error("transport error: {0}")]
    Transport(String),

    /// Error object returned by the node, passed through untouched
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// ABI encoding or decoding
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// RLP encoding or decoding
    #[error(transparent)]
    Rlp(#[from] RlpError),

    /// Key handling, signing or recovery
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Hex, address or quantity parsing
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// Invalid hex string
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// JSON (de)serialization
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Chain id 0 offers no replay protection
    #[error("invalid chain ID: {0}")]
    InvalidChainId(u64),

    /// The zero address cannot sign
    #[error("zero address cannot be used as a signer")]
    ZeroAddressSigner,

    /// Function name not present in a contract description
    #[error("unknown function: {0}")]
    UnknownFunction(String),
}

impl From<AddressError> for SdkError {
    fn from(e: AddressError) -> Self {
        SdkError::Primitive(e.into())
    }
}

impl From<HashError> for SdkError {
    fn from(e: HashError) -> Self {
        SdkError::Primitive(e.into())
    }
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

impl From<toml::de::Error> for SdkError {
    fn from(e: toml::de::Error) -> Self {
        SdkError::Config(e.to_string())
    }
}
