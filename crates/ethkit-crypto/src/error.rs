//! Cryptographic errors

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Every nonce counter value was rejected
    #[error("signing exhausted the nonce counter")]
    SigningExhausted,

    /// Private key bytes are not a usable scalar
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Invalid signature
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// `v` does not match the chain id
    #[error("invalid recovery id: v = {0}")]
    InvalidRecoveryId(u128),

    /// Recovery failed
    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),
}
