//! # ethkit-crypto
//!
//! Cryptographic primitives for ethkit.
//!
//! - Keccak-256 hashing
//! - Deterministic ECDSA signing (secp256k1) with EIP-155 `v`
//! - Public key recovery
//! - Address derivation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod hash;
mod signature;

pub use error::CryptoError;
pub use hash::{keccak256, keccak256_parts};
pub use signature::{
    private_key_from_slice, private_key_to_address, public_key_to_address, recover_public_key,
    sign, sign_with, verify, PrivateKey, PublicKey, SignOptions, Signature,
};
