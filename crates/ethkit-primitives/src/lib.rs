//! # ethkit-primitives
//!
//! Primitive types shared by the ethkit codecs and signer.
//!
//! - [`Address`] and [`H256`] fixed-width byte types
//! - [`U256`] (re-exported from `primitive-types`) and the signed [`I256`]
//! - [`int`]: big-endian byte conversion, padding and width checks
//! - [`hexstr`]: `0x`-prefixed hex for JSON-RPC quantities and byte strings

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;
pub mod hexstr;
pub mod int;

pub use address::{Address, AddressError};
pub use error::PrimitiveError;
pub use hash::{Hash, HashError, H256};
pub use int::I256;

pub use primitive_types::U256;

/// Transaction nonce type
pub type Nonce = u64;

/// Chain identifier used for EIP-155 replay protection
pub type ChainId = u64;
