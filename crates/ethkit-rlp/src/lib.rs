//! # ethkit-rlp
//!
//! RLP (Recursive Length Prefix) encoding/decoding for ethkit.
//!
//! Values are built as an explicit [`RlpValue`] tree; integers, addresses
//! and strings are converted to their canonical byte strings up front.
//!
//! ## RLP Encoding Rules
//!
//! - Single byte `[0x01, 0x7f]`: itself
//! - Single byte `0x00`: `0x80`, same as the empty string
//! - Short string (0-55 bytes): `0x80 + len` + data
//! - Long string (>55 bytes): `0xb7 + len_of_len` + len + data
//! - Short list (0-55 bytes payload): `0xc0 + len` + items
//! - Long list (>55 bytes payload): `0xf7 + len_of_len` + len + items

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, MAX_DEPTH};
pub use encode::{encode, encode_with_limit, LEGACY_PAYLOAD_LIMIT};
pub use error::RlpError;
pub use value::RlpValue;

use ethkit_crypto::keccak256;
use ethkit_primitives::Address;

/// Address of a contract created by `sender` at `nonce`:
/// the low 20 bytes of `keccak256(rlp([sender, nonce]))`
pub fn contract_address(sender: &Address, nonce: u64) -> Address {
    let encoded = encode(&RlpValue::List(vec![(*sender).into(), nonce.into()]));
    let hash = keccak256(&encoded);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(bytes)
}
