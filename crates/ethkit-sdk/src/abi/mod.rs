//! Solidity ABI encoding and decoding
//!
//! Values are typed ([`AbiValue`]) and types can be parsed from their
//! canonical strings ([`parse_type`]). Function calls are a 4-byte selector
//! followed by the arguments laid out as a tuple.
//!
//! # Example
//!
//! ```rust
//! use ethkit_sdk::abi::{decode, encode_function_call, function_selector, AbiValue, ParamType};
//! use ethkit_primitives::{Address, U256};
//!
//! let selector = function_selector("transfer(address,uint256)");
//! let data = encode_function_call(
//!     selector,
//!     &[AbiValue::Address(Address::ZERO), AbiValue::uint256(1000u64)],
//! )
//! .unwrap();
//! assert_eq!(data.len(), 4 + 64);
//!
//! let returned = [0u8; 32];
//! let balance = decode(&returned, &[ParamType::Uint(256)]).unwrap();
//! assert_eq!(balance[0].as_uint(), Some(&U256::zero()));
//! ```

mod decode;
mod encode;
mod error;
mod parse;
mod types;

pub use decode::{decode, decode_tuple};
pub use encode::{encode, encode_function_call, encode_tuple, function_selector};
pub use error::AbiError;
pub use parse::{parse_signature, parse_type};
pub use types::{AbiValue, FixedPoint, ParamType, MAX_FIXED_DECIMALS};
