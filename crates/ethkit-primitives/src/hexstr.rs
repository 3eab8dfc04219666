//! `0x`-prefixed hex as used by JSON-RPC.
//!
//! Quantities are lower-case with no leading zeros (`0x0` for zero). Byte
//! strings always carry an even number of digits.

use crate::int::to_minimal_be;
use crate::PrimitiveError;
use primitive_types::U256;

/// Encode bytes as `0x…`, two digits per byte
pub fn encode_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Encode a quantity
pub fn encode_quantity(value: &U256) -> String {
    if value.is_zero() {
        return "0x0".to_string();
    }
    let digits = hex::encode(to_minimal_be(value));
    format!("0x{}", digits.trim_start_matches('0'))
}

/// Encode a native quantity
pub fn encode_u64(value: u64) -> String {
    format!("{:#x}", value)
}

/// Decode a byte string; the prefix is optional, odd digit counts are rejected
pub fn decode_bytes(s: &str) -> Result<Vec<u8>, PrimitiveError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| PrimitiveError::InvalidHex(format!("{}: {}", s, e)))
}

/// Decode a quantity; requires the prefix and at most 64 digits
pub fn decode_quantity(s: &str) -> Result<U256, PrimitiveError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| PrimitiveError::InvalidHex(format!("{}: missing 0x prefix", s)))?;
    if digits.is_empty() {
        return Err(PrimitiveError::InvalidHex(format!("{}: no digits", s)));
    }
    if digits.len() > 64 {
        return Err(PrimitiveError::Overflow("uint256"));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| PrimitiveError::InvalidHex(format!("{}: {}", s, e)))
}

/// Decode a quantity that must fit in a `u64`
pub fn decode_u64(s: &str) -> Result<u64, PrimitiveError> {
    let value = decode_quantity(s)?;
    if value.bits() > 64 {
        return Err(PrimitiveError::Overflow("u64"));
    }
    Ok(value.low_u64())
}
