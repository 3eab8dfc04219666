//! Ether denominations

use std::str::FromStr;

use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::BigDecimal;
use ethkit_primitives::{int::u256_from_be_slice, PrimitiveError, U256};

/// Decimals of one gwei
pub const GWEI_DECIMALS: u32 = 9;

/// Decimals of one ether
pub const ETHER_DECIMALS: u32 = 18;

/// Amount already in wei
pub fn wei(amount: u64) -> U256 {
    U256::from(amount)
}

/// `amount` gwei in wei
pub fn gwei(amount: u64) -> U256 {
    U256::from(amount) * U256::exp10(GWEI_DECIMALS as usize)
}

/// `amount` ether in wei
pub fn ether(amount: u64) -> U256 {
    U256::from(amount) * U256::exp10(ETHER_DECIMALS as usize)
}

/// Parse a decimal amount such as `"1.5"` into base units.
///
/// Fails on negative amounts, on more fractional digits than `decimals`
/// and on results wider than 256 bits.
pub fn parse_units(amount: &str, decimals: u32) -> Result<U256, PrimitiveError> {
    let invalid = || PrimitiveError::InvalidDecimal(amount.to_string());
    let value = BigDecimal::from_str(amount.trim()).map_err(|_| invalid())?;
    let scaled = value * BigDecimal::new(BigInt::from(1), -(decimals as i64));
    let integral = scaled.with_scale(0);
    if integral != scaled {
        return Err(invalid());
    }
    let (digits, _) = integral.as_bigint_and_exponent();
    let (sign, bytes) = digits.to_bytes_be();
    if sign == Sign::Minus {
        return Err(invalid());
    }
    u256_from_be_slice(&bytes)
}

/// Render base units as a decimal string, trailing zeros removed
pub fn format_units(amount: &U256, decimals: u32) -> String {
    let (whole, fraction) = match U256::from(10u64).checked_pow(U256::from(decimals)) {
        Some(unit) => (*amount / unit, *amount % unit),
        None => (U256::zero(), *amount),
    };
    let fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}
