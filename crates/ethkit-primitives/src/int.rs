//! Big-integer byte conversion.
//!
//! Everything on the wire is big-endian. RLP wants the minimal form (zero is
//! the empty string), ABI wants 32-byte words with two's complement for
//! negative values.

use crate::PrimitiveError;
use primitive_types::U256;
use std::fmt;
use std::str::FromStr;

/// Width of an EVM word in bytes
pub const WORD: usize = 32;

/// Signed 256-bit integer.
///
/// Stored as sign and magnitude; zero is never negative. The range is
/// `-2^255 ..= 2^255 - 1`, matching `int256`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I256 {
    negative: bool,
    abs: U256,
}

impl I256 {
    /// Zero
    pub const ZERO: I256 = I256 {
        negative: false,
        abs: U256::zero(),
    };

    /// Build from sign and magnitude; `None` when outside the `int256` range.
    pub fn new(negative: bool, abs: U256) -> Option<Self> {
        let limit = U256::one() << 255;
        if abs.is_zero() {
            return Some(Self::ZERO);
        }
        if (negative && abs > limit) || (!negative && abs >= limit) {
            return None;
        }
        Some(I256 { negative, abs })
    }

    /// Non-negative value from an unsigned magnitude
    pub fn from_unsigned(abs: U256) -> Option<Self> {
        Self::new(false, abs)
    }

    /// Convert from a native integer
    pub fn from_i128(value: i128) -> Self {
        I256 {
            negative: value < 0,
            abs: U256::from(value.unsigned_abs()),
        }
    }

    /// Magnitude
    pub fn abs(&self) -> U256 {
        self.abs
    }

    /// True for values below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// True for zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Convert to a native integer if it fits
    pub fn to_i128(&self) -> Option<i128> {
        if !self.fits_bits(128) {
            return None;
        }
        let low = self.abs.low_u128();
        if self.negative {
            // -2^127 has no positive counterpart
            Some((low as i128).wrapping_neg())
        } else {
            Some(low as i128)
        }
    }

    /// Whether the value is representable as `int<width>`
    pub fn fits_bits(&self, width: usize) -> bool {
        if width == 0 {
            return self.is_zero();
        }
        if width >= 256 {
            return true;
        }
        let limit = U256::one() << (width - 1);
        if self.negative {
            self.abs <= limit
        } else {
            self.abs < limit
        }
    }

    /// 32-byte two's complement encoding
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let raw = if self.negative {
            (!self.abs).overflowing_add(U256::one()).0
        } else {
            self.abs
        };
        u256_to_be_bytes(&raw)
    }

    /// Decode a 32-byte two's complement word
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let raw = U256::from_big_endian(bytes);
        if bytes[0] & 0x80 == 0 {
            return I256 {
                negative: false,
                abs: raw,
            };
        }
        I256 {
            negative: true,
            abs: (!raw).overflowing_add(U256::one()).0,
        }
    }
}

impl fmt::Debug for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I256({})", self)
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

impl FromStr for I256 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let abs = U256::from_dec_str(digits)
            .map_err(|_| PrimitiveError::InvalidDecimal(s.to_string()))?;
        I256::new(negative, abs).ok_or(PrimitiveError::Overflow("int256"))
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        I256::from_i128(value as i128)
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        I256::from_i128(value)
    }
}

/// Full 32-byte big-endian form of a `U256`
pub fn u256_to_be_bytes(value: &U256) -> [u8; 32] {
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    out
}

/// Read a big-endian unsigned integer of at most 32 bytes
pub fn u256_from_be_slice(bytes: &[u8]) -> Result<U256, PrimitiveError> {
    if bytes.len() > WORD {
        return Err(PrimitiveError::Overflow("uint256"));
    }
    Ok(U256::from_big_endian(bytes))
}

/// Strip leading zero bytes
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Minimal big-endian form. Zero is the empty sequence.
pub fn to_minimal_be(value: &U256) -> Vec<u8> {
    let full = u256_to_be_bytes(value);
    trim_leading_zeros(&full).to_vec()
}

/// Minimal big-endian form of a native integer
pub fn u64_to_minimal_be(value: u64) -> Vec<u8> {
    trim_leading_zeros(&value.to_be_bytes()).to_vec()
}

/// Left-pad with zeros to `len`; longer input is returned unchanged
pub fn pad_left(bytes: &[u8], len: usize) -> Vec<u8> {
    if bytes.len() >= len {
        return bytes.to_vec();
    }
    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(bytes);
    out
}

/// Right-pad with zeros to the next multiple of 32
pub fn pad_right(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out.resize(padded_len(bytes.len()), 0);
    out
}

/// `len` rounded up to a whole number of words
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// Whether `value` is representable as `uint<width>`
pub fn unsigned_fits(value: &U256, width: usize) -> bool {
    value.bits() <= width
}

/// Solidity integer widths: 8 to 256 in steps of 8
pub fn is_valid_int_width(width: usize) -> bool {
    (8..=256).contains(&width) && width % 8 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== I256 ====================

    #[test]
    fn test_negative_two_complement() {
        let v = I256::from_i128(-642);
        let bytes = v.to_be_bytes();
        assert_eq!(
            hex::encode(bytes),
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffd7e"
        );
        assert_eq!(I256::from_be_bytes(&bytes), v);
    }

    #[test]
    fn test_minus_one_all_ones() {
        assert_eq!(I256::from_i128(-1).to_be_bytes(), [0xff; 32]);
    }

    #[test]
    fn test_int256_bounds() {
        let max = I256::new(false, (U256::one() << 255) - 1).unwrap();
        let min = I256::new(true, U256::one() << 255).unwrap();
        assert!(I256::new(false, U256::one() << 255).is_none());
        assert!(I256::new(true, (U256::one() << 255) + 1).is_none());

        let mut expected_min = [0u8; 32];
        expected_min[0] = 0x80;
        assert_eq!(min.to_be_bytes(), expected_min);
        assert_eq!(I256::from_be_bytes(&expected_min), min);
        assert_eq!(I256::from_be_bytes(&max.to_be_bytes()), max);
    }

    #[test]
    fn test_zero_never_negative() {
        let z = I256::new(true, U256::zero()).unwrap();
        assert!(!z.is_negative());
        assert_eq!(z, I256::ZERO);
        assert_eq!(I256::from_i128(0), I256::ZERO);
    }

    #[test]
    fn test_fits_bits() {
        assert!(I256::from_i128(127).fits_bits(8));
        assert!(!I256::from_i128(128).fits_bits(8));
        assert!(I256::from_i128(-128).fits_bits(8));
        assert!(!I256::from_i128(-129).fits_bits(8));
        assert!(I256::from_i128(i128::MIN).fits_bits(128));
        assert!(!I256::from_i128(i128::MIN).fits_bits(120));
    }

    #[test]
    fn test_to_i128() {
        assert_eq!(I256::from_i128(i128::MIN).to_i128(), Some(i128::MIN));
        assert_eq!(I256::from_i128(i128::MAX).to_i128(), Some(i128::MAX));
        let big = I256::from_unsigned(U256::one() << 130).unwrap();
        assert_eq!(big.to_i128(), None);
    }

    #[test]
    fn test_i256_parse_display() {
        let v: I256 = "-642".parse().unwrap();
        assert_eq!(v, I256::from_i128(-642));
        assert_eq!(v.to_string(), "-642");
        assert_eq!("0".parse::<I256>().unwrap().to_string(), "0");
        assert!("12x".parse::<I256>().is_err());
    }

    // ==================== Byte conversion ====================

    #[test]
    fn test_minimal_be() {
        assert!(to_minimal_be(&U256::zero()).is_empty());
        assert_eq!(to_minimal_be(&U256::from(0x0400u64)), vec![0x04, 0x00]);
        assert_eq!(u64_to_minimal_be(0), Vec::<u8>::new());
        assert_eq!(u64_to_minimal_be(37), vec![37]);
        assert_eq!(to_minimal_be(&U256::MAX), vec![0xff; 32]);
    }

    #[test]
    fn test_u256_from_be_slice() {
        assert_eq!(u256_from_be_slice(&[0x01, 0x00]).unwrap(), U256::from(256u64));
        assert_eq!(u256_from_be_slice(&[]).unwrap(), U256::zero());
        assert!(u256_from_be_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_left(&[1, 2], 4), vec![0, 0, 1, 2]);
        assert_eq!(pad_left(&[1, 2, 3], 2), vec![1, 2, 3]);
        assert!(pad_right(&[]).is_empty());
        assert_eq!(pad_right(&[0xaa]).len(), 32);
        assert_eq!(pad_right(&[0xaa; 33]).len(), 64);
        assert_eq!(padded_len(32), 32);
        assert_eq!(padded_len(40), 64);
    }

    #[test]
    fn test_widths() {
        assert!(is_valid_int_width(8));
        assert!(is_valid_int_width(256));
        assert!(!is_valid_int_width(0));
        assert!(!is_valid_int_width(12));
        assert!(!is_valid_int_width(264));
        assert!(unsigned_fits(&U256::from(255u64), 8));
        assert!(!unsigned_fits(&U256::from(256u64), 8));
    }

    proptest! {
        #[test]
        fn prop_i128_word_roundtrip(v in any::<i128>()) {
            let word = I256::from_i128(v).to_be_bytes();
            prop_assert_eq!(I256::from_be_bytes(&word).to_i128(), Some(v));
        }

        #[test]
        fn prop_minimal_be_has_no_leading_zero(v in any::<u64>()) {
            let bytes = u64_to_minimal_be(v);
            prop_assert!(bytes.first().map_or(true, |b| *b != 0));
            prop_assert_eq!(to_minimal_be(&U256::from(v)), bytes);
        }
    }
}
