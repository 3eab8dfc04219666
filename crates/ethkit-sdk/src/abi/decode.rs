//! ABI decoding

use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::BigDecimal;
use ethkit_primitives::int::{unsigned_fits, WORD};
use ethkit_primitives::{Address, I256, U256};

use super::types::{AbiValue, FixedPoint, ParamType};
use super::AbiError;

/// Decode values laid out by [`encode`](super::encode): nothing for no
/// types, the bare value for one type, a tuple otherwise.
///
/// A zero-length buffer decodes as an empty `bytes`, `string` or array when
/// that is the single requested type.
pub fn decode(data: &[u8], types: &[ParamType]) -> Result<Vec<AbiValue>, AbiError> {
    check_words(data)?;
    match types {
        [] => Ok(Vec::new()),
        [single] => {
            single.validate()?;
            if data.is_empty() {
                if let Some(empty) = empty_value(single) {
                    return Ok(vec![empty]);
                }
            }
            let value = if single.is_dynamic() {
                decode_dynamic(single, data)?
            } else {
                decode_static(single, data, 0)?
            };
            Ok(vec![value])
        }
        _ => decode_tuple(data, types),
    }
}

/// Decode a head/tail tuple, whatever the number of types
pub fn decode_tuple(data: &[u8], types: &[ParamType]) -> Result<Vec<AbiValue>, AbiError> {
    check_words(data)?;
    types.iter().try_for_each(|t| t.validate())?;
    decode_sequence(types.iter(), data)
}

fn check_words(data: &[u8]) -> Result<(), AbiError> {
    if data.len() % WORD != 0 {
        return Err(AbiError::TruncatedBuffer(format!(
            "{} bytes is not a whole number of words",
            data.len()
        )));
    }
    Ok(())
}

fn empty_value(param: &ParamType) -> Option<AbiValue> {
    match param {
        ParamType::Bytes => Some(AbiValue::Bytes(Vec::new())),
        ParamType::String => Some(AbiValue::String(String::new())),
        ParamType::Array(element) => Some(AbiValue::DynArray((**element).clone(), Vec::new())),
        _ => None,
    }
}

/// Decode consecutive head slots; `region` starts at the first slot and
/// offsets are relative to it
fn decode_sequence<'a>(
    types: impl Iterator<Item = &'a ParamType>,
    region: &[u8],
) -> Result<Vec<AbiValue>, AbiError> {
    let mut values = Vec::new();
    let mut cursor = 0;
    for param in types {
        if param.is_dynamic() {
            let offset = read_usize(region, cursor)?;
            let target = region.get(offset..).ok_or_else(|| {
                AbiError::TruncatedBuffer(format!(
                    "offset {} past end of {} bytes",
                    offset,
                    region.len()
                ))
            })?;
            values.push(decode_dynamic(param, target)?);
            cursor += WORD;
        } else {
            values.push(decode_static(param, region, cursor)?);
            cursor += param.head_size();
        }
    }
    Ok(values)
}

/// Decode a dynamic value whose encoding starts at `region[0]`
fn decode_dynamic(param: &ParamType, region: &[u8]) -> Result<AbiValue, AbiError> {
    match param {
        ParamType::Bytes => Ok(AbiValue::Bytes(read_bytes(region)?.to_vec())),
        ParamType::String => {
            let bytes = read_bytes(region)?;
            let s = std::str::from_utf8(bytes).map_err(|_| AbiError::InvalidUtf8)?;
            Ok(AbiValue::String(s.to_string()))
        }
        ParamType::Array(element) => {
            let count = read_usize(region, 0)?;
            let body = &region[WORD..];
            let needed = count.checked_mul(element.head_size().max(1));
            if needed.map_or(true, |n| n > body.len()) {
                return Err(AbiError::TruncatedBuffer(format!(
                    "{} elements of {} do not fit in {} bytes",
                    count,
                    element,
                    body.len()
                )));
            }
            let values = decode_sequence(std::iter::repeat(&**element).take(count), body)?;
            Ok(AbiValue::DynArray((**element).clone(), values))
        }
        ParamType::FixedArray(element, len) => {
            let values = decode_sequence(std::iter::repeat(&**element).take(*len), region)?;
            Ok(AbiValue::FixedArray((**element).clone(), values))
        }
        ParamType::Tuple(types) => Ok(AbiValue::Tuple(decode_sequence(types.iter(), region)?)),
        _ => decode_static(param, region, 0),
    }
}

/// Decode a static value occupying `data[pos..pos + static_size]`
fn decode_static(param: &ParamType, data: &[u8], pos: usize) -> Result<AbiValue, AbiError> {
    match param {
        ParamType::FixedArray(element, len) => {
            let size = element.head_size();
            let values = (0..*len)
                .map(|i| decode_static(element, data, pos + i * size))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(AbiValue::FixedArray((**element).clone(), values));
        }
        ParamType::Tuple(types) => {
            let mut values = Vec::with_capacity(types.len());
            let mut cursor = pos;
            for t in types {
                values.push(decode_static(t, data, cursor)?);
                cursor += t.head_size();
            }
            return Ok(AbiValue::Tuple(values));
        }
        _ => {}
    }

    let word = read_word(data, pos)?;
    let invalid = |what: &str| AbiError::InvalidData(format!("{} for {}", what, param));
    let value = match param {
        ParamType::Uint(bits) => {
            let v = U256::from_big_endian(word);
            if !unsigned_fits(&v, *bits) {
                return Err(invalid("value wider than type"));
            }
            AbiValue::UInt(*bits, v)
        }
        ParamType::Int(bits) => {
            let v = I256::from_be_bytes(word);
            if !v.fits_bits(*bits) {
                return Err(invalid("value not sign-extended"));
            }
            AbiValue::Int(*bits, v)
        }
        ParamType::Bool => match word[31] {
            0 | 1 if word[..31].iter().all(|b| *b == 0) => AbiValue::Bool(word[31] == 1),
            _ => return Err(invalid("non-canonical boolean")),
        },
        ParamType::Address => {
            if word[..12].iter().any(|b| *b != 0) {
                return Err(invalid("dirty high bytes"));
            }
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&word[12..]);
            AbiValue::Address(Address::from_bytes(bytes))
        }
        ParamType::FixedBytes(size) => {
            if word[*size..].iter().any(|b| *b != 0) {
                return Err(invalid("non-zero padding"));
            }
            AbiValue::FixedBytes(word[..*size].to_vec())
        }
        ParamType::Fixed {
            signed,
            bits,
            decimals,
        } => {
            let digits = if *signed {
                let v = I256::from_be_bytes(word);
                if !v.fits_bits(*bits) {
                    return Err(invalid("value not sign-extended"));
                }
                let sign = if v.is_negative() { Sign::Minus } else { Sign::Plus };
                BigInt::from_bytes_be(sign, &ethkit_primitives::int::u256_to_be_bytes(&v.abs()))
            } else {
                let v = U256::from_big_endian(word);
                if !unsigned_fits(&v, *bits) {
                    return Err(invalid("value wider than type"));
                }
                BigInt::from_bytes_be(Sign::Plus, word)
            };
            AbiValue::Fixed(FixedPoint::new(
                *signed,
                *bits,
                *decimals,
                BigDecimal::new(digits, *decimals as i64),
            ))
        }
        ParamType::Function => {
            if word[24..].iter().any(|b| *b != 0) {
                return Err(invalid("non-zero padding"));
            }
            let mut addr = [0u8; 20];
            addr.copy_from_slice(&word[..20]);
            let mut selector = [0u8; 4];
            selector.copy_from_slice(&word[20..24]);
            AbiValue::FunctionRef(Address::from_bytes(addr), selector)
        }
        ParamType::Bytes
        | ParamType::String
        | ParamType::Array(_)
        | ParamType::FixedArray(..)
        | ParamType::Tuple(_) => return Err(invalid("dynamic type in static position")),
    };
    Ok(value)
}

fn read_word(data: &[u8], pos: usize) -> Result<&[u8; 32], AbiError> {
    pos.checked_add(WORD)
        .and_then(|end| data.get(pos..end))
        .and_then(|w| w.try_into().ok())
        .ok_or_else(|| {
            AbiError::TruncatedBuffer(format!("word at {} past end of {} bytes", pos, data.len()))
        })
}

/// A length or offset word; anything beyond `usize` cannot index the buffer
fn read_usize(data: &[u8], pos: usize) -> Result<usize, AbiError> {
    let v = U256::from_big_endian(read_word(data, pos)?);
    if v > U256::from(usize::MAX) {
        return Err(AbiError::TruncatedBuffer(format!("length {} exceeds buffer", v)));
    }
    Ok(v.as_usize())
}

/// Length-prefixed payload at the start of `region`
fn read_bytes(region: &[u8]) -> Result<&[u8], AbiError> {
    let len = read_usize(region, 0)?;
    let body = &region[WORD..];
    body.get(..len).ok_or_else(|| {
        AbiError::TruncatedBuffer(format!("{} bytes declared, {} available", len, body.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(n: u64) -> String {
        format!("{:064x}", n)
    }

    fn unhex(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    // ==================== Elementary values ====================

    #[test]
    fn test_decode_uint_and_address() {
        let addr = Address::from_hex("0x742d35cc6634c0532925a3b844bc9e7595f0ab3d").unwrap();
        let mut encoded = [0u8; 64];
        encoded[12..32].copy_from_slice(addr.as_bytes());
        encoded[63] = 100;

        let values = decode(&encoded, &[ParamType::Address, ParamType::Uint(256)]).unwrap();
        assert_eq!(values, vec![AbiValue::Address(addr), AbiValue::uint256(100u64)]);
    }

    #[test]
    fn test_decode_negative_ints_every_width() {
        let all_ones = [0xffu8; 32];
        for bits in (8..=256).step_by(8) {
            let values = decode(&all_ones, &[ParamType::Int(bits)]).unwrap();
            assert_eq!(values[0], AbiValue::Int(bits, I256::from_i128(-1)));
        }
    }

    #[test]
    fn test_decode_rejects_unextended_int() {
        // 0xff in the low byte only is 255, which int8 cannot hold
        let data = unhex(&word(0xff));
        assert!(matches!(decode(&data, &[ParamType::Int(8)]), Err(AbiError::InvalidData(_))));
        assert!(decode(&data, &[ParamType::Int(16)]).is_ok());
    }

    #[test]
    fn test_decode_bool_strict() {
        assert_eq!(
            decode(&unhex(&word(1)), &[ParamType::Bool]).unwrap(),
            vec![AbiValue::Bool(true)]
        );
        assert!(matches!(
            decode(&unhex(&word(2)), &[ParamType::Bool]),
            Err(AbiError::InvalidData(_))
        ));
    }

    #[test]
    fn test_decode_fixed_bytes() {
        let data = unhex("0102030000000000000000000000000000000000000000000000000000000000");
        assert_eq!(
            decode(&data, &[ParamType::FixedBytes(3)]).unwrap(),
            vec![AbiValue::FixedBytes(vec![1, 2, 3])]
        );
        // bytes3 is not uint8[3]
        let arr = decode(&data, &[ParamType::FixedArray(Box::new(ParamType::Uint(8)), 3)]);
        assert!(arr.is_err());
    }

    // ==================== Dynamic values ====================

    #[test]
    fn test_decode_string_alone() {
        let abc = "4142430000000000000000000000000000000000000000000000000000000000";
        let data = unhex(&format!("{}{}", word(3), abc));
        assert_eq!(decode(&data, &[ParamType::String]).unwrap(), vec![AbiValue::string("ABC")]);
    }

    #[test]
    fn test_decode_empty_buffer_as_empty_dynamic() {
        assert_eq!(decode(&[], &[ParamType::String]).unwrap(), vec![AbiValue::string("")]);
        assert_eq!(decode(&[], &[ParamType::Bytes]).unwrap(), vec![AbiValue::bytes(vec![])]);
        assert_eq!(
            decode(&[], &[ParamType::Array(Box::new(ParamType::Bool))]).unwrap(),
            vec![AbiValue::array(ParamType::Bool, vec![])]
        );
        assert!(decode(&[], &[ParamType::Uint(256)]).is_err());
    }

    #[test]
    fn test_decode_zero_word_as_empty_dynamic() {
        let zero = [0u8; 32];
        assert_eq!(decode(&zero, &[ParamType::String]).unwrap(), vec![AbiValue::string("")]);
        assert_eq!(
            decode(&zero, &[ParamType::Array(Box::new(ParamType::Uint(256)))]).unwrap(),
            vec![AbiValue::array(ParamType::Uint(256), vec![])]
        );
    }

    #[test]
    fn test_decode_string_array() {
        // ["ABC", "abc"] encoded alone: count, two offsets, two strings
        let data = unhex(&[
            word(2),
            word(64),
            word(128),
            word(3),
            "4142430000000000000000000000000000000000000000000000000000000000".to_string(),
            word(3),
            "6162630000000000000000000000000000000000000000000000000000000000".to_string(),
        ]
        .concat());
        let values = decode(&data, &[ParamType::Array(Box::new(ParamType::String))]).unwrap();
        assert_eq!(
            values,
            vec![AbiValue::array(ParamType::String, vec!["ABC".into(), "abc".into()])]
        );
    }

    #[test]
    fn test_decode_tuple_int_string_bool() {
        let data = unhex(&[
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffd7e".to_string(),
            word(96),
            word(1),
            word(5),
            "68656c6c6f000000000000000000000000000000000000000000000000000000".to_string(),
        ]
        .concat());
        let types = [ParamType::Int(256), ParamType::String, ParamType::Bool];
        let values = decode(&data, &types).unwrap();
        assert_eq!(
            values,
            vec![AbiValue::int256(-642i64), AbiValue::string("hello"), AbiValue::Bool(true)]
        );
    }

    // ==================== Malformed input ====================

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(
            decode(&[0u8; 16], &[ParamType::Uint(256)]),
            Err(AbiError::TruncatedBuffer(_))
        ));
        assert!(matches!(
            decode(&[0u8; 32], &[ParamType::Uint(256), ParamType::Uint(256)]),
            Err(AbiError::TruncatedBuffer(_))
        ));
        // declared length runs past the end
        let data = unhex(&word(64));
        assert!(matches!(decode(&data, &[ParamType::Bytes]), Err(AbiError::TruncatedBuffer(_))));
        // offset past the end
        let data = unhex(&[word(1), word(4096)].concat());
        assert!(matches!(
            decode(&data, &[ParamType::Bool, ParamType::String]),
            Err(AbiError::TruncatedBuffer(_))
        ));
        // absurd element count
        let data = unhex(&word(u64::MAX));
        assert!(matches!(
            decode(&data, &[ParamType::Array(Box::new(ParamType::Uint(256)))]),
            Err(AbiError::TruncatedBuffer(_))
        ));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let data = unhex(&[word(2), "ff fe".replace(' ', "") + &"0".repeat(60)].concat());
        assert_eq!(decode(&data, &[ParamType::String]), Err(AbiError::InvalidUtf8));
    }
}
