//! ABI encoding

use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::BigDecimal;
use ethkit_crypto::keccak256;
use ethkit_primitives::int::{pad_right, u256_from_be_slice, u256_to_be_bytes, unsigned_fits};
use ethkit_primitives::{I256, U256};

use super::types::{AbiValue, FixedPoint, ParamType};
use super::AbiError;

/// Encode arguments.
///
/// No arguments give an empty buffer and a single argument is encoded on its
/// own, without an offset word even when it is dynamic. Two or more are
/// encoded as a tuple.
pub fn encode(values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    match values {
        [] => Ok(Vec::new()),
        [single] => {
            let mut out = Vec::new();
            encode_value(single, &mut out)?;
            Ok(out)
        }
        _ => encode_tuple(values),
    }
}

/// Encode values with the head/tail tuple layout, whatever their number
pub fn encode_tuple(values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    let head_size: usize = values.iter().map(head_size).sum();

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for value in values {
        if value.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend_from_slice(&u256_to_be_bytes(&U256::from(offset)));
            encode_value(value, &mut tail)?;
        } else {
            encode_value(value, &mut head)?;
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Encode a function call: selector followed by the arguments as a tuple
pub fn encode_function_call(selector: [u8; 4], args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    let mut result = selector.to_vec();
    result.extend(encode_tuple(args)?);
    Ok(result)
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

fn head_size(value: &AbiValue) -> usize {
    match value {
        AbiValue::FixedArray(_, values) | AbiValue::Tuple(values) if !value.is_dynamic() => {
            values.iter().map(head_size).sum()
        }
        _ => 32,
    }
}

fn encode_value(value: &AbiValue, out: &mut Vec<u8>) -> Result<(), AbiError> {
    match value {
        AbiValue::UInt(bits, v) => {
            value.param_type().validate()?;
            if !unsigned_fits(v, *bits) {
                return Err(AbiError::ValueOutOfRange(format!("uint{}", bits)));
            }
            out.extend_from_slice(&u256_to_be_bytes(v));
        }
        AbiValue::Int(bits, v) => {
            value.param_type().validate()?;
            if !v.fits_bits(*bits) {
                return Err(AbiError::ValueOutOfRange(format!("int{}", bits)));
            }
            out.extend_from_slice(&v.to_be_bytes());
        }
        AbiValue::Bool(b) => {
            let mut word = [0u8; 32];
            word[31] = *b as u8;
            out.extend_from_slice(&word);
        }
        AbiValue::Address(addr) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(addr.as_bytes());
            out.extend_from_slice(&word);
        }
        AbiValue::FixedBytes(data) => {
            value.param_type().validate()?;
            let mut word = [0u8; 32];
            word[..data.len()].copy_from_slice(data);
            out.extend_from_slice(&word);
        }
        AbiValue::Bytes(data) => encode_bytes(data, out),
        AbiValue::String(s) => encode_bytes(s.as_bytes(), out),
        AbiValue::FixedArray(element, values) => {
            check_elements(element, values)?;
            if value.is_dynamic() {
                out.extend(encode_tuple(values)?);
            } else {
                for v in values {
                    encode_value(v, out)?;
                }
            }
        }
        AbiValue::DynArray(element, values) => {
            check_elements(element, values)?;
            out.extend_from_slice(&u256_to_be_bytes(&U256::from(values.len())));
            out.extend(encode_tuple(values)?);
        }
        AbiValue::Tuple(values) => {
            if value.is_dynamic() {
                out.extend(encode_tuple(values)?);
            } else {
                for v in values {
                    encode_value(v, out)?;
                }
            }
        }
        AbiValue::Fixed(fixed) => out.extend_from_slice(&encode_fixed(fixed)?),
        AbiValue::FunctionRef(addr, selector) => {
            let mut word = [0u8; 32];
            word[..20].copy_from_slice(addr.as_bytes());
            word[20..24].copy_from_slice(selector);
            out.extend_from_slice(&word);
        }
    }
    Ok(())
}

fn encode_bytes(data: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&u256_to_be_bytes(&U256::from(data.len())));
    out.extend(pad_right(data));
}

fn check_elements(element: &ParamType, values: &[AbiValue]) -> Result<(), AbiError> {
    element.validate()?;
    for v in values {
        let found = v.param_type();
        if &found != element {
            return Err(AbiError::TypeMismatch {
                expected: element.to_string(),
                found: found.to_string(),
            });
        }
    }
    Ok(())
}

/// `value * 10^decimals` as a two's complement word
fn encode_fixed(fixed: &FixedPoint) -> Result<[u8; 32], AbiError> {
    let param = fixed.param_type();
    param.validate()?;
    let out_of_range = || AbiError::ValueOutOfRange(param.to_string());

    let scale = BigDecimal::new(BigInt::from(1), -(fixed.decimals as i64));
    let scaled = &fixed.value * &scale;
    let integral = scaled.with_scale(0);
    if integral != scaled {
        // more digits after the point than the type declares
        return Err(out_of_range());
    }
    let (digits, _) = integral.as_bigint_and_exponent();
    let (sign, magnitude) = digits.to_bytes_be();
    let abs = u256_from_be_slice(&magnitude).map_err(|_| out_of_range())?;
    let negative = sign == Sign::Minus;

    if fixed.signed {
        let v = I256::new(negative, abs).ok_or_else(out_of_range)?;
        if !v.fits_bits(fixed.bits) {
            return Err(out_of_range());
        }
        Ok(v.to_be_bytes())
    } else {
        if negative || !unsigned_fits(&abs, fixed.bits) {
            return Err(out_of_range());
        }
        Ok(u256_to_be_bytes(&abs))
    }
}
