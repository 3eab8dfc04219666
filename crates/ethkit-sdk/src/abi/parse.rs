//! Solidity type strings

use super::{AbiError, ParamType};

/// Parse a type string such as `uint256`, `bytes32[]` or `(address,string)[2]`.
///
/// `uint`/`int` mean the 256-bit forms, `fixed`/`ufixed` mean `…128x18`.
pub fn parse_type(s: &str) -> Result<ParamType, AbiError> {
    let s = s.trim();
    let unsupported = || AbiError::UnsupportedType(s.to_string());

    if let Some(body) = s.strip_suffix(']') {
        let open = body.rfind('[').ok_or_else(unsupported)?;
        let inner = parse_type(&body[..open])?;
        let size = &body[open + 1..];
        let param = if size.is_empty() {
            ParamType::Array(Box::new(inner))
        } else {
            let len = size.parse::<usize>().map_err(|_| unsupported())?;
            ParamType::FixedArray(Box::new(inner), len)
        };
        return Ok(param);
    }

    if let Some(body) = s.strip_prefix('(') {
        let body = body.strip_suffix(')').ok_or_else(unsupported)?;
        return split_components(body)?
            .into_iter()
            .map(parse_type)
            .collect::<Result<Vec<_>, _>>()
            .map(ParamType::Tuple);
    }

    let param = match s {
        "address" => ParamType::Address,
        "bool" => ParamType::Bool,
        "string" => ParamType::String,
        "bytes" => ParamType::Bytes,
        "function" => ParamType::Function,
        "uint" => ParamType::Uint(256),
        "int" => ParamType::Int(256),
        "fixed" | "ufixed" => ParamType::Fixed {
            signed: s == "fixed",
            bits: 128,
            decimals: 18,
        },
        _ => parse_sized(s).ok_or_else(unsupported)?,
    };
    param.validate()?;
    Ok(param)
}

/// `uintN`, `intN`, `bytesN`, `fixedMxN`, `ufixedMxN`
fn parse_sized(s: &str) -> Option<ParamType> {
    if let Some(rest) = s.strip_prefix("ufixed") {
        let (bits, decimals) = rest.split_once('x')?;
        return Some(ParamType::Fixed {
            signed: false,
            bits: parse_number(bits)?,
            decimals: parse_number(decimals)?,
        });
    }
    if let Some(rest) = s.strip_prefix("fixed") {
        let (bits, decimals) = rest.split_once('x')?;
        return Some(ParamType::Fixed {
            signed: true,
            bits: parse_number(bits)?,
            decimals: parse_number(decimals)?,
        });
    }
    if let Some(rest) = s.strip_prefix("uint") {
        return Some(ParamType::Uint(parse_number(rest)?));
    }
    if let Some(rest) = s.strip_prefix("int") {
        return Some(ParamType::Int(parse_number(rest)?));
    }
    if let Some(rest) = s.strip_prefix("bytes") {
        return Some(ParamType::FixedBytes(parse_number(rest)?));
    }
    None
}

/// Plain decimal digits only, no sign or leading `+`
fn parse_number(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Split on commas that are not inside nested parentheses
fn split_components(body: &str) -> Result<Vec<&str>, AbiError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| AbiError::UnsupportedType(body.to_string()))?;
            }
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(AbiError::UnsupportedType(body.to_string()));
    }
    parts.push(&body[start..]);
    Ok(parts)
}

/// Split `name(type,…)` into the name and its parameter types
pub fn parse_signature(signature: &str) -> Result<(String, Vec<ParamType>), AbiError> {
    let signature = signature.trim();
    let unsupported = || AbiError::UnsupportedType(signature.to_string());
    let open = signature.find('(').ok_or_else(unsupported)?;
    let name = &signature[..open];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Err(unsupported());
    }
    match parse_type(&signature[open..])? {
        ParamType::Tuple(inputs) => Ok((name.to_string(), inputs)),
        _ => Err(unsupported()),
    }
}
