//! RLP decoder
//!
//! Only canonical encodings are accepted: no long form for short payloads,
//! no leading zeros in length fields, no wrapped single bytes below `0x80`.

use crate::{RlpError, RlpValue};

/// Deepest list nesting accepted by [`decode`]
pub const MAX_DEPTH: usize = 128;

/// Decode exactly one item from `data`
pub fn decode(data: &[u8]) -> Result<RlpValue, RlpError> {
    let (value, used) = read_item(data, 0)?;
    if used != data.len() {
        return Err(RlpError::TrailingBytes(data.len() - used));
    }
    Ok(value)
}

/// Returns the item and the number of bytes it occupied
fn read_item(data: &[u8], depth: usize) -> Result<(RlpValue, usize), RlpError> {
    let first = *data.first().ok_or(RlpError::Truncated)?;
    match first {
        0x00..=0x7f => Ok((RlpValue::Bytes(vec![first]), 1)),
        0x80..=0xb7 => {
            let len = (first - 0x80) as usize;
            let payload = slice(data, 1, len)?;
            if len == 1 && payload[0] < 0x80 {
                return Err(RlpError::NonCanonicalSize);
            }
            Ok((RlpValue::Bytes(payload.to_vec()), 1 + len))
        }
        0xb8..=0xbf => {
            let len_of_len = (first - 0xb7) as usize;
            let len = read_long_length(data, len_of_len)?;
            let payload = slice(data, 1 + len_of_len, len)?;
            Ok((RlpValue::Bytes(payload.to_vec()), 1 + len_of_len + len))
        }
        0xc0..=0xf7 => {
            let len = (first - 0xc0) as usize;
            let payload = slice(data, 1, len)?;
            Ok((RlpValue::List(read_list(payload, depth)?), 1 + len))
        }
        0xf8..=0xff => {
            let len_of_len = (first - 0xf7) as usize;
            let len = read_long_length(data, len_of_len)?;
            let payload = slice(data, 1 + len_of_len, len)?;
            Ok((RlpValue::List(read_list(payload, depth)?), 1 + len_of_len + len))
        }
    }
}

fn read_list(mut payload: &[u8], depth: usize) -> Result<Vec<RlpValue>, RlpError> {
    if depth >= MAX_DEPTH {
        return Err(RlpError::TooDeep(MAX_DEPTH));
    }
    let mut items = Vec::new();
    while !payload.is_empty() {
        let (item, used) = read_item(payload, depth + 1)?;
        items.push(item);
        payload = &payload[used..];
    }
    Ok(items)
}

fn read_long_length(data: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    let len_bytes = slice(data, 1, len_of_len)?;
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonicalSize);
    }
    let len = len_bytes.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64);
    if len < 56 {
        return Err(RlpError::NonCanonicalSize);
    }
    usize::try_from(len).map_err(|_| RlpError::Truncated)
}

fn slice(data: &[u8], start: usize, len: usize) -> Result<&[u8], RlpError> {
    let end = start.checked_add(len).ok_or(RlpError::Truncated)?;
    data.get(start..end).ok_or(RlpError::Truncated)
}
