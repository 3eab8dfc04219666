//! RLP encoder

use crate::{RlpError, RlpValue};
use bytes::{BufMut, BytesMut};
use std::convert::Infallible;

/// Cap for peers that store lengths in 32 bits
pub const LEGACY_PAYLOAD_LIMIT: usize = u32::MAX as usize;

const SHORT_STRING: u8 = 0x80;
const LONG_STRING: u8 = 0xb7;
const SHORT_LIST: u8 = 0xc0;
const LONG_LIST: u8 = 0xf7;

/// Encode an item. Any length representable in the 8-byte length field is accepted.
pub fn encode(value: &RlpValue) -> Vec<u8> {
    let mut out = BytesMut::new();
    match write_item(value, &mut out, &|_| Ok::<(), Infallible>(())) {
        Ok(()) => out.to_vec(),
        Err(never) => match never {},
    }
}

/// Encode an item, failing with [`RlpError::PayloadTooLarge`] if any string
/// or list payload is longer than `limit`
pub fn encode_with_limit(value: &RlpValue, limit: usize) -> Result<Vec<u8>, RlpError> {
    let mut out = BytesMut::new();
    write_item(value, &mut out, &|len| {
        if len > limit {
            Err(RlpError::PayloadTooLarge { len, limit })
        } else {
            Ok(())
        }
    })?;
    Ok(out.to_vec())
}

fn write_item<E>(
    value: &RlpValue,
    out: &mut BytesMut,
    check: &impl Fn(usize) -> Result<(), E>,
) -> Result<(), E> {
    match value {
        RlpValue::Bytes(bytes) => {
            check(bytes.len())?;
            match bytes.as_slice() {
                // A lone zero byte goes out as the empty string
                [0] => out.put_u8(SHORT_STRING),
                [b] if *b < SHORT_STRING => out.put_u8(*b),
                _ => {
                    write_header(out, SHORT_STRING, LONG_STRING, bytes.len());
                    out.put_slice(bytes);
                }
            }
        }
        RlpValue::List(items) => {
            let mut payload = BytesMut::new();
            for item in items {
                write_item(item, &mut payload, check)?;
            }
            check(payload.len())?;
            write_header(out, SHORT_LIST, LONG_LIST, payload.len());
            out.put_slice(&payload);
        }
    }
    Ok(())
}

fn write_header(out: &mut BytesMut, short: u8, long: u8, len: usize) {
    if len < 56 {
        out.put_u8(short + len as u8);
    } else {
        let len_bytes = (len as u64).to_be_bytes();
        let start = len_bytes.iter().position(|&b| b != 0).unwrap_or(7);
        out.put_u8(long + (8 - start) as u8);
        out.put_slice(&len_bytes[start..]);
    }
}
