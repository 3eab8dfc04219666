//! The RLP item tree

use crate::RlpError;
use ethkit_primitives::int::{to_minimal_be, u64_to_minimal_be};
use ethkit_primitives::{Address, H256, U256};

/// An RLP item: a byte string or a list of items.
///
/// Integers are stored in minimal big-endian form, so zero is the empty
/// string. `Bytes(vec![])` and `Bytes(vec![0])` are different values that
/// encode identically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpValue {
    /// Byte string
    Bytes(Vec<u8>),
    /// List of items
    List(Vec<RlpValue>),
}

impl RlpValue {
    /// The empty byte string
    pub fn empty() -> Self {
        RlpValue::Bytes(Vec::new())
    }

    /// The empty list
    pub fn empty_list() -> Self {
        RlpValue::List(Vec::new())
    }

    /// Byte string payload, if this is one
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpValue::Bytes(b) => Some(b),
            RlpValue::List(_) => None,
        }
    }

    /// List items, if this is a list
    pub fn as_list(&self) -> Option<&[RlpValue]> {
        match self {
            RlpValue::List(items) => Some(items),
            RlpValue::Bytes(_) => None,
        }
    }

    /// True for lists
    pub fn is_list(&self) -> bool {
        matches!(self, RlpValue::List(_))
    }

    /// Read a canonical integer
    pub fn to_u256(&self) -> Result<U256, RlpError> {
        let bytes = self.as_bytes().ok_or(RlpError::ExpectedBytes)?;
        if bytes.len() > 32 || bytes.first() == Some(&0) {
            return Err(RlpError::InvalidInteger("uint256"));
        }
        Ok(U256::from_big_endian(bytes))
    }

    /// Read a canonical integer that fits in a `u64`
    pub fn to_u64(&self) -> Result<u64, RlpError> {
        let value = self.to_u256()?;
        if value.bits() > 64 {
            return Err(RlpError::InvalidInteger("u64"));
        }
        Ok(value.low_u64())
    }

    /// Read a 20-byte address
    pub fn to_address(&self) -> Result<Address, RlpError> {
        let bytes = self.as_bytes().ok_or(RlpError::ExpectedBytes)?;
        Address::from_slice(bytes).map_err(|_| RlpError::InvalidInteger("address"))
    }
}

impl From<Vec<u8>> for RlpValue {
    fn from(bytes: Vec<u8>) -> Self {
        RlpValue::Bytes(bytes)
    }
}

impl From<&[u8]> for RlpValue {
    fn from(bytes: &[u8]) -> Self {
        RlpValue::Bytes(bytes.to_vec())
    }
}

impl From<&str> for RlpValue {
    fn from(s: &str) -> Self {
        RlpValue::Bytes(s.as_bytes().to_vec())
    }
}

impl From<u64> for RlpValue {
    fn from(value: u64) -> Self {
        RlpValue::Bytes(u64_to_minimal_be(value))
    }
}

impl From<U256> for RlpValue {
    fn from(value: U256) -> Self {
        RlpValue::Bytes(to_minimal_be(&value))
    }
}

impl From<Address> for RlpValue {
    fn from(address: Address) -> Self {
        RlpValue::Bytes(address.as_bytes().to_vec())
    }
}

impl From<H256> for RlpValue {
    fn from(hash: H256) -> Self {
        RlpValue::Bytes(hash.as_bytes().to_vec())
    }
}

impl From<Vec<RlpValue>> for RlpValue {
    fn from(items: Vec<RlpValue>) -> Self {
        RlpValue::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversions_are_minimal() {
        assert_eq!(RlpValue::from(0u64), RlpValue::empty());
        assert_eq!(RlpValue::from(1024u64), RlpValue::Bytes(vec![0x04, 0x00]));
        assert_eq!(RlpValue::from(U256::zero()), RlpValue::empty());
        assert_eq!(
            RlpValue::from(U256::from(0x0de0b6b3a7640000u64)),
            RlpValue::Bytes(vec![0x0d, 0xe0, 0xb6, 0xb3, 0xa7, 0x64, 0x00, 0x00])
        );
    }

    #[test]
    fn test_read_integers() {
        assert_eq!(RlpValue::from(21000u64).to_u64().unwrap(), 21000);
        assert_eq!(RlpValue::empty().to_u64().unwrap(), 0);
        assert_eq!(
            RlpValue::Bytes(vec![0, 1]).to_u64(),
            Err(RlpError::InvalidInteger("uint256"))
        );
        assert_eq!(
            RlpValue::Bytes(vec![1; 9]).to_u64(),
            Err(RlpError::InvalidInteger("u64"))
        );
        assert_eq!(RlpValue::empty_list().to_u64(), Err(RlpError::ExpectedBytes));
    }

    #[test]
    fn test_address_conversion() {
        let addr = Address::from_bytes([0x35; 20]);
        let value = RlpValue::from(addr);
        assert_eq!(value.as_bytes().map(|b| b.len()), Some(20));
        assert_eq!(value.to_address().unwrap(), addr);
        assert!(RlpValue::empty().to_address().is_err());
    }

    #[test]
    fn test_accessors() {
        let list = RlpValue::List(vec!["cat".into(), "dog".into()]);
        assert!(list.is_list());
        assert_eq!(list.as_list().map(|l| l.len()), Some(2));
        assert_eq!(list.as_bytes(), None);
        assert_eq!(RlpValue::from("dog").as_bytes(), Some(&b"dog"[..]));
    }
}
