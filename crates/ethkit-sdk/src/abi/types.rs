//! ABI type definitions

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use ethkit_primitives::{Address, H256, I256, U256};

use super::AbiError;

/// Solidity parameter types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Signed integer with bit size
    Int(usize),
    /// Boolean
    Bool,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamic array
    Array(Box<ParamType>),
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
    /// Tuple
    Tuple(Vec<ParamType>),
    /// Decimal fixed-point number, `fixed<bits>x<decimals>` or `ufixed…`
    Fixed {
        /// `fixed` rather than `ufixed`
        signed: bool,
        /// Width of the underlying integer
        bits: usize,
        /// Digits after the decimal point
        decimals: usize,
    },
    /// External function reference: address and selector
    Function,
}

/// Largest number of decimals a fixed-point type may declare
pub const MAX_FIXED_DECIMALS: usize = 80;

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(types) => types.iter().any(|t| t.is_dynamic()),
            _ => false,
        }
    }

    /// Size of the encoding for static types, `None` for dynamic ones and
    /// for sizes that do not fit in a `usize`
    pub fn static_size(&self) -> Option<usize> {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => None,
            ParamType::FixedArray(inner, len) => inner.static_size()?.checked_mul(*len),
            ParamType::Tuple(types) => types
                .iter()
                .try_fold(0usize, |acc, t| acc.checked_add(t.static_size()?)),
            _ => Some(32),
        }
    }

    /// Bytes this type takes in the head of an enclosing tuple
    pub fn head_size(&self) -> usize {
        self.static_size().unwrap_or(32)
    }

    /// Check every width and size parameter, recursively.
    ///
    /// Empty tuples, zero-length fixed arrays and static types whose size
    /// overflows a `usize` are rejected.
    pub fn validate(&self) -> Result<(), AbiError> {
        use ethkit_primitives::int::is_valid_int_width;

        match self {
            ParamType::Uint(bits) | ParamType::Int(bits) if !is_valid_int_width(*bits) => {
                Err(AbiError::UnsupportedType(self.to_string()))
            }
            ParamType::FixedBytes(size) if !(1..=32).contains(size) => {
                Err(AbiError::UnsupportedType(self.to_string()))
            }
            ParamType::Fixed { bits, decimals, .. }
                if !is_valid_int_width(*bits) || *decimals > MAX_FIXED_DECIMALS =>
            {
                Err(AbiError::UnsupportedType(self.to_string()))
            }
            ParamType::FixedArray(_, 0) => Err(AbiError::UnsupportedType(self.to_string())),
            ParamType::Tuple(types) if types.is_empty() => {
                Err(AbiError::UnsupportedType(self.to_string()))
            }
            ParamType::Array(inner) => inner.validate(),
            ParamType::FixedArray(inner, _) => {
                inner.validate()?;
                self.check_static_size()
            }
            ParamType::Tuple(types) => {
                types.iter().try_for_each(|t| t.validate())?;
                self.check_static_size()
            }
            _ => Ok(()),
        }
    }

    fn check_static_size(&self) -> Result<(), AbiError> {
        if !self.is_dynamic() && self.static_size().is_none() {
            return Err(AbiError::UnsupportedType(format!("{}: encoded size overflows", self)));
        }
        Ok(())
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
            ParamType::String => write!(f, "string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, len) => write!(f, "{}[{}]", inner, len),
            ParamType::Tuple(types) => {
                write!(f, "(")?;
                for (i, t) in types.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", t)?;
                }
                write!(f, ")")
            }
            ParamType::Fixed {
                signed,
                bits,
                decimals,
            } => write!(f, "{}fixed{}x{}", if *signed { "" } else { "u" }, bits, decimals),
            ParamType::Function => write!(f, "function"),
        }
    }
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse_type(s)
    }
}

/// Decimal value of a `fixed`/`ufixed` parameter.
///
/// Encoded as the integer `value * 10^decimals`; the value may not carry
/// more decimals than the type declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPoint {
    /// `fixed` rather than `ufixed`
    pub signed: bool,
    /// Width of the underlying integer
    pub bits: usize,
    /// Digits after the decimal point
    pub decimals: usize,
    /// The number itself
    pub value: BigDecimal,
}

impl FixedPoint {
    /// Any precision
    pub fn new(signed: bool, bits: usize, decimals: usize, value: BigDecimal) -> Self {
        Self {
            signed,
            bits,
            decimals,
            value,
        }
    }

    /// `fixed128x18`, the alias `fixed` stands for
    pub fn fixed(value: BigDecimal) -> Self {
        Self::new(true, 128, 18, value)
    }

    /// `ufixed128x18`
    pub fn ufixed(value: BigDecimal) -> Self {
        Self::new(false, 128, 18, value)
    }

    /// The declared type
    pub fn param_type(&self) -> ParamType {
        ParamType::Fixed {
            signed: self.signed,
            bits: self.bits,
            decimals: self.decimals,
        }
    }
}

/// A typed ABI value.
///
/// Arrays carry their element type so that empty arrays still know what
/// they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// `uint<width>`
    UInt(usize, U256),
    /// `int<width>`
    Int(usize, I256),
    /// Boolean
    Bool(bool),
    /// Address (20 bytes)
    Address(Address),
    /// `bytes<N>` where N is the length of the vector
    FixedBytes(Vec<u8>),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// `T[N]`, N being the number of values
    FixedArray(ParamType, Vec<AbiValue>),
    /// `T[]`
    DynArray(ParamType, Vec<AbiValue>),
    /// Tuple (struct)
    Tuple(Vec<AbiValue>),
    /// Fixed-point decimal
    Fixed(FixedPoint),
    /// External function: address and selector
    FunctionRef(Address, [u8; 4]),
}

impl AbiValue {
    /// `uint256`
    pub fn uint256(value: impl Into<U256>) -> Self {
        AbiValue::UInt(256, value.into())
    }

    /// `int256`
    pub fn int256(value: impl Into<I256>) -> Self {
        AbiValue::Int(256, value.into())
    }

    /// `string`
    pub fn string(s: impl Into<String>) -> Self {
        AbiValue::String(s.into())
    }

    /// `bytes`
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        AbiValue::Bytes(data.into())
    }

    /// `bytes32`
    pub fn bytes32(data: H256) -> Self {
        AbiValue::FixedBytes(data.as_bytes().to_vec())
    }

    /// `T[]`
    pub fn array(element: ParamType, values: Vec<AbiValue>) -> Self {
        AbiValue::DynArray(element, values)
    }

    /// The declared type of this value
    pub fn param_type(&self) -> ParamType {
        match self {
            AbiValue::UInt(bits, _) => ParamType::Uint(*bits),
            AbiValue::Int(bits, _) => ParamType::Int(*bits),
            AbiValue::Bool(_) => ParamType::Bool,
            AbiValue::Address(_) => ParamType::Address,
            AbiValue::FixedBytes(b) => ParamType::FixedBytes(b.len()),
            AbiValue::Bytes(_) => ParamType::Bytes,
            AbiValue::String(_) => ParamType::String,
            AbiValue::FixedArray(element, values) => {
                ParamType::FixedArray(Box::new(element.clone()), values.len())
            }
            AbiValue::DynArray(element, _) => ParamType::Array(Box::new(element.clone())),
            AbiValue::Tuple(values) => {
                ParamType::Tuple(values.iter().map(|v| v.param_type()).collect())
            }
            AbiValue::Fixed(fixed) => fixed.param_type(),
            AbiValue::FunctionRef(..) => ParamType::Function,
        }
    }

    /// Whether the encoding is variable-length
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiValue::Bytes(_) | AbiValue::String(_) | AbiValue::DynArray(..) => true,
            AbiValue::FixedArray(element, _) => element.is_dynamic(),
            AbiValue::Tuple(values) => values.iter().any(|v| v.is_dynamic()),
            _ => false,
        }
    }

    /// Unsigned integer payload
    pub fn as_uint(&self) -> Option<&U256> {
        match self {
            AbiValue::UInt(_, v) => Some(v),
            _ => None,
        }
    }

    /// Signed integer payload
    pub fn as_int(&self) -> Option<&I256> {
        match self {
            AbiValue::Int(_, v) => Some(v),
            _ => None,
        }
    }

    /// Address payload
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            AbiValue::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Boolean payload
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of an array or tuple
    pub fn as_slice(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::FixedArray(_, values)
            | AbiValue::DynArray(_, values)
            | AbiValue::Tuple(values) => Some(values),
            _ => None,
        }
    }
}

impl From<Address> for AbiValue {
    fn from(address: Address) -> Self {
        AbiValue::Address(address)
    }
}

impl From<bool> for AbiValue {
    fn from(b: bool) -> Self {
        AbiValue::Bool(b)
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        AbiValue::UInt(256, value)
    }
}

impl From<&str> for AbiValue {
    fn from(s: &str) -> Self {
        AbiValue::String(s.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(s: String) -> Self {
        AbiValue::String(s)
    }
}
