//! Contract interaction helpers

use bytes::Bytes;
use ethkit_primitives::Address;

use crate::abi::{
    decode_tuple, encode_function_call, function_selector, parse_signature, parse_type, AbiError,
    AbiValue, ParamType,
};
use crate::SdkError;

/// A contract function: name, parameter types and selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Function name
    pub name: String,
    /// Input parameter types
    pub inputs: Vec<ParamType>,
    /// Output parameter types
    pub outputs: Vec<ParamType>,
    /// First four bytes of the Keccak-256 of the canonical signature
    pub selector: [u8; 4],
}

impl Function {
    /// Parse `name(type,…)` plus an output list such as `(uint256,bool)`.
    ///
    /// Aliases like `uint` are canonicalised before the selector is hashed.
    pub fn parse(signature: &str, outputs: &str) -> Result<Self, AbiError> {
        let (name, inputs) = parse_signature(signature)?;
        let outputs = match parse_type(outputs)? {
            ParamType::Tuple(types) => types,
            single => vec![single],
        };
        Ok(Self::new(name, inputs, outputs))
    }

    /// Build from already-parsed types
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        let name = name.into();
        let selector = function_selector(&canonical_signature(&name, &inputs));
        Self {
            name,
            inputs,
            outputs,
            selector,
        }
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        canonical_signature(&self.name, &self.inputs)
    }

    /// Selector followed by the arguments; each argument must have exactly
    /// the declared type
    pub fn encode_input(&self, args: &[AbiValue]) -> Result<Bytes, AbiError> {
        if args.len() != self.inputs.len() {
            return Err(AbiError::TypeMismatch {
                expected: format!("{} arguments", self.inputs.len()),
                found: format!("{} arguments", args.len()),
            });
        }
        for (arg, expected) in args.iter().zip(&self.inputs) {
            let found = arg.param_type();
            if &found != expected {
                return Err(AbiError::TypeMismatch {
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }
        encode_function_call(self.selector, args).map(Bytes::from)
    }

    /// Decode return data against `outputs`
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        decode_tuple(data, &self.outputs)
    }
}

fn canonical_signature(name: &str, inputs: &[ParamType]) -> String {
    format!("{}{}", name, ParamType::Tuple(inputs.to_vec()))
}

/// A deployed contract and the functions known for it
#[derive(Debug, Clone)]
pub struct Contract {
    address: Address,
    functions: Vec<Function>,
}

impl Contract {
    /// Contract with no functions yet
    pub fn new(address: Address) -> Self {
        Self {
            address,
            functions: Vec::new(),
        }
    }

    /// Contract address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Add a function parsed from its signature and output list
    pub fn with_function(mut self, signature: &str, outputs: &str) -> Result<Self, AbiError> {
        self.functions.push(Function::parse(signature, outputs)?);
        Ok(self)
    }

    /// First function with this name
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Call data for `name(args…)`
    pub fn encode_call(&self, name: &str, args: &[AbiValue]) -> Result<Bytes, SdkError> {
        Ok(self.lookup(name)?.encode_input(args)?)
    }

    /// Decode the return data of `name`
    pub fn decode_output(&self, name: &str, data: &[u8]) -> Result<Vec<AbiValue>, SdkError> {
        Ok(self.lookup(name)?.decode_output(data)?)
    }

    fn lookup(&self, name: &str) -> Result<&Function, SdkError> {
        self.function(name)
            .ok_or_else(|| SdkError::UnknownFunction(name.to_string()))
    }
}

/// The ERC-20 token interface
pub fn erc20(address: Address) -> Contract {
    let functions = [
        ("name", vec![], vec![ParamType::String]),
        ("symbol", vec![], vec![ParamType::String]),
        ("decimals", vec![], vec![ParamType::Uint(8)]),
        ("totalSupply", vec![], vec![ParamType::Uint(256)]),
        ("balanceOf", vec![ParamType::Address], vec![ParamType::Uint(256)]),
        ("transfer", vec![ParamType::Address, ParamType::Uint(256)], vec![ParamType::Bool]),
        ("approve", vec![ParamType::Address, ParamType::Uint(256)], vec![ParamType::Bool]),
        ("allowance", vec![ParamType::Address, ParamType::Address], vec![ParamType::Uint(256)]),
        (
            "transferFrom",
            vec![ParamType::Address, ParamType::Address, ParamType::Uint(256)],
            vec![ParamType::Bool],
        ),
    ];
    Contract {
        address,
        functions: functions
            .into_iter()
            .map(|(name, inputs, outputs)| Function::new(name, inputs, outputs))
            .collect(),
    }
}
