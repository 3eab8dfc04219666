//! JSON-RPC wire types

use bytes::Bytes;
use ethkit_primitives::{hexstr, Address, H256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always `"2.0"`
    pub jsonrpc: String,
    /// Request id, echoed by the node
    pub id: u64,
    /// Method name
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    /// Build a request
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC 2.0 response; exactly one of `result` and `error` is expected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`
    #[serde(default)]
    pub jsonrpc: String,
    /// Id of the request this answers
    #[serde(default)]
    pub id: Value,
    /// Success payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Successful response
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            result: Some(result),
            error: None,
        }
    }

    /// Error response
    pub fn failure(id: u64, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
    /// Optional extra data, e.g. revert bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Block identifier for RPC queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockId {
    /// Block number
    Number(u64),
    /// Latest block
    #[default]
    Latest,
    /// Pending block (includes pending transactions)
    Pending,
    /// Earliest block (genesis)
    Earliest,
    /// Safe block
    Safe,
    /// Finalized block
    Finalized,
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockId::Number(n) => serializer.serialize_str(&hexstr::encode_u64(*n)),
            BlockId::Latest => serializer.serialize_str("latest"),
            BlockId::Pending => serializer.serialize_str("pending"),
            BlockId::Earliest => serializer.serialize_str("earliest"),
            BlockId::Safe => serializer.serialize_str("safe"),
            BlockId::Finalized => serializer.serialize_str("finalized"),
        }
    }
}

/// Call request for `eth_call`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// Sender address
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ser::opt_address")]
    pub from: Option<Address>,
    /// Recipient address
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ser::opt_address")]
    pub to: Option<Address>,
    /// Gas limit
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ser::opt_u64")]
    pub gas: Option<u64>,
    /// Gas price
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ser::opt_quantity")]
    pub gas_price: Option<U256>,
    /// Value to transfer
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ser::opt_quantity")]
    pub value: Option<U256>,
    /// Input data
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ser::opt_bytes")]
    pub data: Option<Bytes>,
}

/// Event log entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Log {
    /// Emitting contract
    #[serde(deserialize_with = "de::address")]
    pub address: Address,
    /// Indexed topics
    #[serde(deserialize_with = "de::hashes")]
    pub topics: Vec<H256>,
    /// Non-indexed data
    #[serde(deserialize_with = "de::hex_bytes")]
    pub data: Bytes,
}

/// Transaction receipt as returned by `eth_getTransactionReceipt`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Transaction hash
    #[serde(deserialize_with = "de::hash")]
    pub transaction_hash: H256,
    /// Block that included the transaction
    #[serde(deserialize_with = "de::quantity_u64")]
    pub block_number: u64,
    /// Gas used by this transaction
    #[serde(deserialize_with = "de::quantity_u64")]
    pub gas_used: u64,
    /// `1` for success, `0` for failure; absent before Byzantium
    #[serde(default, deserialize_with = "de::opt_quantity_u64")]
    pub status: Option<u64>,
    /// Address of the deployed contract, if any
    #[serde(default, deserialize_with = "de::opt_address")]
    pub contract_address: Option<Address>,
    /// Emitted logs
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Whether execution succeeded
    pub fn is_success(&self) -> bool {
        self.status == Some(1)
    }
}

mod ser {
    use super::*;

    pub fn opt_address<S: Serializer>(v: &Option<Address>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(a) => s.serialize_str(&a.to_hex()),
            None => s.serialize_none(),
        }
    }

    pub fn opt_u64<S: Serializer>(v: &Option<u64>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(n) => s.serialize_str(&hexstr::encode_u64(*n)),
            None => s.serialize_none(),
        }
    }

    pub fn opt_quantity<S: Serializer>(v: &Option<U256>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(n) => s.serialize_str(&hexstr::encode_quantity(n)),
            None => s.serialize_none(),
        }
    }

    pub fn opt_bytes<S: Serializer>(v: &Option<Bytes>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(b) => s.serialize_str(&hexstr::encode_bytes(b)),
            None => s.serialize_none(),
        }
    }
}

mod de {
    use super::*;
    use serde::de::Error;

    pub fn address<'de, D: Deserializer<'de>>(d: D) -> Result<Address, D::Error> {
        let s = String::deserialize(d)?;
        Address::from_hex(&s).map_err(D::Error::custom)
    }

    pub fn opt_address<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Address>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|s| Address::from_hex(&s).map_err(D::Error::custom))
            .transpose()
    }

    pub fn hash<'de, D: Deserializer<'de>>(d: D) -> Result<H256, D::Error> {
        let s = String::deserialize(d)?;
        H256::from_hex(&s).map_err(D::Error::custom)
    }

    pub fn hashes<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<H256>, D::Error> {
        Vec::<String>::deserialize(d)?
            .iter()
            .map(|s| H256::from_hex(s).map_err(D::Error::custom))
            .collect()
    }

    pub fn quantity_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        let s = String::deserialize(d)?;
        hexstr::decode_u64(&s).map_err(D::Error::custom)
    }

    pub fn opt_quantity_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|s| hexstr::decode_u64(&s).map_err(D::Error::custom))
            .transpose()
    }

    pub fn hex_bytes<'de, D: Deserializer<'de>>(d: D) -> Result<Bytes, D::Error> {
        let s = String::deserialize(d)?;
        hexstr::decode_bytes(&s).map(Bytes::from).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let req = JsonRpcRequest::new(7, "eth_blockNumber", vec![]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"jsonrpc": "2.0", "id": 7, "method": "eth_blockNumber", "params": []})
        );
    }

    #[test]
    fn test_response_parse() {
        let ok: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#).unwrap();
        assert_eq!(ok.result, Some(json!("0x1")));
        assert!(ok.error.is_none());

        let err: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"nonce too low"}}"#,
        )
        .unwrap();
        let error = err.error.unwrap();
        assert_eq!(error.code, -32000);
        assert_eq!(error.message, "nonce too low");
    }

    #[test]
    fn test_block_id_serialize() {
        assert_eq!(serde_json::to_string(&BlockId::Latest).unwrap(), "\"latest\"");
        assert_eq!(serde_json::to_string(&BlockId::Number(100)).unwrap(), "\"0x64\"");
        assert_eq!(serde_json::to_string(&BlockId::Number(0)).unwrap(), "\"0x0\"");
        assert_eq!(serde_json::to_string(&BlockId::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn test_call_request_serialize() {
        let req = CallRequest {
            to: Some(Address::ZERO),
            data: Some(Bytes::from(vec![0x01, 0x02])),
            value: Some(U256::zero()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "to": "0x0000000000000000000000000000000000000000",
                "value": "0x0",
                "data": "0x0102",
            })
        );
    }

    #[test]
    fn test_call_request_quantities_have_no_leading_zeros() {
        let req = CallRequest {
            gas: Some(21000),
            gas_price: Some(U256::from(1_000_000_000u64)),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["gas"], "0x5208");
        assert_eq!(json["gasPrice"], "0x3b9aca00");
    }

    #[test]
    fn test_receipt_parse() {
        let receipt: Receipt = serde_json::from_value(json!({
            "transactionHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
            "blockNumber": "0x10",
            "gasUsed": "0x5208",
            "status": "0x1",
            "contractAddress": null,
            "logs": [{
                "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "topics": ["0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"],
                "data": "0x00ff"
            }]
        }))
        .unwrap();
        assert_eq!(receipt.block_number, 16);
        assert_eq!(receipt.gas_used, 21000);
        assert!(receipt.is_success());
        assert!(receipt.contract_address.is_none());
        assert_eq!(receipt.logs.len(), 1);
        assert_eq!(&receipt.logs[0].data[..], &[0x00u8, 0xff][..]);
    }

    #[test]
    fn test_receipt_rejects_bad_hex() {
        let result: Result<Receipt, _> = serde_json::from_value(json!({
            "transactionHash": "0x12",
            "blockNumber": "0x10",
            "gasUsed": "0x5208",
        }));
        assert!(result.is_err());
    }
}
