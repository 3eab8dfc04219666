//! JSON-RPC client, async and blocking

use bytes::Bytes;
use ethkit_primitives::{hexstr, Address, ChainId, H256, U256};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::abi::AbiValue;
use crate::contract::Function;
use crate::transaction::SignedTransaction;
use crate::transport::{MockTransport, Transport};
use crate::types::{BlockId, CallRequest, JsonRpcRequest, Receipt};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::{transport::HttpTransport, ClientConfig};

/// Async client over any [`Transport`]
pub struct Client {
    transport: Arc<dyn Transport>,
    chain_id: Option<ChainId>,
    next_id: AtomicU64,
}

impl Client {
    /// Client over a custom transport; the chain id is fetched on first use
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            chain_id: None,
            next_id: AtomicU64::new(1),
        }
    }

    /// Fix the chain id instead of asking the node
    pub fn with_chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// HTTP client for the configured endpoint
    #[cfg(feature = "http")]
    pub fn from_config(config: &ClientConfig) -> Result<Self, SdkError> {
        Ok(Self::new(HttpTransport::from_config(config)?).with_chain_id(config.chain_id))
    }

    /// Client backed by a fresh [`MockTransport`] on chain 1
    pub fn new_mock() -> Self {
        Self::new(MockTransport::new()).with_chain_id(1)
    }

    /// Send `method` and deserialize its result; node errors come back as
    /// [`SdkError::Rpc`] unchanged
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, SdkError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, method, "rpc call");
        let response = self.transport.send(JsonRpcRequest::new(id, method, params)).await?;

        if let Some(error) = response.error {
            warn!(id, method, code = error.code, message = %error.message, "rpc error");
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(serde_json::from_value(response.result.unwrap_or(Value::Null))?)
    }

    // ==================== Chain Info ====================

    /// Chain id, from the configuration or `eth_chainId`
    pub async fn chain_id(&self) -> Result<ChainId, SdkError> {
        if let Some(id) = self.chain_id {
            return Ok(id);
        }
        let result: String = self.request("eth_chainId", vec![]).await?;
        Ok(hexstr::decode_u64(&result)?)
    }

    /// Current block number
    pub async fn block_number(&self) -> Result<u64, SdkError> {
        let result: String = self.request("eth_blockNumber", vec![]).await?;
        Ok(hexstr::decode_u64(&result)?)
    }

    // ==================== Account Queries ====================

    /// Balance in wei
    pub async fn get_balance(&self, address: &Address, block: BlockId) -> Result<U256, SdkError> {
        let params = vec![Value::String(address.to_hex()), serde_json::to_value(block)?];
        let result: String = self.request("eth_getBalance", params).await?;
        Ok(hexstr::decode_quantity(&result)?)
    }

    /// Number of transactions sent from `address`, i.e. its next nonce
    pub async fn get_transaction_count(
        &self,
        address: &Address,
        block: BlockId,
    ) -> Result<u64, SdkError> {
        let params = vec![Value::String(address.to_hex()), serde_json::to_value(block)?];
        let result: String = self.request("eth_getTransactionCount", params).await?;
        Ok(hexstr::decode_u64(&result)?)
    }

    // ==================== Calls ====================

    /// Execute a read-only call
    pub async fn call(&self, request: &CallRequest, block: BlockId) -> Result<Bytes, SdkError> {
        let params = vec![serde_json::to_value(request)?, serde_json::to_value(block)?];
        let result: String = self.request("eth_call", params).await?;
        Ok(hexstr::decode_bytes(&result)?.into())
    }

    /// Call `function` on `to` and decode its outputs
    pub async fn call_function(
        &self,
        to: Address,
        function: &Function,
        args: &[AbiValue],
        block: BlockId,
    ) -> Result<Vec<AbiValue>, SdkError> {
        let request = CallRequest {
            to: Some(to),
            data: Some(function.encode_input(args)?),
            ..Default::default()
        };
        let output = self.call(&request, block).await?;
        Ok(function.decode_output(&output)?)
    }

    // ==================== Transactions ====================

    /// Broadcast raw signed transaction bytes
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<H256, SdkError> {
        let result: String = self
            .request("eth_sendRawTransaction", vec![Value::String(hexstr::encode_bytes(raw))])
            .await?;
        Ok(H256::from_hex(&result)?)
    }

    /// Broadcast a signed transaction
    pub async fn send_transaction(&self, tx: &SignedTransaction) -> Result<H256, SdkError> {
        self.send_raw_transaction(&tx.raw).await
    }

    /// Receipt of a mined transaction; `None` while pending or unknown
    pub async fn get_transaction_receipt(&self, hash: &H256) -> Result<Option<Receipt>, SdkError> {
        self.request("eth_getTransactionReceipt", vec![Value::String(hash.to_hex())])
            .await
    }
}

/// Synchronous façade over [`Client`] driving a private current-thread runtime.
///
/// Must not be used from inside another tokio runtime.
pub struct BlockingClient {
    inner: Client,
    runtime: Runtime,
}

impl BlockingClient {
    /// Wrap an async client
    pub fn new(inner: Client) -> Result<Self, SdkError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        Ok(Self { inner, runtime })
    }

    /// HTTP client for the configured endpoint
    #[cfg(feature = "http")]
    pub fn from_config(config: &ClientConfig) -> Result<Self, SdkError> {
        Self::new(Client::from_config(config)?)
    }

    /// The wrapped async client
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// See [`Client::chain_id`]
    pub fn chain_id(&self) -> Result<ChainId, SdkError> {
        self.runtime.block_on(self.inner.chain_id())
    }

    /// See [`Client::block_number`]
    pub fn block_number(&self) -> Result<u64, SdkError> {
        self.runtime.block_on(self.inner.block_number())
    }

    /// See [`Client::get_balance`]
    pub fn get_balance(&self, address: &Address, block: BlockId) -> Result<U256, SdkError> {
        self.runtime.block_on(self.inner.get_balance(address, block))
    }

    /// See [`Client::get_transaction_count`]
    pub fn get_transaction_count(
        &self,
        address: &Address,
        block: BlockId,
    ) -> Result<u64, SdkError> {
        self.runtime.block_on(self.inner.get_transaction_count(address, block))
    }

    /// See [`Client::call`]
    pub fn call(&self, request: &CallRequest, block: BlockId) -> Result<Bytes, SdkError> {
        self.runtime.block_on(self.inner.call(request, block))
    }

    /// See [`Client::call_function`]
    pub fn call_function(
        &self,
        to: Address,
        function: &Function,
        args: &[AbiValue],
        block: BlockId,
    ) -> Result<Vec<AbiValue>, SdkError> {
        self.runtime.block_on(self.inner.call_function(to, function, args, block))
    }

    /// See [`Client::send_raw_transaction`]
    pub fn send_raw_transaction(&self, raw: &[u8]) -> Result<H256, SdkError> {
        self.runtime.block_on(self.inner.send_raw_transaction(raw))
    }

    /// See [`Client::send_transaction`]
    pub fn send_transaction(&self, tx: &SignedTransaction) -> Result<H256, SdkError> {
        self.runtime.block_on(self.inner.send_transaction(tx))
    }

    /// See [`Client::get_transaction_receipt`]
    pub fn get_transaction_receipt(&self, hash: &H256) -> Result<Option<Receipt>, SdkError> {
        self.runtime.block_on(self.inner.get_transaction_receipt(hash))
    }
}
