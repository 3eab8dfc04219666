//! Transport layer for RPC communication

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
#[cfg(feature = "http")]
use tracing::debug;

use crate::types::{JsonRpcRequest, JsonRpcResponse};
use crate::SdkError;

/// Moves one JSON-RPC request to a node and brings back its response.
///
/// Implementations do not interpret the response; error objects are
/// returned as part of a successful `send`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for the matching response
    async fn send(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, SdkError>;
}

/// Canned responses keyed by method, for tests
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    errors: Arc<Mutex<HashMap<String, (i64, String)>>>,
    requests: Arc<Mutex<Vec<JsonRpcRequest>>>,
}

impl MockTransport {
    /// Mock answering the common read methods with fixed values
    pub fn new() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert("eth_chainId".to_string(), Value::String("0x1".to_string()));
        defaults.insert("eth_blockNumber".to_string(), Value::String("0x100".to_string())); // 256
        let one_ether = Value::String("0xde0b6b3a7640000".to_string());
        defaults.insert("eth_getBalance".to_string(), one_ether);
        defaults.insert("eth_getTransactionCount".to_string(), Value::String("0x0".to_string()));
        defaults.insert("eth_call".to_string(), Value::String("0x".to_string()));
        defaults.insert("eth_getTransactionReceipt".to_string(), Value::Null);

        Self {
            responses: Arc::new(Mutex::new(defaults)),
            errors: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `method` with `result`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_response(&self, method: &str, result: Value) {
        self.errors.lock().expect("MockTransport mutex poisoned").remove(method);
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), result);
    }

    /// Answer `method` with an error object
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_error(&self, method: &str, code: i64, message: &str) {
        self.errors
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), (code, message.to_string()));
    }

    /// Every request seen so far, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn requests(&self) -> Vec<JsonRpcRequest> {
        self.requests.lock().expect("MockTransport mutex poisoned").clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> SdkError {
    SdkError::Transport("MockTransport mutex poisoned".to_string())
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, SdkError> {
        let id = request.id;
        let method = request.method.clone();
        self.requests.lock().map_err(poisoned)?.push(request);

        if let Some((code, message)) = self.errors.lock().map_err(poisoned)?.get(&method).cloned() {
            return Ok(JsonRpcResponse::failure(id, code, message));
        }
        let result = self.responses.lock().map_err(poisoned)?.get(&method).cloned();
        Ok(match result {
            Some(result) => JsonRpcResponse::success(id, result),
            None => JsonRpcResponse::failure(id, -32601, format!("Method not found: {}", method)),
        })
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Transport with reqwest's default settings
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    /// Transport for the configured endpoint and timeout
    pub fn from_config(config: &crate::ClientConfig) -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: config.rpc_url.clone(),
        })
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, SdkError> {
        debug!(id = request.id, method = %request.method, url = %self.url, "rpc request");
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let status = response.status();
        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(format!("HTTP {}: {}", status, e)))?;
        debug!(id = %response.id, error = response.error.is_some(), "rpc response");
        Ok(response)
    }
}
