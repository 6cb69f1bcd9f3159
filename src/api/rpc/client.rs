use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{JsonRpcRequest, JsonRpcResponse, RpcError};

static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// JSON-RPC 2.0 client over HTTP
#[derive(Debug, Clone)]
pub struct RpcClient {
    http_client: HttpClient,
    endpoint: String,
}

impl RpcClient {
    /// Create a client for `endpoint`, adding `http://` when no scheme is given
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RpcError> {
        let endpoint = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("http://{}", endpoint)
        };

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a request and return the raw `result` value
    pub async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value, RpcError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: REQUEST_ID.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!("→ RPC {} #{}: {}", method, request.id, request.params);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("RPC {} failed with HTTP {}", method, status.as_u16());
            return Err(RpcError::http(status.as_u16(), body));
        }

        let rpc_response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(format!("Failed to parse JSON-RPC response: {}", e)))?;

        Self::into_result(rpc_response)
    }

    /// Send a request and deserialize its `result` into `T`
    pub async fn call_as<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T, RpcError> {
        let value = self.call(method, params).await?;
        serde_json::from_value(value)
            .map_err(|e| RpcError::InvalidResponse(format!("Unexpected result for {}: {}", method, e)))
    }

    fn into_result(response: JsonRpcResponse) -> Result<serde_json::Value, RpcError> {
        if let Some(error) = response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        // A null result is meaningful (e.g. a receipt that is not mined yet)
        Ok(response.result.unwrap_or(serde_json::Value::Null))
    }
}
