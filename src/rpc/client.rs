//! HTTP client for fetching transaction traces from an EVM node.

use super::tracer::OPCODE_GAS_TRACER;
use super::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RawTraceData, TraceMode};
use super::TraceSource;
use crate::utils::config::DEFAULT_RPC_TIMEOUT;
use crate::utils::error::RpcError;
use log::{debug, info};
use reqwest::blocking::Client;
use std::time::Duration;

/// RPC client for fetching trace data from a node
pub struct RpcClient {
    client: Client,
    rpc_url: String,
    timeout: Duration,
}

impl RpcClient {
    /// Create a new RPC client with the default timeout
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, RpcError> {
        Self::with_timeout(rpc_url, DEFAULT_RPC_TIMEOUT)
    }

    /// Create a client with custom timeout
    pub fn with_timeout(rpc_url: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RpcError::RequestFailed)?;

        Ok(Self {
            client,
            rpc_url: rpc_url.into(),
            timeout,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Fetch the trace of a transaction
    ///
    /// A single request is made; there is no retry on timeout.
    pub fn debug_trace_transaction(
        &self,
        tx_hash: &str,
        mode: TraceMode,
    ) -> Result<RawTraceData, RpcError> {
        let tx_hash = normalize_tx_hash(tx_hash);

        info!("Fetching {} trace for transaction: {}", mode, tx_hash);

        let request = JsonRpcRequest::debug_trace_transaction(&tx_hash, trace_options(mode), 1);

        debug!("RPC request: {} {}", request.method, request.params[0]);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(RpcError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let rpc_response: JsonRpcResponse<RawTraceData> = response
            .json()
            .map_err(|e| self.map_transport_error(e))?;

        if let Some(error) = rpc_response.error {
            return Err(map_rpc_error(error, &tx_hash));
        }

        rpc_response
            .result
            .ok_or_else(|| RpcError::InvalidResponse("Missing result field".to_string()))
    }

    fn map_transport_error(&self, error: reqwest::Error) -> RpcError {
        if error.is_timeout() {
            RpcError::Timeout(self.timeout)
        } else {
            RpcError::RequestFailed(error)
        }
    }
}

impl TraceSource for RpcClient {
    fn fetch_trace(&self, tx_hash: &str, mode: TraceMode) -> Result<RawTraceData, RpcError> {
        self.debug_trace_transaction(tx_hash, mode)
    }
}

/// Tracer config object for the given mode
///
/// **Public** - exposed for tests
pub fn trace_options(mode: TraceMode) -> serde_json::Value {
    match mode {
        // Attribution only needs op and gas; skip the heavy per-step payloads
        TraceMode::StructLogs => serde_json::json!({
            "disableStack": true,
            "disableMemory": true,
            "disableStorage": true,
            "enableReturnData": false
        }),
        TraceMode::JsTracer => serde_json::json!({
            "tracer": OPCODE_GAS_TRACER
        }),
    }
}

/// Normalize transaction hash to include 0x prefix
pub fn normalize_tx_hash(tx_hash: &str) -> String {
    if tx_hash.starts_with("0x") {
        tx_hash.to_string()
    } else {
        format!("0x{}", tx_hash)
    }
}

/// Map JSON-RPC error to our error type
///
/// **Public** - exposed for tests
pub fn map_rpc_error(error: JsonRpcError, tx_hash: &str) -> RpcError {
    match error.code {
        -32000 => {
            if error.message.to_lowercase().contains("not found") {
                RpcError::TransactionNotFound(tx_hash.to_string())
            } else {
                RpcError::InvalidResponse(error.message)
            }
        }
        -32601 => RpcError::TracerNotSupported,
        _ => RpcError::InvalidResponse(format!("{}: {}", error.code, error.message)),
    }
}
