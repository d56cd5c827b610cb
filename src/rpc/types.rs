//! Types for JSON-RPC communication with an EVM node.
//!
//! Based on the Ethereum JSON-RPC spec and the geth `debug_traceTransaction`
//! extension.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the trace is requested from the node
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TraceMode {
    /// Built-in struct logger; attribution runs locally
    #[default]
    StructLogs,

    /// Ship a JS tracer; the node returns the aggregated tally
    JsTracer,
}

impl fmt::Display for TraceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceMode::StructLogs => f.write_str("struct-logs"),
            TraceMode::JsTracer => f.write_str("js-tracer"),
        }
    }
}

/// JSON-RPC 2.0 request structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: u64,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request for debug_traceTransaction
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash (with 0x prefix)
    /// * `options` - Tracer config object
    /// * `id` - Request ID (for response correlation)
    pub fn debug_trace_transaction(tx_hash: &str, options: serde_json::Value, id: u64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: "debug_traceTransaction".to_string(),
            params: serde_json::json!([tx_hash, options]),
            id,
        }
    }
}

/// JSON-RPC 2.0 response structure
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Raw trace result (parsed later according to [`TraceMode`])
pub type RawTraceData = serde_json::Value;
