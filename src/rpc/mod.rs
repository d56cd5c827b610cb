//! Trace source and RPC client for EVM nodes.

pub mod client;
pub mod tracer;
pub mod types;

// Re-export main types
pub use client::RpcClient;
pub use types::{RawTraceData, TraceMode};

use crate::utils::error::RpcError;

/// Anything that can produce the raw trace of a transaction
///
/// [`RpcClient`] is the HTTP implementation; tests use in-memory sources.
pub trait TraceSource {
    fn fetch_trace(&self, tx_hash: &str, mode: TraceMode) -> Result<RawTraceData, RpcError>;
}
