//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Parsing struct-logger traces into execution steps
//! - Parsing pre-aggregated JS tracer results
//! - Defining output schema

pub mod schema;
pub mod struct_logs;
pub mod tracer_result;

// Re-export main types
pub use schema::{GasReport, ReportRow};
pub use struct_logs::{parse_struct_logs, ExecutionStep, ParsedTrace};
pub use tracer_result::parse_tracer_result;

use crate::aggregator::OpcodeTally;
use crate::rpc::{RawTraceData, TraceMode};
use crate::utils::error::ParseError;

/// Trace content after parsing, depending on how it was requested
#[derive(Debug, Clone)]
pub enum TraceData {
    /// Ordered steps still to be attributed locally
    Steps(ParsedTrace),

    /// Tally already computed by the node
    Tally(OpcodeTally),
}

/// Parse a raw trace according to the mode it was requested with
pub fn parse_trace(
    tx_hash: &str,
    raw_trace: &RawTraceData,
    mode: TraceMode,
) -> Result<TraceData, ParseError> {
    match mode {
        TraceMode::StructLogs => parse_struct_logs(tx_hash, raw_trace).map(TraceData::Steps),
        TraceMode::JsTracer => parse_tracer_result(raw_trace).map(TraceData::Tally),
    }
}
