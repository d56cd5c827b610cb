//! Parser for struct-logger traces.
//!
//! Parses the raw JSON from `debug_traceTransaction` (default tracer) into an
//! ordered sequence of execution steps.

use crate::utils::config::{GAS_FIELD_NAMES, STEP_FIELD_NAMES};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::Deserialize;

/// One step of the execution trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionStep {
    /// Position of the step in the raw trace
    pub index: usize,

    /// Opcode mnemonic (e.g. "SSTORE")
    pub opcode: String,

    /// Gas remaining before the step executes
    pub remaining_gas: u64,
}

impl ExecutionStep {
    pub fn new(index: usize, opcode: impl Into<String>, remaining_gas: u64) -> Self {
        Self {
            index,
            opcode: opcode.into(),
            remaining_gas,
        }
    }
}

/// Struct-log entry as returned by the node
///
/// Only the fields needed for attribution are read; stack, memory and storage
/// are disabled in the request anyway.
#[derive(Debug, Deserialize)]
struct RawStructLog {
    op: String,

    #[serde(alias = "gasRemaining")]
    gas: serde_json::Value,
}

/// Parsed struct-log trace
#[derive(Debug, Clone)]
pub struct ParsedTrace {
    pub transaction_hash: String,

    /// Gas used as reported by the node, if present
    pub gas_used: Option<u64>,

    /// Whether the node reported the transaction as failed
    pub failed: bool,

    pub steps: Vec<ExecutionStep>,
}

/// Parse raw struct-log trace JSON
///
/// **Public** - main entry point for struct-log parsing
///
/// # Arguments
/// * `tx_hash` - Transaction hash being analyzed
/// * `raw_trace` - Raw JSON from debug_traceTransaction
///
/// # Errors
/// * `ParseError::InvalidFormat` - Not an object, or every step is malformed
pub fn parse_struct_logs(
    tx_hash: &str,
    raw_trace: &serde_json::Value,
) -> Result<ParsedTrace, ParseError> {
    debug!("Parsing struct logs for transaction: {}", tx_hash);

    let trace_obj = raw_trace.as_object().ok_or_else(|| {
        ParseError::InvalidFormat("Struct-log trace must be a JSON object".to_string())
    })?;

    let gas_used = extract_gas_used(trace_obj);
    let failed = trace_obj
        .get("failed")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let steps = extract_execution_steps(trace_obj)?;

    debug!("Parsed {} execution steps", steps.len());

    Ok(ParsedTrace {
        transaction_hash: tx_hash.to_string(),
        gas_used,
        failed,
        steps,
    })
}

/// Extract gas used reported by the node
///
/// **Public** - exposed for tests
pub fn extract_gas_used(trace_obj: &serde_json::Map<String, serde_json::Value>) -> Option<u64> {
    let gas = GAS_FIELD_NAMES.iter().find_map(|field| {
        trace_obj
            .get(*field)
            .and_then(|val| match parse_json_u64(val) {
                Ok(gas) => Some(gas),
                Err(e) => {
                    warn!("Found gas field '{}' but failed to parse: {}", field, e);
                    None
                }
            })
    });

    if gas.is_none() {
        debug!("No gas used field in trace");
    }
    gas
}

/// Extract execution steps from trace
///
/// **Private** - internal extraction logic
fn extract_execution_steps(
    trace_obj: &serde_json::Map<String, serde_json::Value>,
) -> Result<Vec<ExecutionStep>, ParseError> {
    for field in STEP_FIELD_NAMES {
        if let Some(steps_array) = trace_obj.get(*field).and_then(|v| v.as_array()) {
            return parse_steps_array(steps_array);
        }
    }

    // Transactions that revert before executing anything have no steps
    warn!("No execution steps found in trace");
    Ok(Vec::new())
}

/// Parse array of struct-log entries
///
/// **Private** - internal parsing logic
fn parse_steps_array(steps_array: &[serde_json::Value]) -> Result<Vec<ExecutionStep>, ParseError> {
    let mut steps = Vec::with_capacity(steps_array.len());

    for (index, step_value) in steps_array.iter().enumerate() {
        match parse_step(index, step_value) {
            Ok(step) => steps.push(step),
            Err(e) => {
                // Log but don't fail - some steps may be malformed
                warn!("Failed to parse step {}: {}", index, e);
            }
        }
    }

    if steps.is_empty() && !steps_array.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All execution steps failed to parse".to_string(),
        ));
    }

    Ok(steps)
}

fn parse_step(index: usize, step_value: &serde_json::Value) -> Result<ExecutionStep, ParseError> {
    let raw = RawStructLog::deserialize(step_value)?;
    let remaining_gas = parse_json_u64(&raw.gas)?;
    Ok(ExecutionStep::new(index, raw.op, remaining_gas))
}

/// Parse a u64 from a JSON number or a decimal/hex string
///
/// **Public** - used for both step gas and the trace's gas-used field
pub fn parse_json_u64(val: &serde_json::Value) -> Result<u64, ParseError> {
    if let Some(n) = val.as_u64() {
        Ok(n)
    } else if let Some(s) = val.as_str() {
        parse_gas_value(s)
    } else {
        Err(ParseError::InvalidFormat(format!(
            "Expected number or string, found {}",
            val
        )))
    }
}

/// Parse a gas value from hex or decimal string
pub fn parse_gas_value(value: &str) -> Result<u64, ParseError> {
    if let Some(hex_str) = value.strip_prefix("0x") {
        u64::from_str_radix(hex_str, 16)
            .map_err(|e| ParseError::InvalidFormat(format!("Invalid hex gas value: {}", e)))
    } else {
        value
            .parse::<u64>()
            .map_err(|e| ParseError::InvalidFormat(format!("Invalid decimal gas value: {}", e)))
    }
}
