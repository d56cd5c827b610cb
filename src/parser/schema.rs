//! Output JSON schema definitions for gas reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::rpc::TraceMode;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Transaction hash that was analyzed
    pub transaction_hash: String,

    /// How the trace was obtained
    pub mode: TraceMode,

    /// Gas used as reported by the node (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,

    /// Noise threshold applied to `rows`, in percent
    pub noise_threshold: f64,

    /// Total number of executed opcodes
    pub total_ops: u64,

    /// Total gas attributed to opcodes
    pub total_gas: u64,

    /// Opcodes ranked by attributed gas (noise filtered)
    pub rows: Vec<ReportRow>,

    /// Opcodes of interest for repricing, in configured order
    pub highlights: Vec<ReportRow>,

    /// Timestamp when report was generated
    pub generated_at: String,
}

/// Per-opcode statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub opcode: String,

    /// Number of executions
    pub count: u64,

    /// Attributed gas
    pub total_gas: u64,

    /// `total_gas / count`
    pub average_gas: f64,

    /// Share of total attributed gas, in percent
    pub percent_of_total_gas: f64,
}
