//! Derive the repricing report from an opcode tally.
//!
//! Rows are ranked by attributed gas and filtered by a noise threshold.
//! Highlight rows are listed separately, in the caller's order, unfiltered,
//! so rare but expensive opcodes (SSTORE, CREATE, ...) always surface.

use super::tally::OpcodeTally;
use crate::parser::schema::{GasReport, ReportRow};
use crate::rpc::TraceMode;
use crate::utils::config::{DEFAULT_HIGHLIGHT_OPCODES, NOISE_THRESHOLD_PERCENT, SCHEMA_VERSION};
use log::debug;

/// Report settings
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Minimum percent of total gas for a row to be listed
    pub noise_threshold: f64,

    /// Opcodes always reported, in display order
    pub highlight_opcodes: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            noise_threshold: NOISE_THRESHOLD_PERCENT,
            highlight_opcodes: DEFAULT_HIGHLIGHT_OPCODES
                .iter()
                .map(|op| op.to_string())
                .collect(),
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_noise_threshold(mut self, noise_threshold: f64) -> Self {
        self.noise_threshold = noise_threshold;
        self
    }

    pub fn with_highlights<I, S>(mut self, opcodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlight_opcodes = opcodes.into_iter().map(Into::into).collect();
        self
    }
}

/// Aggregated view of a tally
#[derive(Debug, Clone, PartialEq)]
pub struct GasSummary {
    /// Total executed opcodes
    pub total_ops: u64,

    /// Total attributed gas
    pub total_gas: u64,

    /// Rows above the noise threshold, by descending gas
    pub rows: Vec<ReportRow>,

    /// Rows for the configured highlight opcodes that were executed
    pub highlights: Vec<ReportRow>,
}

/// Summarize a tally into ranked and highlighted rows
///
/// **Public** - main entry point for report aggregation
///
/// # Arguments
/// * `tally` - Opcode counts and attributed gas
/// * `config` - Noise threshold and highlight opcodes
///
/// # Returns
/// Totals plus ranked and highlighted rows. The tally is not modified.
pub fn summarize(tally: &OpcodeTally, config: &ReportConfig) -> GasSummary {
    let total_gas = tally.total_gas();
    let total_ops = tally.total_ops();

    // An opcode charged gas but missing from counts divides by 1
    let mut rows: Vec<ReportRow> = tally
        .gas
        .iter()
        .map(|(opcode, gas)| {
            let count = tally.counts.get(opcode).unwrap_or(1);
            create_row(opcode, count, gas, total_gas)
        })
        .collect();

    // Stable: ties keep first-insertion order
    rows.sort_by(|a, b| b.total_gas.cmp(&a.total_gas));

    let before = rows.len();
    rows.retain(|row| row.percent_of_total_gas >= config.noise_threshold);
    debug!(
        "Noise filter hid {} of {} opcodes below {}%",
        before - rows.len(),
        before,
        config.noise_threshold
    );

    let highlights = config
        .highlight_opcodes
        .iter()
        .filter_map(|opcode| {
            let count = tally.counts.get(opcode)?;
            let gas = tally.gas.get(opcode).unwrap_or(0);
            Some(create_row(opcode, count, gas, total_gas))
        })
        .collect();

    GasSummary {
        total_ops,
        total_gas,
        rows,
        highlights,
    }
}

/// Build a single report row
///
/// **Public** - shared by ranked and highlight rows
pub fn create_row(opcode: &str, count: u64, gas: u64, total_gas: u64) -> ReportRow {
    let average_gas = if count > 0 {
        gas as f64 / count as f64
    } else {
        0.0
    };

    let percent_of_total_gas = if total_gas > 0 {
        (gas as f64 / total_gas as f64) * 100.0
    } else {
        0.0
    };

    ReportRow {
        opcode: opcode.to_string(),
        count,
        total_gas: gas,
        average_gas,
        percent_of_total_gas,
    }
}

/// Wrap a summary with transaction metadata for output
///
/// **Public** - used by commands to create final output
pub fn to_report(
    transaction_hash: &str,
    mode: TraceMode,
    gas_used: Option<u64>,
    summary: GasSummary,
    config: &ReportConfig,
) -> GasReport {
    use chrono::Utc;

    GasReport {
        version: SCHEMA_VERSION.to_string(),
        transaction_hash: transaction_hash.to_string(),
        mode,
        gas_used,
        noise_threshold: config.noise_threshold,
        total_ops: summary.total_ops,
        total_gas: summary.total_gas,
        rows: summary.rows,
        highlights: summary.highlights,
        generated_at: Utc::now().to_rfc3339(),
    }
}
