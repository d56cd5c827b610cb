use crate::aggregator::ReportConfig;
use crate::rpc::TraceMode;
use crate::utils::config::{DEFAULT_RPC_TIMEOUT, DEFAULT_RPC_URL, DEFAULT_TX_HASH};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// Transaction hash to analyze
    pub transaction_hash: String,

    /// How to request the trace
    pub mode: TraceMode,

    /// Timeout for the trace request
    pub timeout: Duration,

    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Noise threshold and highlight opcodes
    pub report_config: ReportConfig,

    /// Print text report to stdout
    pub print_report: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            transaction_hash: DEFAULT_TX_HASH.to_string(),
            mode: TraceMode::default(),
            timeout: DEFAULT_RPC_TIMEOUT,
            output_json: None,
            report_config: ReportConfig::default(),
            print_report: true,
        }
    }
}
