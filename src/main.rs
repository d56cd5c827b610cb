//! Opcode Gas Trace CLI
//!
//! Attributes the gas of an EVM transaction to the opcodes that consumed it
//! and prints a repricing report.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use opcode_gas_trace::aggregator::ReportConfig;
use opcode_gas_trace::commands::{
    display_version, execute_analyze, normalize_opcodes, validate_args, validate_report_file,
    AnalyzeArgs,
};
use opcode_gas_trace::rpc::TraceMode;
use opcode_gas_trace::utils::config::{
    DEFAULT_HIGHLIGHT_OPCODES, DEFAULT_RPC_TIMEOUT, DEFAULT_RPC_URL, DEFAULT_TX_HASH,
    NOISE_THRESHOLD_PERCENT,
};

/// Opcode Gas Trace - per-opcode gas attribution for EVM transactions
#[derive(Parser, Debug)]
#[command(name = "opcode-gas")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Trace a transaction and report gas per opcode
    Analyze {
        /// RPC endpoint URL
        #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
        rpc: String,

        /// Transaction hash to analyze
        #[arg(short, long, default_value = DEFAULT_TX_HASH)]
        tx: String,

        /// How to request the trace from the node
        #[arg(short, long, value_enum, default_value_t = TraceMode::StructLogs)]
        mode: TraceMode,

        /// RPC timeout in seconds
        #[arg(long, default_value_t = DEFAULT_RPC_TIMEOUT.as_secs())]
        timeout: u64,

        /// Hide ranked rows below this percent of total gas
        #[arg(long, default_value_t = NOISE_THRESHOLD_PERCENT)]
        noise_threshold: f64,

        /// Opcode to always report (repeatable; replaces the default list)
        #[arg(long = "highlight", value_name = "OPCODE")]
        highlights: Vec<String>,

        /// Output path for JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not print the text report
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            rpc,
            tx,
            mode,
            timeout,
            noise_threshold,
            highlights,
            output,
            quiet,
        } => {
            let highlight_opcodes = if highlights.is_empty() {
                normalize_opcodes(DEFAULT_HIGHLIGHT_OPCODES)
            } else {
                normalize_opcodes(&highlights[..])
            };

            let report_config = ReportConfig::new()
                .with_noise_threshold(noise_threshold)
                .with_highlights(highlight_opcodes);

            let args = AnalyzeArgs {
                rpc_url: rpc,
                transaction_hash: tx,
                mode,
                timeout: Duration::from_secs(timeout),
                output_json: output,
                report_config,
                print_report: !quiet,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
