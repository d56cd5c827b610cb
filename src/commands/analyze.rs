//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Fetches the trace from RPC
//! 2. Parses it into steps (or a ready tally)
//! 3. Attributes gas to opcodes
//! 4. Summarizes the tally into a report
//! 5. Prints and optionally writes the report

use crate::aggregator::{attribute, summarize, to_report};
use crate::commands::models::AnalyzeArgs;
use crate::output::{render_report, write_report};
use crate::parser::{parse_trace, GasReport, TraceData};
use crate::rpc::{RpcClient, TraceSource};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * RPC connection failures and timeouts (no retry)
/// * Trace parsing errors
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<GasReport> {
    let start_time = Instant::now();

    info!(
        "Starting analysis for transaction: {}",
        args.transaction_hash
    );
    info!("RPC endpoint: {}", args.rpc_url);

    let client = RpcClient::with_timeout(&args.rpc_url, args.timeout)
        .context("Failed to create RPC client")?;

    let report = analyze_transaction(&client, &args)?;

    if args.print_report {
        println!("\n{}", render_report(&report));
    }

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(report)
}

/// Fetch, attribute and summarize one transaction
///
/// **Public** - takes any [`TraceSource`] so it can run without a node
pub fn analyze_transaction(source: &dyn TraceSource, args: &AnalyzeArgs) -> Result<GasReport> {
    info!("Fetching trace ({} mode)...", args.mode);
    let raw_trace = source
        .fetch_trace(&args.transaction_hash, args.mode)
        .with_context(|| {
            format!(
                "Failed to fetch trace for transaction {}",
                args.transaction_hash
            )
        })?;

    info!("Parsing trace data...");
    let trace_data = parse_trace(&args.transaction_hash, &raw_trace, args.mode)
        .context("Failed to parse trace data")?;

    let (tally, gas_used) = match trace_data {
        TraceData::Steps(parsed) => {
            if parsed.failed {
                warn!("Transaction {} reverted", parsed.transaction_hash);
            }
            info!("Attributing gas over {} steps...", parsed.steps.len());
            (attribute(&parsed.steps), parsed.gas_used)
        }
        TraceData::Tally(tally) => {
            debug!("Using tally computed by the node");
            (tally, None)
        }
    };

    info!("Summarizing {} distinct opcodes...", tally.counts.len());
    let summary = summarize(&tally, &args.report_config);

    Ok(to_report(
        &args.transaction_hash,
        args.mode,
        gas_used,
        summary,
        &args.report_config,
    ))
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    // Validate RPC URL
    if args.rpc_url.is_empty() {
        anyhow::bail!("RPC URL cannot be empty");
    }

    if !args.rpc_url.starts_with("http://") && !args.rpc_url.starts_with("https://") {
        anyhow::bail!("RPC URL must start with http:// or https://");
    }

    // Validate transaction hash
    if args.transaction_hash.is_empty() {
        anyhow::bail!("Transaction hash cannot be empty");
    }

    // Basic hex validation (with or without 0x prefix)
    let tx_hash = args
        .transaction_hash
        .strip_prefix("0x")
        .unwrap_or(&args.transaction_hash);

    if tx_hash.len() != 64 {
        anyhow::bail!("Transaction hash must be 32 bytes (64 hex characters)");
    }

    if !tx_hash.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Transaction hash contains invalid characters");
    }

    if args.timeout.is_zero() {
        anyhow::bail!("Timeout must be greater than 0");
    }

    let threshold = args.report_config.noise_threshold;
    if !(0.0..=100.0).contains(&threshold) {
        anyhow::bail!("Noise threshold must be between 0 and 100 percent");
    }

    if args
        .report_config
        .highlight_opcodes
        .iter()
        .any(|op| op.trim().is_empty())
    {
        anyhow::bail!("Highlight opcodes cannot be empty");
    }

    Ok(())
}

/// Upper-case and de-duplicate opcode names, keeping first occurrence order
pub fn normalize_opcodes<S: AsRef<str>>(opcodes: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(opcodes.len());
    for opcode in opcodes {
        let opcode = opcode.as_ref().trim().to_ascii_uppercase();
        if !normalized.contains(&opcode) {
            normalized.push(opcode);
        }
    }
    normalized
}
