use crate::output::read_report;
use crate::output::text::group_thousands;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use log::warn;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    if report.version != SCHEMA_VERSION {
        warn!(
            "Report schema v{} differs from current v{}",
            report.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Transaction: {}", report.transaction_hash);
    println!("  Mode: {}", report.mode);
    println!("  Total Opcodes: {}", group_thousands(report.total_ops));
    println!("  Total Gas: {}", group_thousands(report.total_gas));
    println!("  Ranked Opcodes: {}", report.rows.len());
    println!("  Highlights: {}", report.highlights.len());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Opcode Gas Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Per-opcode gas attribution for EVM transaction repricing analysis.");
}
