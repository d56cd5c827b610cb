//! Plain-text rendering of a gas report.

use crate::parser::schema::{GasReport, ReportRow};

const TABLE_WIDTH: usize = 65;
const SECTION_WIDTH: usize = 50;

/// Render the full report as printed by `analyze`
///
/// **Public** - main entry point for text output
pub fn render_report(report: &GasReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Transaction:            {}", report.transaction_hash));
    if let Some(gas_used) = report.gas_used {
        lines.push(format!("Gas used (node):        {}", group_thousands(gas_used)));
    }
    lines.push(format!(
        "Total opcodes executed: {}",
        group_thousands(report.total_ops)
    ));
    lines.push(format!(
        "Total tracked gas:      {}",
        group_thousands(report.total_gas)
    ));

    lines.push(String::new());
    lines.push(render_table(&report.rows));

    lines.push(String::new());
    lines.push(render_highlights(&report.highlights));

    lines.join("\n")
}

/// Render the gas-ranked table
pub fn render_table(rows: &[ReportRow]) -> String {
    let mut lines = vec![
        format!(
            "{:<20} {:>10} {:>15} {:>10} {:>7}",
            "Opcode", "Count", "Total Gas", "Avg Gas", "% Gas"
        ),
        "-".repeat(TABLE_WIDTH),
    ];

    for row in rows {
        lines.push(format!(
            "{:<20} {:>10} {:>15} {:>10} {:>6.1}%",
            row.opcode,
            group_thousands(row.count),
            group_thousands(row.total_gas),
            group_thousands(row.average_gas.round() as u64),
            row.percent_of_total_gas
        ));
    }

    lines.join("\n")
}

/// Render the key-opcodes section
pub fn render_highlights(highlights: &[ReportRow]) -> String {
    let rule = "=".repeat(SECTION_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "KEY OPCODES FOR REPRICING ANALYSIS".to_string(),
        rule,
    ];

    if highlights.is_empty() {
        lines.push("  (none executed)".to_string());
    }

    for row in highlights {
        lines.push(format!(
            "  {:<16} {:>6} calls  {:>12} gas  ({:.1}%)",
            row.opcode,
            group_thousands(row.count),
            group_thousands(row.total_gas),
            row.percent_of_total_gas
        ));
    }

    lines.join("\n")
}

/// Format an integer with comma thousands separators
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
