//! Gas attribution and report aggregation.
//!
//! This module transforms execution steps into:
//! - Per-opcode execution counts and attributed gas (the tally)
//! - A gas-ranked, noise-filtered report with highlighted opcodes

pub mod attribution;
pub mod report;
pub mod tally;

// Re-export main types and functions
pub use attribution::{attribute, GasAttributor};
pub use report::{create_row, summarize, to_report, GasSummary, ReportConfig};
pub use tally::{OpcodeCounter, OpcodeTally};
