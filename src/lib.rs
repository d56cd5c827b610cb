//! Opcode Gas Trace
//!
//! Per-opcode gas attribution for EVM transactions, built for fee-schedule
//! (repricing) analysis.
//!
//! The trace of a transaction is fetched with `debug_traceTransaction`, the
//! gas consumed between consecutive steps is charged to the earlier opcode,
//! and the result is summarized into a gas-ranked report plus a fixed set of
//! highlighted opcodes.
//!
//! ```ignore
//! use opcode_gas_trace::aggregator::{attribute, summarize, ReportConfig};
//! use opcode_gas_trace::parser::ExecutionStep;
//!
//! let steps = vec![
//!     ExecutionStep::new(0, "PUSH1", 1000),
//!     ExecutionStep::new(1, "ADD", 995),
//! ];
//! let tally = attribute(&steps);
//! let summary = summarize(&tally, &ReportConfig::default());
//! assert_eq!(summary.total_gas, 5);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod rpc;
pub mod utils;
