//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default RPC endpoint (local AvalancheGo C-Chain)
pub const DEFAULT_RPC_URL: &str = "http://localhost:9650/ext/bc/C/rpc";

/// Sample transaction analyzed when no hash is given
pub const DEFAULT_TX_HASH: &str =
    "0x1c1192036597a43b86923dfa3f2b92044563b5ac204422e20f3a603f0e82c77d";

/// Default timeout for RPC requests
///
/// Full struct-log traces of heavy transactions can take minutes to produce.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(300);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Rows below this share of total attributed gas (in percent) are hidden
pub const NOISE_THRESHOLD_PERCENT: f64 = 0.1;

/// Opcodes always listed in the repricing section, in display order
pub const DEFAULT_HIGHLIGHT_OPCODES: &[&str] = &[
    "SSTORE",
    "CREATE",
    "CREATE2",
    "SLOAD",
    "CALL",
    "DELEGATECALL",
    "STATICCALL",
];

// Field names for trace parsing (different RPC implementations use different names)
pub const GAS_FIELD_NAMES: &[&str] = &["gas", "gasUsed", "gas_used"];
pub const STEP_FIELD_NAMES: &[&str] = &["structLogs", "struct_logs", "steps"];
pub const COUNTS_FIELD_NAMES: &[&str] = &["counts", "countsByOpcode"];
pub const GAS_BY_OPCODE_FIELD_NAMES: &[&str] = &["gasByOpcode", "gasBy", "gas_by_opcode"];
