//! JavaScript tracer shipped to the node in `js-tracer` mode.
//!
//! Runs the same delta rule as [`crate::aggregator::attribution`], one step
//! at a time inside the node, and returns only the two aggregated mappings.

/// Tracer source passed as the `tracer` option of `debug_traceTransaction`
pub const OPCODE_GAS_TRACER: &str = r#"{
    counts: {},
    gasByOpcode: {},
    prevGas: 0,
    prevOp: "",
    step: function(log) {
        var op = log.op.toString();
        var gas = log.getGas();
        if (this.prevOp !== "") {
            var cost = this.prevGas - gas;
            if (cost > 0) {
                this.gasByOpcode[this.prevOp] = (this.gasByOpcode[this.prevOp] || 0) + cost;
            }
        }
        this.counts[op] = (this.counts[op] || 0) + 1;
        this.prevGas = gas;
        this.prevOp = op;
    },
    fault: function(log, db) {},
    result: function(ctx, db) {
        return { counts: this.counts, gasByOpcode: this.gasByOpcode };
    }
}"#;
