//! Attribute gas to opcodes from the remaining-gas counter of each step.
//!
//! A struct-log step reports the gas *remaining* before it executes, not what
//! it costs. The cost of a step is therefore only visible at the next step:
//!
//! ```text
//! PUSH1  gas=1000
//! ADD    gas=995     -> PUSH1 is charged 1000 - 995 = 5
//! STOP   gas=992     -> ADD is charged 995 - 992 = 3
//!                    -> STOP is never charged
//! ```
//!
//! Transitions where the counter does not go down (refunds, returns from a
//! sub-call, malformed input) are dropped rather than recorded as negative.
//! A transition that spans a skipped step is dropped too, since the delta
//! belongs to the missing opcode.

use super::tally::OpcodeTally;
use crate::parser::ExecutionStep;
use log::debug;

/// Opcode and remaining gas of the most recently observed step
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributionState {
    index: usize,
    opcode: String,
    remaining_gas: u64,
}

/// Streaming gas attributor
///
/// Feed steps in trace order with [`observe`](Self::observe), then call
/// [`finish`](Self::finish) to get the tally.
#[derive(Debug, Default)]
pub struct GasAttributor {
    tally: OpcodeTally,
    previous: Option<AttributionState>,
    dropped_transitions: u64,
}

impl GasAttributor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the next step of the trace
    ///
    /// The step is taken to directly follow the previous one.
    pub fn observe(&mut self, opcode: &str, remaining_gas: u64) {
        let index = self.previous.as_ref().map_or(0, |state| state.index + 1);
        self.record(index, opcode, remaining_gas);
    }

    /// Process an [`ExecutionStep`]
    ///
    /// A gap in `step.index` means steps were skipped in between, so the
    /// previous opcode is not charged for it.
    pub fn observe_step(&mut self, step: &ExecutionStep) {
        self.record(step.index, &step.opcode, step.remaining_gas);
    }

    fn record(&mut self, index: usize, opcode: &str, remaining_gas: u64) {
        if let Some(previous) = &self.previous {
            let adjacent = previous.index.checked_add(1) == Some(index);
            if adjacent && previous.remaining_gas > remaining_gas {
                self.tally
                    .gas
                    .add(&previous.opcode, previous.remaining_gas - remaining_gas);
            } else {
                if !adjacent {
                    debug!(
                        "Step {} does not follow step {}, {} left uncharged",
                        index, previous.index, previous.opcode
                    );
                }
                self.dropped_transitions += 1;
            }
        }

        self.tally.counts.add(opcode, 1);

        match &mut self.previous {
            Some(state) => {
                state.index = index;
                state.opcode.clear();
                state.opcode.push_str(opcode);
                state.remaining_gas = remaining_gas;
            }
            None => {
                self.previous = Some(AttributionState {
                    index,
                    opcode: opcode.to_string(),
                    remaining_gas,
                });
            }
        }
    }

    /// Number of transitions left uncharged
    ///
    /// Either the delta was zero or negative, or the transition spanned a
    /// skipped step.
    pub fn dropped_transitions(&self) -> u64 {
        self.dropped_transitions
    }

    /// The last opcode seen, whose own cost can never be measured
    pub fn unattributed_opcode(&self) -> Option<&str> {
        self.previous.as_ref().map(|state| state.opcode.as_str())
    }

    pub fn finish(self) -> OpcodeTally {
        if let Some(opcode) = self.unattributed_opcode() {
            debug!("Final opcode {} left unattributed", opcode);
        }
        debug!(
            "Attributed {} gas over {} opcodes ({} transitions dropped)",
            self.tally.total_gas(),
            self.tally.total_ops(),
            self.dropped_transitions
        );
        self.tally
    }
}

/// Attribute gas for a whole step sequence
///
/// **Public** - main entry point for local attribution
///
/// # Arguments
/// * `steps` - Execution steps in trace order
///
/// # Returns
/// Opcode counts and attributed gas. Empty input gives an empty tally.
pub fn attribute<'a, I>(steps: I) -> OpcodeTally
where
    I: IntoIterator<Item = &'a ExecutionStep>,
{
    let mut attributor = GasAttributor::new();
    for step in steps {
        attributor.observe_step(step);
    }
    attributor.finish()
}
