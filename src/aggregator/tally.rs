//! Per-opcode counters produced by gas attribution.
//!
//! An [`OpcodeTally`] is the pair of mappings the rest of the pipeline works
//! from: how often each opcode executed and how much gas was attributed to it.
//! Both the local attribution engine and the remote JS tracer produce one.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Mapping from opcode name to a running total
///
/// Entries are created on first use with a value of zero and keep their
/// first-insertion order, which makes later stable sorts deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpcodeCounter {
    slots: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl OpcodeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the entry for `opcode`, inserting it at zero first if absent
    pub fn add(&mut self, opcode: &str, amount: u64) {
        match self.slots.get(opcode) {
            Some(&slot) => {
                let value = &mut self.entries[slot].1;
                *value = value.saturating_add(amount);
            }
            None => {
                self.slots.insert(opcode.to_string(), self.entries.len());
                self.entries.push((opcode.to_string(), amount));
            }
        }
    }

    pub fn get(&self, opcode: &str) -> Option<u64> {
        self.slots.get(opcode).map(|&slot| self.entries[slot].1)
    }

    pub fn contains(&self, opcode: &str) -> bool {
        self.slots.contains_key(opcode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .map(|(opcode, value)| (opcode.as_str(), *value))
    }

    /// Sum of all values
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, value)| acc.saturating_add(*value))
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for OpcodeCounter {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counter = OpcodeCounter::new();
        for (opcode, amount) in iter {
            counter.add(opcode.as_ref(), amount);
        }
        counter
    }
}

impl Serialize for OpcodeCounter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for OpcodeCounter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OpcodeCounterVisitor)
    }
}

struct OpcodeCounterVisitor;

impl<'de> Visitor<'de> for OpcodeCounterVisitor {
    type Value = OpcodeCounter;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from opcode name to a non-negative integer")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut counter = OpcodeCounter::new();
        // JS tracers may emit null for keys that were touched but never set
        while let Some((opcode, value)) = access.next_entry::<String, Option<u64>>()? {
            counter.add(&opcode, value.unwrap_or(0));
        }
        Ok(counter)
    }
}

/// Opcode frequency and attributed gas for one transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpcodeTally {
    /// Opcode -> number of executions
    pub counts: OpcodeCounter,

    /// Opcode -> gas attributed to it
    ///
    /// Only opcodes that were charged at least once appear here.
    pub gas: OpcodeCounter,
}

impl OpcodeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of executed opcodes
    pub fn total_ops(&self) -> u64 {
        self.counts.total()
    }

    /// Total attributed gas
    pub fn total_gas(&self) -> u64 {
        self.gas.total()
    }
}
