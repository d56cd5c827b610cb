//! Parser for the JS tracer result.
//!
//! In `js-tracer` mode the node runs the attribution itself and returns
//! `{ "counts": {...}, "gasByOpcode": {...} }`.

use crate::aggregator::{OpcodeCounter, OpcodeTally};
use crate::utils::config::{COUNTS_FIELD_NAMES, GAS_BY_OPCODE_FIELD_NAMES};
use crate::utils::error::ParseError;
use log::debug;
use serde::Deserialize;

/// Parse the pre-aggregated tally returned by the JS tracer
///
/// # Errors
/// * `ParseError::InvalidFormat` - Result is not an object
/// * `ParseError::MissingField` - Counts or gas mapping absent
/// * `ParseError::JsonError` - A mapping holds non-integer values
pub fn parse_tracer_result(raw_result: &serde_json::Value) -> Result<OpcodeTally, ParseError> {
    let result_obj = raw_result.as_object().ok_or_else(|| {
        ParseError::InvalidFormat("Tracer result must be a JSON object".to_string())
    })?;

    let counts = extract_counter(result_obj, COUNTS_FIELD_NAMES)?;
    let gas = extract_counter(result_obj, GAS_BY_OPCODE_FIELD_NAMES)?;

    debug!(
        "Tracer returned {} distinct opcodes, {} with attributed gas",
        counts.len(),
        gas.len()
    );

    Ok(OpcodeTally { counts, gas })
}

/// Find the first present field name and deserialize it as a counter
///
/// **Private** - internal extraction logic
fn extract_counter(
    result_obj: &serde_json::Map<String, serde_json::Value>,
    field_names: &[&str],
) -> Result<OpcodeCounter, ParseError> {
    let value = field_names
        .iter()
        .find_map(|field| result_obj.get(*field))
        .ok_or_else(|| ParseError::MissingField(field_names[0].to_string()))?;

    Ok(OpcodeCounter::deserialize(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alias_field_names() {
        let tally = parse_tracer_result(&json!({
            "countsByOpcode": {"ADD": 3},
            "gasBy": {"ADD": 9}
        }))
        .unwrap();

        assert_eq!(tally.counts.get("ADD"), Some(3));
        assert_eq!(tally.gas.get("ADD"), Some(9));
    }

    #[test]
    fn test_rejects_non_integer_counts() {
        let result = parse_tracer_result(&json!({
            "counts": {"ADD": "three"},
            "gasByOpcode": {}
        }));
        assert!(matches!(result, Err(ParseError::JsonError(_))));
    }
}
