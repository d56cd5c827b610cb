use opcode_gas_trace::aggregator::attribute;
use opcode_gas_trace::parser::struct_logs::{extract_gas_used, parse_gas_value};
use opcode_gas_trace::parser::{
    parse_struct_logs, parse_trace, parse_tracer_result, ExecutionStep, TraceData,
};
use opcode_gas_trace::rpc::TraceMode;
use opcode_gas_trace::utils::ParseError;
use serde_json::json;

#[test]
fn test_parse_gas_value() {
    assert_eq!(parse_gas_value("1000").unwrap(), 1000);
    assert_eq!(parse_gas_value("0x3e8").unwrap(), 1000);
    assert!(parse_gas_value("invalid").is_err());
}

#[test]
fn test_extract_gas_used() {
    let trace = json!({ "gas": 53000 });
    assert_eq!(extract_gas_used(trace.as_object().unwrap()), Some(53000));

    let trace = json!({ "gasUsed": "0xc350" });
    assert_eq!(extract_gas_used(trace.as_object().unwrap()), Some(50000));

    let trace = json!({ "structLogs": [] });
    assert_eq!(extract_gas_used(trace.as_object().unwrap()), None);
}

#[test]
fn test_parse_struct_logs() {
    let raw_trace = json!({
        "gas": 26000,
        "failed": false,
        "returnValue": "",
        "structLogs": [
            {"pc": 0, "op": "PUSH1", "gas": 1000, "gasCost": 3, "depth": 1},
            {"pc": 2, "op": "ADD", "gas": 997, "gasCost": 3, "depth": 1},
            {"pc": 3, "op": "STOP", "gas": "0x3e2", "gasCost": 0, "depth": 1}
        ]
    });

    let parsed = parse_struct_logs("0xabc123", &raw_trace).unwrap();

    assert_eq!(parsed.transaction_hash, "0xabc123");
    assert_eq!(parsed.gas_used, Some(26000));
    assert!(!parsed.failed);
    assert_eq!(
        parsed.steps,
        vec![
            ExecutionStep::new(0, "PUSH1", 1000),
            ExecutionStep::new(1, "ADD", 997),
            ExecutionStep::new(2, "STOP", 994),
        ]
    );
}

#[test]
fn test_parse_struct_logs_skips_malformed_steps() {
    let raw_trace = json!({
        "structLogs": [
            {"op": "PUSH1", "gas": 1000},
            {"op": "ADD"},
            {"op": "STOP", "gas": 994}
        ]
    });

    let parsed = parse_struct_logs("0xtest", &raw_trace).unwrap();

    assert_eq!(parsed.steps.len(), 2);
    assert_eq!(parsed.steps[1].index, 2);
    assert_eq!(parsed.steps[1].opcode, "STOP");
}

#[test]
fn test_skipped_step_gas_is_not_charged_to_neighbour() {
    let raw_trace = json!({
        "structLogs": [
            {"op": "PUSH1", "gas": 30000},
            {"op": "SSTORE", "gas": "bogus"},
            {"op": "STOP", "gas": 7900}
        ]
    });

    let parsed = parse_struct_logs("0xtest", &raw_trace).unwrap();
    let tally = attribute(&parsed.steps);

    assert_eq!(tally.gas.get("PUSH1"), None);
    assert_eq!(tally.total_gas(), 0);
    assert_eq!(tally.total_ops(), 2);
}

#[test]
fn test_parse_tracer_result_keeps_node_order() {
    let raw_result = json!({
        "counts": {"SLOAD": 1, "MSTORE": 1, "ADD": 1},
        "gasByOpcode": {"SLOAD": 100, "MSTORE": 100, "ADD": 100}
    });

    let tally = parse_tracer_result(&raw_result).unwrap();
    let order: Vec<&str> = tally.gas.iter().map(|(op, _)| op).collect();

    assert_eq!(order, vec!["SLOAD", "MSTORE", "ADD"]);
}

#[test]
fn test_parse_struct_logs_all_malformed() {
    let raw_trace = json!({ "structLogs": [{"gas": 1}, {"op": 5}] });

    let result = parse_struct_logs("0xtest", &raw_trace);
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_struct_logs_without_steps() {
    let raw_trace = json!({ "gas": 21000, "failed": true });

    let parsed = parse_struct_logs("0xtest", &raw_trace).unwrap();
    assert!(parsed.steps.is_empty());
    assert!(parsed.failed);
}

#[test]
fn test_parse_struct_logs_rejects_array() {
    let result = parse_struct_logs("0xtest", &json!([]));
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_tracer_result() {
    let raw_result = json!({
        "counts": {"CALL": 1, "SSTORE": 1, "STOP": 1},
        "gasByOpcode": {"CALL": 2200}
    });

    let tally = parse_tracer_result(&raw_result).unwrap();

    assert_eq!(tally.total_ops(), 3);
    assert_eq!(tally.total_gas(), 2200);
    assert_eq!(tally.gas.get("SSTORE"), None);
}

#[test]
fn test_parse_tracer_result_missing_gas() {
    let result = parse_tracer_result(&json!({ "counts": {} }));
    assert!(matches!(result, Err(ParseError::MissingField(f)) if f == "gasByOpcode"));
}

#[test]
fn test_parse_trace_dispatches_on_mode() {
    let struct_logs = json!({ "structLogs": [{"op": "STOP", "gas": 5}] });
    match parse_trace("0x1", &struct_logs, TraceMode::StructLogs).unwrap() {
        TraceData::Steps(parsed) => assert_eq!(parsed.steps.len(), 1),
        TraceData::Tally(_) => panic!("expected steps"),
    }

    let tracer_result = json!({ "counts": {"STOP": 1}, "gasByOpcode": {} });
    match parse_trace("0x1", &tracer_result, TraceMode::JsTracer).unwrap() {
        TraceData::Tally(tally) => assert_eq!(tally.counts.get("STOP"), Some(1)),
        TraceData::Steps(_) => panic!("expected tally"),
    }
}
