use opcode_gas_trace::aggregator::{attribute, summarize, OpcodeCounter, OpcodeTally, ReportConfig};
use opcode_gas_trace::parser::ExecutionStep;
use pretty_assertions::assert_eq;

fn tally(counts: &[(&str, u64)], gas: &[(&str, u64)]) -> OpcodeTally {
    OpcodeTally {
        counts: counts.iter().copied().collect::<OpcodeCounter>(),
        gas: gas.iter().copied().collect::<OpcodeCounter>(),
    }
}

fn opcodes(rows: &[opcode_gas_trace::parser::ReportRow]) -> Vec<&str> {
    rows.iter().map(|row| row.opcode.as_str()).collect()
}

#[test]
fn test_empty_tally() {
    let summary = summarize(&OpcodeTally::new(), &ReportConfig::default());

    assert_eq!(summary.total_ops, 0);
    assert_eq!(summary.total_gas, 0);
    assert!(summary.rows.is_empty());
    assert!(summary.highlights.is_empty());
}

#[test]
fn test_rows_sorted_by_gas_descending() {
    let t = tally(
        &[("PUSH1", 10), ("SSTORE", 1), ("MSTORE", 4)],
        &[("PUSH1", 30), ("SSTORE", 20000), ("MSTORE", 12)],
    );

    let summary = summarize(&t, &ReportConfig::default().with_noise_threshold(0.0));

    assert_eq!(opcodes(&summary.rows), vec!["SSTORE", "PUSH1", "MSTORE"]);
    assert_eq!(summary.total_gas, 20042);
    assert_eq!(summary.total_ops, 15);
}

#[test]
fn test_ties_keep_insertion_order() {
    let t = tally(
        &[("DUP1", 1), ("DUP2", 1), ("DUP3", 1)],
        &[("DUP2", 3), ("DUP1", 3), ("DUP3", 3)],
    );

    let summary = summarize(&t, &ReportConfig::default());
    assert_eq!(opcodes(&summary.rows), vec!["DUP2", "DUP1", "DUP3"]);
}

#[test]
fn test_summarize_is_idempotent() {
    let t = tally(
        &[("A", 1), ("B", 1), ("C", 1), ("D", 2)],
        &[("A", 5), ("B", 5), ("C", 100), ("D", 5)],
    );
    let config = ReportConfig::default();

    let first = summarize(&t, &config);
    let second = summarize(&t, &config);
    assert_eq!(first, second);
}

#[test]
fn test_average_and_percent() {
    let t = tally(&[("SLOAD", 4), ("ADD", 10)], &[("SLOAD", 8400), ("ADD", 30)]);

    let summary = summarize(&t, &ReportConfig::default());
    let sload = &summary.rows[0];

    assert_eq!(sload.opcode, "SLOAD");
    assert_eq!(sload.count, 4);
    assert_eq!(sload.average_gas, 2100.0);
    assert!((sload.percent_of_total_gas - 8400.0 / 8430.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_noise_filter_hides_small_rows() {
    // ADD is 1 / 10001 of total gas, about 0.01%
    let t = tally(&[("CALL", 1), ("ADD", 1)], &[("CALL", 10000), ("ADD", 1)]);

    let summary = summarize(&t, &ReportConfig::default());

    assert_eq!(opcodes(&summary.rows), vec!["CALL"]);
    for row in &summary.rows {
        assert!(row.percent_of_total_gas >= 0.1);
    }
    // Totals still include filtered rows
    assert_eq!(summary.total_gas, 10001);
}

#[test]
fn test_filtered_highlight_still_reported() {
    let t = tally(
        &[("CALL", 1), ("SLOAD", 1)],
        &[("CALL", 100000), ("SLOAD", 10)],
    );

    let summary = summarize(&t, &ReportConfig::default().with_highlights(["SLOAD"]));

    assert_eq!(opcodes(&summary.rows), vec!["CALL"]);
    assert_eq!(opcodes(&summary.highlights), vec!["SLOAD"]);
    assert_eq!(summary.highlights[0].total_gas, 10);
}

#[test]
fn test_highlights_keep_configured_order() {
    let t = tally(
        &[("CALL", 1), ("SSTORE", 1)],
        &[("CALL", 9000), ("SSTORE", 5000)],
    );

    let summary = summarize(&t, &ReportConfig::default().with_highlights(["SSTORE", "CALL"]));

    assert_eq!(summary.highlights[0].opcode, "SSTORE");
    assert_eq!(summary.highlights[1].opcode, "CALL");
}

#[test]
fn test_highlights_skip_unexecuted_opcodes() {
    let t = tally(&[("SLOAD", 2)], &[("SLOAD", 4200)]);

    let summary = summarize(&t, &ReportConfig::default());

    assert_eq!(opcodes(&summary.highlights), vec!["SLOAD"]);
}

#[test]
fn test_zero_total_gas_gives_zero_percent() {
    let t = tally(&[("SSTORE", 1)], &[]);

    let summary = summarize(&t, &ReportConfig::default().with_highlights(["SSTORE"]));

    assert_eq!(summary.highlights[0].percent_of_total_gas, 0.0);
    assert_eq!(summary.highlights[0].total_gas, 0);
}

#[test]
fn test_call_sstore_stop_end_to_end() {
    let steps = vec![
        ExecutionStep::new(0, "CALL", 10000),
        ExecutionStep::new(1, "SSTORE", 7800),
        ExecutionStep::new(2, "STOP", 7800),
    ];

    let summary = summarize(&attribute(&steps), &ReportConfig::default());

    assert_eq!(summary.total_gas, 2200);
    assert_eq!(summary.total_ops, 3);
    assert_eq!(opcodes(&summary.rows), vec!["CALL"]);
    assert_eq!(opcodes(&summary.highlights), vec!["SSTORE", "CALL"]);

    let sstore = &summary.highlights[0];
    assert_eq!(sstore.count, 1);
    assert_eq!(sstore.total_gas, 0);
    assert_eq!(sstore.percent_of_total_gas, 0.0);
}

#[test]
fn test_summarize_leaves_tally_untouched() {
    let t = tally(&[("ADD", 1), ("CALL", 1)], &[("ADD", 1), ("CALL", 100000)]);
    let before = t.clone();

    let _ = summarize(&t, &ReportConfig::default());
    assert_eq!(t, before);
}
