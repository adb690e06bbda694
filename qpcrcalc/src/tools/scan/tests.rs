use assert_approx_eq::assert_approx_eq;
use rstest::{
    fixture,
    rstest,
};

use super::*;

fn row(
    position: RowPos,
    sample: &str,
    target: &str,
    ct: &str,
) -> RawRow {
    let cell = |s: &str| (!s.is_empty()).then(|| s.to_string());
    RawRow {
        position,
        sample: cell(sample),
        target: cell(target),
        ct: cell(ct),
    }
}

/// Instrument-like sheet: metadata, header on row 40, data 41..=45, blank
/// row 46 and a trailing section that must never be read.
#[fixture]
fn results_sheet() -> Vec<RawRow> {
    vec![
        row(1, "Block Type", "", ""),
        row(2, "Experiment Name", "run-42", ""),
        row(40, "Sample Name", "Target Name", "CT"),
        row(41, "S1", "GAPDH", "20.0"),
        row(42, "S1", "GAPDH", "20.0"),
        row(43, "S1", "TargetX", "25.0"),
        row(44, "S1", "TargetX", "Undetermined"),
        row(45, "S2", "gapdh", "19.0"),
        row(46, "", "", ""),
        row(47, "S9", "TargetZ", "30.0"),
    ]
}

#[rstest]
fn test_scan_results_sheet(results_sheet: Vec<RawRow>) {
    let outcome = RowScanner::new(ScanConfig::default()).scan(results_sheet);

    assert_eq!(outcome.data_start, Some(41));
    assert_eq!(outcome.data_end, Some(45));
    assert!(outcome.terminated);
    assert_eq!(outcome.reference_target(), Ok("GAPDH"));

    let table = &outcome.table;
    assert_eq!(table.get("GAPDH", "S1").unwrap().count(), 2);
    assert_approx_eq!(table.mean("GAPDH", "S1").unwrap(), 20.0);
    assert_eq!(table.get("TargetX", "S1").unwrap().count(), 1);
    assert_approx_eq!(table.mean("TargetX", "S1").unwrap(), 25.0);
    // Literal names are kept: "gapdh" is a separate target key
    assert_approx_eq!(table.mean("gapdh", "S2").unwrap(), 19.0);
    assert!(table.get("TargetZ", "S9").is_none());
}

#[rstest]
fn test_undetermined_ct_is_reported(results_sheet: Vec<RawRow>) {
    let outcome = RowScanner::new(ScanConfig::default()).scan(results_sheet);

    assert_eq!(
        outcome.malformed_rows,
        vec![MalformedRow {
            position: 44,
            reason:   MalformedReason::NonNumericCt,
            raw_ct:   Some("Undetermined".to_string()),
        }]
    );
    assert_eq!(
        outcome.malformed_rows[0].to_string(),
        "Row 44 does not have a numeric CT value (Undetermined). Row ignored."
    );
}

#[rstest]
#[case::lower("gapdh")]
#[case::upper("GAPDH")]
#[case::mixed("GaPdH")]
fn test_control_case_insensitive(
    #[case] control: &str,
    results_sheet: Vec<RawRow>,
) {
    let outcome = RowScanner::new(ScanConfig::new(control)).scan(results_sheet);
    assert_eq!(outcome.reference_target.as_deref(), Some("GAPDH"));
}

#[test]
fn test_reference_is_first_literal_match() {
    let rows = vec![
        row(1, "Sample Name", "Target Name", "CT"),
        row(2, "S1", "Gapdh", "21.0"),
        row(3, "S1", "GAPDH", "20.0"),
    ];
    let outcome = RowScanner::new(ScanConfig::default()).scan(rows);
    assert_eq!(outcome.reference_target(), Ok("Gapdh"));
}

#[test]
fn test_reference_locked_even_if_ct_malformed() {
    let rows = vec![
        row(1, "Sample Name", "Target Name", "CT"),
        row(2, "S1", "GAPDH", "Undetermined"),
        row(3, "S1", "TargetX", "25.0"),
    ];
    let outcome = RowScanner::new(ScanConfig::default()).scan(rows);
    assert_eq!(outcome.reference_target(), Ok("GAPDH"));
    assert!(outcome.table.get("GAPDH", "S1").is_none());
}

#[test]
fn test_marker_never_found() {
    let rows = vec![
        row(1, "Sample", "GAPDH", "20.0"),
        row(2, "S1", "GAPDH", "20.0"),
    ];
    let outcome = RowScanner::new(ScanConfig::default()).scan(rows);

    assert!(outcome.table.is_empty());
    assert_eq!(outcome.data_start, None);
    assert_eq!(outcome.data_end, None);
    assert_eq!(outcome.reference_target, None);
    assert_eq!(outcome.rows_scanned, 2);
    assert_eq!(
        outcome.reference_target(),
        Err(QpcrError::NoDataRegion("Sample Name".to_string()))
    );
}

#[test]
fn test_no_control_found() {
    let rows = vec![
        row(1, "Sample Name", "Target Name", "CT"),
        row(2, "S1", "ACTB", "18.0"),
        row(3, "S1", "TargetX", "25.0"),
    ];
    let outcome = RowScanner::new(ScanConfig::default()).scan(rows);
    assert_eq!(outcome.table.n_pairs(), 2);
    assert_eq!(
        outcome.reference_target(),
        Err(QpcrError::NoControlFound("GAPDH".to_string()))
    );
}

#[test]
fn test_open_ended_input() {
    let rows = (0..1000u32).map(|i| {
        if i == 0 {
            row(10, "Sample Name", "Target Name", "CT")
        }
        else {
            row(10 + i, "S1", "GAPDH", "20.0")
        }
    });
    let outcome = RowScanner::new(ScanConfig::default()).scan(rows);

    assert!(!outcome.terminated);
    assert_eq!(outcome.data_start, Some(11));
    assert_eq!(outcome.data_end, Some(1009));
    assert_eq!(outcome.table.get("GAPDH", "S1").unwrap().count(), 999);
}

#[test]
fn test_state_transitions() {
    let mut scanner = RowScanner::new(ScanConfig::default());
    assert_eq!(scanner.state(), ScanState::Seeking);

    assert_eq!(scanner.push(row(1, "Plate", "", "")), ScanState::Seeking);
    assert_eq!(
        scanner.push(row(2, "Sample Name", "Target Name", "CT")),
        ScanState::Active { data_start: 3 }
    );
    assert_eq!(
        scanner.push(row(3, "S1", "GAPDH", "20.0")),
        ScanState::Active { data_start: 3 }
    );
    let terminated = ScanState::Terminated {
        data_start: 3,
        data_end:   3,
    };
    assert_eq!(scanner.push(row(4, "S1", "", "20.0")), terminated);
    // Ignored once terminated
    assert_eq!(scanner.push(row(5, "S1", "GAPDH", "21.0")), terminated);
    assert_eq!(scanner.table().get("GAPDH", "S1").unwrap().count(), 1);
}

#[test]
fn test_empty_region() {
    let rows = vec![
        row(7, "Sample Name", "Target Name", "CT"),
        row(8, "", "", ""),
    ];
    let outcome = RowScanner::new(ScanConfig::default()).scan(rows);
    assert_eq!(outcome.data_start, Some(8));
    assert_eq!(outcome.data_end, Some(7));
    assert!(outcome.table.is_empty());
}

#[test]
fn test_missing_sample_is_malformed() {
    let rows = vec![
        row(1, "Sample Name", "Target Name", "CT"),
        row(2, "", "GAPDH", "20.0"),
    ];
    let outcome = RowScanner::new(ScanConfig::default()).scan(rows);
    assert!(outcome.table.is_empty());
    assert_eq!(outcome.malformed_rows[0].reason, MalformedReason::MissingSample);
}

#[test]
fn test_custom_header_marker() {
    let rows = vec![
        row(1, "Well Sample", "Target", "Cq"),
        row(2, "S1", "GAPDH", "20.0"),
    ];
    let config = ScanConfig::default().with_header_marker("Well Sample".to_string());
    let outcome = RowScanner::new(config).scan(rows);
    assert_eq!(outcome.table.n_replicates(), 1);
}

#[test]
fn test_try_scan_stops_pulling_after_termination() {
    let rows: Vec<Result<RawRow, String>> = vec![
        Ok(row(1, "Sample Name", "Target Name", "CT")),
        Ok(row(2, "S1", "GAPDH", "20.0")),
        Ok(row(3, "", "", "")),
        Err("unreadable row".to_string()),
    ];
    let outcome = RowScanner::new(ScanConfig::default())
        .try_scan(rows)
        .unwrap();
    assert!(outcome.terminated);

    let rows: Vec<Result<RawRow, String>> = vec![
        Ok(row(1, "Sample Name", "Target Name", "CT")),
        Err("unreadable row".to_string()),
    ];
    assert!(RowScanner::new(ScanConfig::default()).try_scan(rows).is_err());
}

#[rstest]
#[case::plain("20.5", Some(20.5))]
#[case::padded(" 31.25 ", Some(31.25))]
#[case::integer("30", Some(30.0))]
#[case::undetermined("Undetermined", None)]
#[case::nan("NaN", None)]
#[case::infinite("inf", None)]
#[case::empty("", None)]
fn test_parse_ct(
    #[case] raw: &str,
    #[case] expected: Option<f64>,
) {
    assert_eq!(parse_ct(Some(raw)), expected);
}
