mod common;

use common::sim_file_text;
use pmse::config::EvalConfig;
use pmse::error::PmseError;
use pmse::loader::{load_all_ground_truth, load_ground_truth, parse_ground_truth};
use rstest::rstest;
use std::fs;
use std::path::Path;

fn origin() -> &'static Path {
    Path::new("inline.txt")
}

#[test]
fn test_parses_documented_example() {
    let text = "[2.5, 1.0, 0.3]\nx\ny\n3;x;1;y\n";
    let truth = parse_ground_truth(text, origin()).unwrap();
    assert_eq!(truth.money_coefficient, 2.5);
    assert_eq!(truth.tipping_norm, 3);
    assert_eq!(truth.gasp_score, 1);
}

#[rstest]
#[case("goals [0.75, 2]", 0.75)]
#[case("[ -1.25 , 3]", -1.25)]
#[case("[7, 8, 9]", 7.0)]
fn test_money_coefficient_extraction(#[case] line1: &str, #[case] expected: f64) {
    let text = format!("{}\n\n\n1;0;2\n", line1);
    let truth = parse_ground_truth(&text, origin()).unwrap();
    assert_eq!(truth.money_coefficient, expected);
}

#[test]
fn test_labels_tolerate_whitespace() {
    let text = "[1.0, 2.0]\n\n\n 4 ; 0.3 ; 2 ;\n";
    let truth = parse_ground_truth(text, origin()).unwrap();
    assert_eq!(truth.tipping_norm, 4);
    assert_eq!(truth.gasp_score, 2);
}

#[rstest]
#[case("[1.0, 2.0]\nonly\nthree\n")] // too short
#[case("1.0, 2.0\n\n\n1;0;2\n")] // no bracket
#[case("[1.0 2.0]\n\n\n1;0;2\n")] // no comma
#[case("[abc, 2.0]\n\n\n1;0;2\n")] // non-numeric money
#[case("[1.0, 2.0]\n\n\n1.5;0;2\n")] // non-integer norm
#[case("[1.0, 2.0]\n\n\n1;0\n")] // missing gasp field
#[case("prefix, [4, 5]\n\n\n1;0;2\n")] // comma before the bracket
fn test_malformed_files_are_rejected(#[case] text: &str) {
    match parse_ground_truth(text, origin()) {
        Err(PmseError::GroundTruth { path, .. }) => assert_eq!(path, origin()),
        other => panic!("expected GroundTruth error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_ground_truth(dir.path().join("simulation0.txt")).unwrap_err();
    assert!(matches!(err, PmseError::Io { .. }));
}

#[test]
fn test_load_all_reads_configured_count() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..4 {
        fs::write(
            dir.path().join(format!("run_{}.dat", i)),
            sim_file_text(i as f64 * 0.5, i, 3 - i),
        )
        .unwrap();
    }

    let config = EvalConfig {
        data_dir: dir.path().to_path_buf(),
        sim_count: 4,
        sim_pattern: "run_{i}.dat".to_string(),
        ..Default::default()
    };

    let truths = load_all_ground_truth(&config).unwrap();
    assert_eq!(truths.len(), 4);
    assert_eq!(truths[3].money_coefficient, 1.5);
    assert_eq!(truths[3].tipping_norm, 3);
    assert_eq!(truths[3].gasp_score, 0);
}

#[test]
fn test_load_all_fails_on_first_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("simulation0.txt"), sim_file_text(1.0, 1, 1)).unwrap();

    let config = EvalConfig {
        data_dir: dir.path().to_path_buf(),
        sim_count: 2,
        ..Default::default()
    };

    match load_all_ground_truth(&config) {
        Err(PmseError::Io { path, .. }) => assert!(path.ends_with("simulation1.txt")),
        other => panic!("expected Io error, got {:?}", other),
    }
}
