use sortbench::cli::{compare, CompareMode};
use sortbench::timing::SortHarness;
use std::io::Write;

mod common;
use common::test_server::{setup_may_runtime, STACK_SIZE};

fn write_input(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_compare_both_fills_both_fields() {
    setup_may_runtime();
    let input = write_input(r#"{"to_sort": [[3,1,2],[5,4],[]]}"#);
    let report = compare(input.path(), CompareMode::Both, SortHarness::new(STACK_SIZE)).unwrap();
    assert_eq!(report.sequential_time.map(|t| t.len()), Some(3));
    assert_eq!(report.concurrent_time.map(|t| t.len()), Some(3));
}

#[test]
fn test_compare_single_mode() {
    setup_may_runtime();
    let input = write_input(r#"{"to_sort": [[1]]}"#);
    let report =
        compare(input.path(), CompareMode::Sequential, SortHarness::new(STACK_SIZE)).unwrap();
    assert!(report.sequential_time.is_some());
    assert!(report.concurrent_time.is_none());
}

#[test]
fn test_compare_rejects_malformed_input() {
    let input = write_input(r#"{"to_sort": [[1,"#);
    let err = compare(input.path(), CompareMode::Both, SortHarness::new(STACK_SIZE)).unwrap_err();
    assert!(format!("{err:#}").contains("failed to decode"));
}

#[test]
fn test_compare_missing_file() {
    let err = compare(
        std::path::Path::new("/definitely/not/here.json"),
        CompareMode::Both,
        SortHarness::new(STACK_SIZE),
    )
    .unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
