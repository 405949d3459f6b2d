use fixlet_core::{load_records, save_records, CodecDirection, CodecError, FixletRecord};
use std::fs;

const HEADER: &str = "SiteID,FixletID,Name,Criticality,RelevantComputerCount";

#[test]
fn load_reads_rows_and_coerces_bad_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.csv");
    fs::write(
        &path,
        format!("{HEADER}\nS1,F1,Patch A,High,abc\nS2,F2,Patch B,Low,14\n"),
    )
    .unwrap();

    let records = load_records(&path).unwrap();
    assert_eq!(
        records,
        vec![
            FixletRecord::new("S1", "F1", "Patch A", "High", 0),
            FixletRecord::new("S2", "F2", "Patch B", "Low", 14),
        ]
    );
}

#[test]
fn load_missing_file_is_read_error_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = load_records(&path).unwrap_err();
    assert!(matches!(err, CodecError::Read { .. }), "unexpected error: {err}");
    assert_eq!(err.direction(), CodecDirection::Read);
    assert_eq!(err.path(), Some(path.as_path()));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn load_short_row_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.csv");
    fs::write(&path, format!("{HEADER}\nS1,F1,Patch\n")).unwrap();

    let err = load_records(&path).unwrap_err();
    assert!(matches!(err, CodecError::MalformedRow { found: 3, .. }));
}

#[test]
fn save_then_load_preserves_order_and_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.csv");
    let records = vec![
        FixletRecord::new("S2", "F9", "Zulu", "Moderate", 3),
        FixletRecord::new("S1", "F1", "Alpha", "Critical", 1200),
        FixletRecord::new("S1", "F1", "Alpha again", "Critical", 0),
    ];

    save_records(&path, &records).unwrap();
    assert_eq!(load_records(&path).unwrap(), records);
}

#[test]
fn save_replaces_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.csv");
    fs::write(&path, format!("{HEADER}\nS1,F1,Old,High,1\nS1,F2,Old,High,2\n")).unwrap();

    save_records(&path, &[FixletRecord::new("S3", "F3", "New", "Low", 7)]).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, format!("{HEADER}\nS3,F3,New,Low,7\n"));
}

#[test]
fn save_into_directory_is_write_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = save_records(dir.path(), &[]).unwrap_err();
    assert!(matches!(err, CodecError::Write { .. }), "unexpected error: {err}");
    assert_eq!(err.direction(), CodecDirection::Write);
}

#[test]
fn load_stray_quote_is_fatal_with_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.csv");
    fs::write(&path, format!("{HEADER}\nS1,\"F1\"x,Patch,High,5\n")).unwrap();

    let err = load_records(&path).unwrap_err();
    assert!(
        matches!(err, CodecError::MalformedQuoting { line: 2, .. }),
        "unexpected error: {err}"
    );
    assert_eq!(err.direction(), CodecDirection::Read);
    assert_eq!(err.path(), Some(path.as_path()));
}

#[test]
fn load_short_header_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.csv");
    fs::write(&path, "SiteID,FixletID,Name\nS1,F1,Patch,High,5\n").unwrap();

    let err = load_records(&path).unwrap_err();
    assert!(matches!(err, CodecError::MalformedRow { line: 1, found: 3, .. }));
}
