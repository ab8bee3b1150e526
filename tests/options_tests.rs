use memodb_history::{DbError, VersioningOptions};
use std::io::Write;
use tempfile::NamedTempFile;

fn options_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_options_file() {
    let file = options_file(
        r#"{
            "table_name": "%s_history",
            "version_column_name": "revision",
            "inspect_column_order": true
        }"#,
    );

    let options = VersioningOptions::from_json_file(file.path()).unwrap();
    assert_eq!(
        options,
        VersioningOptions::new()
            .table_name("%s_history")
            .version_column_name("revision")
            .inspect_column_order(true)
    );
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = options_file(r#"{"inspect_column_order": true}"#);

    let options = VersioningOptions::from_json_file(file.path()).unwrap();
    assert_eq!(options.table_name, "%s_version");
    assert_eq!(options.version_column_name, "transaction_id");
    assert!(options.inspect_column_order);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = VersioningOptions::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DbError::IoError(_)));
}

#[test]
fn test_malformed_json() {
    let file = options_file("{ table_name: ");
    let err = VersioningOptions::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, DbError::ConfigurationError(_)));
}

#[test]
fn test_defaults_serialize_round_trip() {
    let json = serde_json::to_string(&VersioningOptions::default()).unwrap();
    assert_eq!(VersioningOptions::from_json_str(&json).unwrap(), VersioningOptions::default());
}
