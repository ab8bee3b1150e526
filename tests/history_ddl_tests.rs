use memodb_history::{
    DataType, DbError, SqlParserAdapter, TableSchema, VersioningOptions, derive_history_ddl,
};
use std::io::Write;
use tempfile::NamedTempFile;

const SCHEMA: &str = "
    CREATE TABLE articles (id INTEGER PRIMARY KEY, title VARCHAR(200) NOT NULL, slug TEXT UNIQUE);
    CREATE TABLE tags (id INTEGER PRIMARY KEY, label TEXT);
";

fn options_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn parse(sql: &str) -> Vec<TableSchema> {
    SqlParserAdapter::new().parse_tables(sql).unwrap()
}

fn column_names(table: &TableSchema) -> Vec<&str> {
    table.columns().iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_derived_ddl_parses_back_to_history_table() {
    let file = options_file(r#"{ "table_name": "%s_history", "version_column_name": "revision" }"#);
    let options = VersioningOptions::from_json_file(file.path()).unwrap();

    let output = derive_history_ddl(SCHEMA, options, None, &["articles".to_string()]).unwrap();
    let tables = parse(&output);

    assert_eq!(tables.len(), 1);
    let history = &tables[0];
    assert_eq!(history.name(), "articles_history");
    assert_eq!(column_names(history), vec!["id", "title", "slug", "revision"]);
    assert_eq!(history.primary_key_names(), vec!["revision"]);
    assert_eq!(history.column("revision").unwrap().data_type, DataType::BigInt);
    assert_eq!(history.column("title").unwrap().data_type, DataType::Varchar(Some(200)));
    assert!(!history.column("title").unwrap().nullable);
    assert!(!history.column("slug").unwrap().unique);
}

#[test]
fn test_all_tables_derived_with_defaults() {
    let output = derive_history_ddl(SCHEMA, VersioningOptions::default(), None, &[]).unwrap();
    let names: Vec<String> = parse(&output).iter().map(|t| t.name().to_string()).collect();

    assert_eq!(names, vec!["articles_version", "tags_version"]);
    assert!(output.contains("\n\n"));
}

#[test]
fn test_live_schema_sets_column_order() {
    let options = VersioningOptions::new().inspect_column_order(true);
    let live = "CREATE TABLE tags (label TEXT, id INTEGER PRIMARY KEY)";

    let output = derive_history_ddl(SCHEMA, options, Some(live), &["tags".to_string()]).unwrap();
    let tables = parse(&output);
    assert_eq!(column_names(&tables[0]), vec!["label", "id", "transaction_id"]);
}

#[test]
fn test_inspection_without_live_schema_fails() {
    let options = VersioningOptions::new().inspect_column_order(true);
    assert!(matches!(
        derive_history_ddl(SCHEMA, options, None, &[]),
        Err(DbError::NotBound(_))
    ));
}

#[test]
fn test_invalid_schema_is_a_parse_error() {
    assert!(matches!(
        derive_history_ddl("DROP TABLE articles", VersioningOptions::default(), None, &[]),
        Err(DbError::ParseError(_))
    ));
}
