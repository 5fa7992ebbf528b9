//! Integration tests for file-based extraction
//!
//! These drive the same paths the CLI uses: scripts on disk, encoding
//! fallback, and the merge across multiple files.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use sql_source_tables::{extract_from_files, run_extract, ExtractOptions};

/// Helper to create a temp SQL file with content
fn create_sql_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".sql").unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn create_sql_file_bytes(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".sql").unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_extract_from_single_file() {
    let file = create_sql_file("USE prod; SELECT * FROM orders JOIN db.items ON 1=1");
    let tables = extract_from_files(&[file.path().to_path_buf()]).unwrap();
    assert_eq!(tables, ["db.items", "prod.orders"]);
}

#[test]
fn test_extract_from_multiple_files_merges_and_dedups() {
    let first = create_sql_file("SELECT * FROM shared.t; SELECT * FROM db1.a");
    let second = create_sql_file("SELECT * FROM SHARED.T; SELECT * FROM db2.b");
    let tables = extract_from_files(&[
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ])
    .unwrap();
    assert_eq!(tables, ["db1.a", "db2.b", "shared.t"]);
}

#[test]
fn test_extract_from_many_files_parallel_path() {
    // Ten files crosses the parallel-processing threshold.
    let files: Vec<NamedTempFile> = (0..10)
        .map(|i| create_sql_file(&format!("SELECT * FROM db.t{i}")))
        .collect();
    let paths: Vec<PathBuf> = files.iter().map(|f| f.path().to_path_buf()).collect();

    let tables = extract_from_files(&paths).unwrap();
    let expected: Vec<String> = (0..10).map(|i| format!("db.t{i}")).collect();
    assert_eq!(tables, expected);
}

#[test]
fn test_missing_file_is_an_error() {
    let result = extract_from_files(&[PathBuf::from("/no/such/script.sql")]);
    assert!(result.is_err());
}

#[test]
fn test_utf8_bom_is_stripped() {
    let mut content = Vec::new();
    content.extend_from_slice(b"\xEF\xBB\xBF");
    content.extend_from_slice(b"SELECT * FROM bom_table");
    let file = create_sql_file_bytes(&content);

    let tables = extract_from_files(&[file.path().to_path_buf()]).unwrap();
    assert_eq!(tables, ["bom_table"]);
}

#[test]
fn test_windows_1252_fallback() {
    // 0xE9 is é in Windows-1252 but invalid UTF-8 on its own.
    let file = create_sql_file_bytes(b"-- caf\xE9 export\nSELECT * FROM menu");
    let tables = extract_from_files(&[file.path().to_path_buf()]).unwrap();
    assert_eq!(tables, ["menu"]);
}

#[test]
fn test_run_extract_combines_files_and_inline_sql() {
    let file = create_sql_file("SELECT * FROM from_file");
    let options = ExtractOptions {
        files: vec![file.path().to_path_buf()],
        sql: Some("SELECT * FROM inline_table".to_string()),
        ..Default::default()
    };
    assert_eq!(run_extract(options).unwrap(), "from_file\ninline_table");
}

#[test]
fn test_run_extract_comma_separator() {
    let file = create_sql_file("SELECT * FROM b JOIN a ON a.x=b.x");
    let options = ExtractOptions {
        files: vec![file.path().to_path_buf()],
        separator: ", ".to_string(),
        ..Default::default()
    };
    assert_eq!(run_extract(options).unwrap(), "a, b");
}

#[test]
fn test_run_extract_base64_input() {
    use base64::{engine::general_purpose, Engine as _};
    let options = ExtractOptions {
        base64: Some(general_purpose::STANDARD.encode("SELECT * FROM encoded_table")),
        ..Default::default()
    };
    assert_eq!(run_extract(options).unwrap(), "encoded_table");
}

#[test]
fn test_multi_statement_script_file() {
    let file = create_sql_file(
        "SET hive.exec.parallel=true;\n\
         USE staging;\n\
         WITH recent AS (SELECT * FROM events WHERE dt > '2024-01-01')\n\
         INSERT OVERWRITE TABLE daily_rollup SELECT * FROM recent;\n\
         SELECT * FROM audit.log;",
    );
    let tables = extract_from_files(&[file.path().to_path_buf()]).unwrap();
    assert_eq!(
        tables,
        ["audit.log", "staging.daily_rollup", "staging.events"]
    );
}
