//! Unit tests for the command boundary
//!
//! The boundary owns everything the core does not: choosing between
//! pasted text and uploaded file content, base64 and text decoding, the
//! input size guard, and formatting the display string.

use base64::{engine::general_purpose, Engine as _};
use sql_source_tables::command::{
    gen_all_source_table, run_request, SourceTableRequest, DEFAULT_MAX_INPUT_BYTES,
    NO_INPUT_MESSAGE,
};
use sql_source_tables::ExtractError;

fn encode(sql: &str) -> String {
    general_purpose::STANDARD.encode(sql)
}

#[test]
fn test_pasted_text_request() {
    let request = SourceTableRequest::from_text("INSERT INTO target SELECT * FROM src");
    assert_eq!(gen_all_source_table(&request), "src\ntarget");
}

#[test]
fn test_uploaded_file_request() {
    let request = SourceTableRequest::from_file_content(encode(
        "WITH t AS (SELECT * FROM a) SELECT * FROM t JOIN b ON t.id=b.id",
    ));
    assert_eq!(gen_all_source_table(&request), "a\nb");
}

#[test]
fn test_text_takes_precedence_over_file() {
    let request = SourceTableRequest {
        input: "SELECT * FROM pasted".to_string(),
        file_content: Some(encode("SELECT * FROM uploaded")),
    };
    assert_eq!(gen_all_source_table(&request), "pasted");
}

#[test]
fn test_no_input_sentinel() {
    assert_eq!(
        gen_all_source_table(&SourceTableRequest::default()),
        NO_INPUT_MESSAGE
    );
}

#[test]
fn test_empty_file_content_is_no_input() {
    let request = SourceTableRequest::from_file_content("");
    assert_eq!(gen_all_source_table(&request), NO_INPUT_MESSAGE);
}

#[test]
fn test_invalid_base64_reported_as_error_string() {
    let request = SourceTableRequest::from_file_content("@@not-base64@@");
    let display = gen_all_source_table(&request);
    assert!(display.starts_with("error:"), "got: {display}");
}

#[test]
fn test_invalid_base64_typed_error() {
    let request = SourceTableRequest::from_file_content("@@not-base64@@");
    assert!(matches!(
        run_request(&request, DEFAULT_MAX_INPUT_BYTES),
        Err(ExtractError::InvalidBase64 { .. })
    ));
}

#[test]
fn test_non_utf8_file_content_typed_error() {
    let request = SourceTableRequest::from_file_content(
        general_purpose::STANDARD.encode([0xC3, 0x28, 0xA0, 0xA1]),
    );
    assert!(matches!(
        run_request(&request, DEFAULT_MAX_INPUT_BYTES),
        Err(ExtractError::InvalidText { .. })
    ));
}

#[test]
fn test_size_guard_applies_to_text() {
    let request = SourceTableRequest::from_text("SELECT * FROM a_table");
    assert!(matches!(
        run_request(&request, 8),
        Err(ExtractError::InputTooLarge { limit: 8, .. })
    ));
}

#[test]
fn test_size_guard_applies_to_decoded_bytes() {
    let request = SourceTableRequest::from_file_content(encode("SELECT * FROM a_table"));
    assert!(matches!(
        run_request(&request, 8),
        Err(ExtractError::InputTooLarge { limit: 8, .. })
    ));
}

#[test]
fn test_script_without_tables_displays_empty() {
    let request = SourceTableRequest::from_text("-- only comments here");
    assert_eq!(gen_all_source_table(&request), "");
}

#[test]
fn test_run_request_returns_sorted_names() {
    let request = SourceTableRequest::from_text(
        "SELECT * FROM zeta; SELECT * FROM alpha JOIN Mid ON 1=1",
    );
    let names = run_request(&request, DEFAULT_MAX_INPUT_BYTES).unwrap();
    assert_eq!(names, ["alpha", "Mid", "zeta"]);
}
