//! Command boundary for source-table extraction.
//!
//! This is the only layer that talks to the surrounding application.
//! It mirrors the calling convention of the original desktop command:
//! the caller supplies either pasted text (`input`) or base64-encoded
//! file bytes (`file_content`), and receives one display string — the
//! extracted names joined with newlines, or a human-readable message
//! when the request cannot be served. The extraction core underneath
//! never fails; every failure mode here is a boundary concern.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use encoding_rs::WINDOWS_1252;

use crate::error::ExtractError;
use crate::extract_source_tables;

/// Resource-exhaustion guard applied before the lexer runs.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Sentinel returned when neither text nor file content was supplied.
pub const NO_INPUT_MESSAGE: &str = "No input provided";

/// One extraction request as the front-end sends it.
#[derive(Debug, Clone, Default)]
pub struct SourceTableRequest {
    /// Pasted SQL text; takes precedence when non-empty.
    pub input: String,
    /// Base64-encoded file bytes, decoded to UTF-8 SQL.
    pub file_content: Option<String>,
}

impl SourceTableRequest {
    pub fn from_text(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            file_content: None,
        }
    }

    pub fn from_file_content(encoded: impl Into<String>) -> Self {
        Self {
            input: String::new(),
            file_content: Some(encoded.into()),
        }
    }
}

/// Resolve a request to the SQL text to analyze.
fn resolve_sql(request: &SourceTableRequest, max_bytes: usize) -> Result<String, ExtractError> {
    if !request.input.is_empty() {
        guard_size(request.input.len(), max_bytes)?;
        return Ok(request.input.clone());
    }
    let Some(encoded) = request.file_content.as_deref().filter(|c| !c.is_empty()) else {
        return Err(ExtractError::EmptyRequest);
    };
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|source| ExtractError::InvalidBase64 { source })?;
    guard_size(bytes.len(), max_bytes)?;
    String::from_utf8(bytes).map_err(|source| ExtractError::InvalidText { source })
}

fn guard_size(size: usize, limit: usize) -> Result<(), ExtractError> {
    if size > limit {
        return Err(ExtractError::InputTooLarge { size, limit });
    }
    Ok(())
}

/// Run an extraction request with an explicit size limit, returning the
/// sorted names.
pub fn run_request(
    request: &SourceTableRequest,
    max_bytes: usize,
) -> Result<Vec<String>, ExtractError> {
    let sql = resolve_sql(request, max_bytes)?;
    Ok(extract_source_tables(&sql))
}

/// The backend command: answer a request with one display string
/// suitable for a read-only text area, names joined with newlines.
pub fn gen_all_source_table(request: &SourceTableRequest) -> String {
    match run_request(request, DEFAULT_MAX_INPUT_BYTES) {
        Ok(names) => names.join("\n"),
        Err(ExtractError::EmptyRequest) => NO_INPUT_MESSAGE.to_string(),
        Err(err) => format!("error: {}", err),
    }
}

/// Read a SQL script from disk, trying UTF-8 first and falling back to
/// Windows-1252 for scripts exported by Windows tooling. A UTF-8 BOM is
/// stripped.
pub fn read_script(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::ScriptRead {
        path: path.to_path_buf(),
        source,
    })?;

    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let (decoded, _, had_errors) = WINDOWS_1252.decode(err.as_bytes());
            if had_errors {
                return Err(ExtractError::ScriptRead {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "file contains invalid characters",
                    ),
                });
            }
            decoded.into_owned()
        }
    };

    Ok(content
        .strip_prefix('\u{FEFF}')
        .unwrap_or(&content)
        .to_string())
}
