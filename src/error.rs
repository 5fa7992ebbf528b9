//! Error types for sql-source-tables

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the command boundary.
///
/// The extraction core itself is total: it terminates with a (possibly
/// empty) result for any finite input and never produces an error. Only
/// the boundary — input selection, decoding, file I/O, and the size
/// guard — can fail.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No input provided")]
    EmptyRequest,

    #[error("input is {size} bytes, which exceeds the {limit} byte limit")]
    InputTooLarge { size: usize, limit: usize },

    #[error("failed to decode base64 file content")]
    InvalidBase64 {
        #[source]
        source: base64::DecodeError,
    },

    #[error("file content is not valid UTF-8 text")]
    InvalidText {
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to read SQL script: {path}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
