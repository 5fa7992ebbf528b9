//! sql-source-tables: a fast source-table extractor for Hive-family SQL
//!
//! Given a SQL script — possibly containing comments, quoted
//! identifiers, CTEs, nested subqueries, joins, unions, and multiple
//! statements — this library reports the deduplicated set of base
//! tables the script actually reads from or writes to, as distinct from
//! CTE names, subquery aliases, and function calls. Recognition is
//! keyword-driven and total: malformed input degrades to skipping or
//! over-reporting, never to an error.

pub mod command;
pub mod error;
pub mod lexer;
pub mod resolver;
pub mod statement;
pub mod walker;

use std::path::PathBuf;

use anyhow::Result;
use rayon::prelude::*;

pub use command::{gen_all_source_table, SourceTableRequest};
pub use error::ExtractError;

/// Extract the source tables of a SQL script.
///
/// Returns the deduplicated, case-insensitively sorted qualified names
/// of every table the script reads or writes. Total for any input: an
/// empty script, a comment-only script, or unparseable text yields an
/// empty vector, not an error.
pub fn extract_source_tables(sql: &str) -> Vec<String> {
    let tokens = lexer::tokenize(sql);
    let statements = statement::split_statements(tokens);

    let mut set = resolver::SourceTableSet::new();
    for stmt in &statements {
        if let Some(database) = stmt.use_database() {
            set.set_current_database(database);
            continue;
        }
        if stmt.is_config() {
            continue;
        }
        for reference in walker::collect_table_references(stmt) {
            set.record(&reference);
        }
    }
    set.into_sorted_names()
}

/// Minimum number of files to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
const PARALLEL_THRESHOLD: usize = 8;

/// Extract the union of source tables across several script files.
pub fn extract_from_files(files: &[PathBuf]) -> Result<Vec<String>> {
    let per_file: Vec<Result<Vec<String>, ExtractError>> = if files.len() >= PARALLEL_THRESHOLD {
        files
            .par_iter()
            .map(|file| command::read_script(file).map(|sql| extract_source_tables(&sql)))
            .collect()
    } else {
        files
            .iter()
            .map(|file| command::read_script(file).map(|sql| extract_source_tables(&sql)))
            .collect()
    };

    let mut lists = Vec::with_capacity(per_file.len());
    for result in per_file {
        lists.push(result?);
    }
    Ok(resolver::merge_names(lists))
}

/// Options for one extraction run from the command line.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// SQL script files to analyze.
    pub files: Vec<PathBuf>,
    /// Inline SQL text to analyze.
    pub sql: Option<String>,
    /// Base64-encoded script content, as upload front-ends send it.
    pub base64: Option<String>,
    /// String placed between names in the output.
    pub separator: String,
    /// Enable verbose output.
    pub verbose: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            sql: None,
            base64: None,
            separator: "\n".to_string(),
            verbose: false,
        }
    }
}

/// Run a full extraction over files and/or inline input and format the
/// result for display.
pub fn run_extract(options: ExtractOptions) -> Result<String> {
    let mut lists = Vec::new();

    if !options.files.is_empty() {
        if options.verbose {
            println!("Analyzing {} script file(s)", options.files.len());
        }
        lists.push(extract_from_files(&options.files)?);
    }

    if options.sql.is_some() || options.base64.is_some() {
        let request = SourceTableRequest {
            input: options.sql.unwrap_or_default(),
            file_content: options.base64,
        };
        lists.push(command::run_request(
            &request,
            command::DEFAULT_MAX_INPUT_BYTES,
        )?);
    } else if options.files.is_empty() {
        return Ok(command::NO_INPUT_MESSAGE.to_string());
    }

    let names = resolver::merge_names(lists);
    if options.verbose {
        println!("Found {} source table(s)", names.len());
    }
    Ok(names.join(&options.separator))
}
