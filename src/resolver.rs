//! Aggregation of table references into the final result set.
//!
//! The resolver merges the source references of every statement,
//! deduplicates case-insensitively while preserving the first-seen
//! casing, and yields names in case-insensitive lexicographic order.
//! It also carries the script's session state: a `USE <db>` statement
//! qualifies later unqualified names with that database, while explicit
//! `schema.table` qualifiers always pass through untouched.

use std::collections::BTreeMap;

use crate::walker::TableReference;

/// Accumulates source table names across the statements of one script.
#[derive(Debug, Default)]
pub struct SourceTableSet {
    current_database: Option<String>,
    // lowercased qualified name -> first-seen casing; BTreeMap iteration
    // gives the deterministic output order
    names: BTreeMap<String, String>,
}

impl SourceTableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the active database for subsequent unqualified names.
    pub fn set_current_database(&mut self, database: String) {
        self.current_database = Some(database);
    }

    /// Record a reference; non-source classifications are ignored.
    pub fn record(&mut self, reference: &TableReference) {
        if !reference.is_source() {
            return;
        }
        let name = self.qualify(reference);
        if name.is_empty() {
            return;
        }
        self.names.entry(name.to_ascii_lowercase()).or_insert(name);
    }

    fn qualify(&self, reference: &TableReference) -> String {
        match (&self.current_database, reference.parts.as_slice()) {
            (Some(db), [table]) => format!("{}.{}", db, table),
            _ => reference.qualified_name(),
        }
    }

    /// The deduplicated names, sorted case-insensitively.
    pub fn into_sorted_names(self) -> Vec<String> {
        self.names.into_values().collect()
    }
}

/// Merge several already-extracted name lists into one deduplicated,
/// sorted list. Used when a run spans multiple script files.
pub fn merge_names<I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut merged = BTreeMap::new();
    for list in lists {
        for name in list {
            merged.entry(name.to_ascii_lowercase()).or_insert(name);
        }
    }
    merged.into_values().collect()
}
