//! Character-level SQL lexer.
//!
//! The lexer is total: for any finite input it produces a finite token
//! sequence and never fails. Unterminated strings, quoted identifiers,
//! and block comments are closed by end of input, and a character the
//! lexer does not recognize becomes a single-character punctuation
//! token. This keeps the whole pipeline usable on malformed or
//! partially pasted scripts.
//!
//! Quoting rules (Hive-family):
//! - `'...'` with `''` as an escaped quote is one string token
//! - `"..."` (with `""` escape) and `` `...` `` are quoted identifiers
//! - `--` to end of line and `/* ... */` spans are comment tokens

use std::collections::HashSet;
use std::iter::Peekable;
use std::str::CharIndices;

use once_cell::sync::Lazy;

use super::token::{Token, TokenKind};

/// Words the walker treats as structural. Anything else that looks like
/// a word is an identifier and therefore a table-name candidate.
static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ALL",
        "ALTER",
        "AND",
        "ANTI",
        "AS",
        "ASC",
        "BETWEEN",
        "BUCKETS",
        "BY",
        "CASE",
        "CAST",
        "CLUSTERED",
        "CREATE",
        "CROSS",
        "DELETE",
        "DESC",
        "DIRECTORY",
        "DISTINCT",
        "DISTRIBUTE",
        "DROP",
        "ELSE",
        "END",
        "EXCEPT",
        "EXISTS",
        "EXTERNAL",
        "FROM",
        "FULL",
        "GROUP",
        "HAVING",
        "IF",
        "IN",
        "INNER",
        "INSERT",
        "INTERSECT",
        "INTO",
        "IS",
        "JOIN",
        "LATERAL",
        "LEFT",
        "LIKE",
        "LIMIT",
        "LOCATION",
        "MERGE",
        "NOT",
        "NULL",
        "ON",
        "OR",
        "ORDER",
        "OUTER",
        "OVER",
        "OVERWRITE",
        "PARTITION",
        "PARTITIONED",
        "RECURSIVE",
        "REPLACE",
        "RIGHT",
        "RLIKE",
        "ROW",
        "ROWS",
        "SELECT",
        "SEMI",
        "SET",
        "SORT",
        "SORTED",
        "STORED",
        "TABLE",
        "TABLESAMPLE",
        "TBLPROPERTIES",
        "TEMPORARY",
        "THEN",
        "UNION",
        "UPDATE",
        "USE",
        "USING",
        "VALUES",
        "VIEW",
        "WHEN",
        "WHERE",
        "WINDOW",
        "WITH",
    ]
    .into_iter()
    .collect()
});

/// Lazy, restartable token stream over a SQL script.
///
/// Create a fresh `Lexer` to restart; the lexer itself holds no state
/// beyond its cursor.
pub struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    /// Consume characters while `keep` holds, returning the byte offset
    /// just past the last consumed character.
    fn scan_while<F: Fn(char) -> bool>(&mut self, keep: F) -> usize {
        while let Some(&(i, c)) = self.chars.peek() {
            if keep(c) {
                self.chars.next();
            } else {
                return i;
            }
        }
        self.src.len()
    }

    /// Consume a quoted region opened by `quote` (already consumed),
    /// honoring doubled-quote escapes. Returns the byte offset just past
    /// the closing quote, or end of input if unterminated.
    fn scan_quoted(&mut self, quote: char) -> usize {
        while let Some((i, c)) = self.chars.next() {
            if c == quote {
                match self.chars.peek() {
                    Some(&(_, next)) if next == quote => {
                        self.chars.next();
                    }
                    _ => return i + c.len_utf8(),
                }
            }
        }
        self.src.len()
    }

    /// Consume a block comment body (the `/*` is already consumed).
    /// Returns the byte offset just past the closing `*/`, or end of
    /// input if unterminated.
    fn scan_block_comment(&mut self) -> usize {
        while let Some((_, c)) = self.chars.next() {
            if c == '*' {
                if let Some(&(i, '/')) = self.chars.peek() {
                    self.chars.next();
                    return i + 1;
                }
            }
        }
        self.src.len()
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        Token {
            kind,
            text: self.src[start..end].to_string(),
            offset: start,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (start, c) = self.chars.next()?;

        if c.is_whitespace() {
            let end = self.scan_while(char::is_whitespace);
            return Some(self.token(TokenKind::Whitespace, start, end));
        }

        // Line comment: --
        if c == '-' && matches!(self.chars.peek(), Some(&(_, '-'))) {
            self.chars.next();
            let end = self.scan_while(|c| c != '\n');
            return Some(self.token(TokenKind::Comment, start, end));
        }

        // Block comment: /* ... */
        if c == '/' && matches!(self.chars.peek(), Some(&(_, '*'))) {
            self.chars.next();
            let end = self.scan_block_comment();
            return Some(self.token(TokenKind::Comment, start, end));
        }

        // String literal: '...'
        if c == '\'' {
            let end = self.scan_quoted('\'');
            return Some(self.token(TokenKind::String, start, end));
        }

        // Quoted identifiers: "..." or `...`
        if c == '"' || c == '`' {
            let end = self.scan_quoted(c);
            return Some(self.token(TokenKind::QuotedIdentifier, start, end));
        }

        if c.is_ascii_digit() {
            let end = self.scan_while(|c| c.is_ascii_digit() || c == '.');
            return Some(self.token(TokenKind::Number, start, end));
        }

        if c.is_alphabetic() || c == '_' {
            let end = self.scan_while(|c| c.is_alphanumeric() || c == '_');
            let word = &self.src[start..end];
            let kind = if KEYWORDS.contains(word.to_ascii_uppercase().as_str()) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return Some(self.token(kind, start, end));
        }

        // Everything else, recognized or not, is a single-character
        // punctuation token.
        Some(self.token(TokenKind::Punctuation, start, start + c.len_utf8()))
    }
}

/// Tokenize a script into a vector, comments and whitespace included.
pub fn tokenize(sql: &str) -> Vec<Token> {
    Lexer::new(sql).collect()
}
