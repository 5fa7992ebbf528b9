//! Statement splitting.
//!
//! A script is segmented into statements at top-level semicolons.
//! Because the lexer emits strings and comments as single tokens, a
//! semicolon inside either never surfaces as a punctuation token, so no
//! quote-awareness is needed here. Whitespace and comment tokens are
//! dropped at this point; the walker only ever sees meaningful tokens.

use crate::lexer::{Token, TokenKind};

/// One SQL statement: its meaningful tokens plus the byte offset of the
/// statement's first token in the original script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub tokens: Vec<Token>,
    pub offset: usize,
}

impl Statement {
    /// For a `USE <db>` statement, the database being switched to.
    pub fn use_database(&self) -> Option<String> {
        if !self.tokens.first()?.is_keyword("USE") {
            return None;
        }
        self.tokens.get(1)?.name()
    }

    /// Whether this is a `SET key=value` configuration statement, which
    /// references no tables and is skipped entirely.
    pub fn is_config(&self) -> bool {
        self.tokens
            .first()
            .is_some_and(|t| t.is_keyword("SET"))
    }
}

/// Split a token stream into statements on top-level semicolons.
/// Empty statements (consecutive or trailing semicolons) are discarded;
/// order is preserved.
pub fn split_statements(tokens: Vec<Token>) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut current: Vec<Token> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Whitespace | TokenKind::Comment => continue,
            TokenKind::Punctuation if token.text == ";" => {
                if !current.is_empty() {
                    let offset = current[0].offset;
                    statements.push(Statement {
                        tokens: std::mem::take(&mut current),
                        offset,
                    });
                }
            }
            _ => current.push(token),
        }
    }

    if !current.is_empty() {
        let offset = current[0].offset;
        statements.push(Statement {
            tokens: current,
            offset,
        });
    }

    statements
}
