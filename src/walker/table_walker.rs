//! Keyword-driven table reference extraction.
//!
//! The walker performs a structural scan of one statement's token
//! stream, driven by the clause keywords that can introduce a table
//! reference (`FROM`, `JOIN`, `INTO`, `OVERWRITE TABLE`, `UPDATE`,
//! `USING`, and the created name of `CREATE TABLE ... AS` /
//! `CREATE VIEW ... AS`). Candidates are resolved against the active
//! scope chain so CTE names and aliases are never reported as tables,
//! while every parenthesized group is walked recursively in a child
//! scope so subqueries anywhere in the statement contribute their
//! tables without leaking their local names.
//!
//! The scan is tolerant by construction: tokens it does not understand
//! are stepped over, and a candidate whose context runs out before it
//! can be classified is reported anyway. Over-reporting a name is
//! preferred to silently dropping a real dependency.

use crate::lexer::Token;
use crate::statement::Statement;

use super::scope::{Binding, NameScope};

/// How an occurrence of a table-like name was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A genuine base table, read or written.
    Source,
    /// A name defined by a `WITH` clause.
    CteDefinition,
    /// An alias bound to a table or subquery.
    AliasDefinition,
    /// A candidate whose context was exhausted before it could be
    /// classified; reported alongside sources.
    Unresolved,
}

/// One classified occurrence of a table-like name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    /// Dotted name chain; `db.table` keeps both parts.
    pub parts: Vec<String>,
    /// Byte offset of the first name token in the original script.
    pub offset: usize,
    pub classification: Classification,
}

impl TableReference {
    pub fn qualified_name(&self) -> String {
        self.parts.join(".")
    }

    /// Whether this reference counts toward the extracted result set.
    pub fn is_source(&self) -> bool {
        matches!(
            self.classification,
            Classification::Source | Classification::Unresolved
        )
    }
}

/// Walk one statement and classify every table-like name in it.
pub fn collect_table_references(statement: &Statement) -> Vec<TableReference> {
    let mut refs = Vec::new();
    let mut scope = NameScope::root();
    TableWalker::new(&statement.tokens).run(&mut scope, &mut refs);
    refs
}

/// Walk a nested token range in a fresh child scope. Source references
/// found inside propagate to the shared sink; bindings do not leak out.
fn walk_tokens(tokens: &[Token], parent: &NameScope<'_>, refs: &mut Vec<TableReference>) {
    let mut scope = NameScope::child(parent);
    TableWalker::new(tokens).run(&mut scope, refs);
}

/// Token cursor for one scope level of the scan.
struct TableWalker<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// The created name of a `CREATE TABLE`/`CREATE VIEW` statement,
    /// held back until a top-level `AS <query>` confirms the statement
    /// actually writes it from a query. Plain DDL emits nothing.
    pending_create: Option<TableReference>,
}

impl<'a> TableWalker<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            pending_create: None,
        }
    }

    fn run(&mut self, scope: &mut NameScope<'_>, refs: &mut Vec<TableReference>) {
        while !self.is_at_end() {
            if self.check_keyword("WITH") {
                self.advance();
                self.parse_with_clause(scope, refs);
            } else if self.check_keyword("FROM") {
                self.advance();
                self.parse_table_list(scope, refs);
            } else if self.check_keyword("JOIN") || self.check_keyword("USING") {
                self.advance();
                self.parse_table_factor(scope, refs);
            } else if self.check_keyword("INTO") {
                self.advance();
                if self.check_keyword("TABLE") {
                    self.advance();
                }
                self.parse_table_factor(scope, refs);
            } else if self.check_keyword("OVERWRITE") && self.peek_is_keyword(1, "TABLE") {
                self.advance();
                self.advance();
                self.parse_table_factor(scope, refs);
            } else if self.pos == 0 && self.check_keyword("UPDATE") {
                self.advance();
                self.parse_table_factor(scope, refs);
            } else if self.pos == 0 && self.check_keyword("CREATE") {
                self.parse_create_target();
            } else if self.check_keyword("AS") {
                self.advance();
                if self.pending_create.is_some() && self.starts_query() {
                    refs.extend(self.pending_create.take());
                }
            } else if self.check_punct('(') {
                let range = self.parenthesized_range();
                walk_tokens(&self.tokens[range], scope, refs);
            } else {
                self.advance();
            }
        }
    }

    /// Parse `name [ (columns) ] AS ( body ), ...` after a `WITH`.
    ///
    /// Each name is bound before its body is walked so recursive CTEs
    /// and references to earlier CTEs resolve. Bodies run in a child
    /// scope of the statement.
    fn parse_with_clause(&mut self, scope: &mut NameScope<'_>, refs: &mut Vec<TableReference>) {
        if self.check_keyword("RECURSIVE") {
            self.advance();
        }
        loop {
            let Some(name) = self.current_name() else {
                return;
            };
            let offset = self.current_offset();
            self.advance();
            scope.bind(&name, Binding::Cte);
            refs.push(TableReference {
                parts: vec![name],
                offset,
                classification: Classification::CteDefinition,
            });

            // Declared column list, when present. Walked like any group
            // so a malformed clause still surrenders its tables.
            if self.check_punct('(') {
                let range = self.parenthesized_range();
                walk_tokens(&self.tokens[range], scope, refs);
            }
            if self.check_keyword("AS") {
                self.advance();
            }
            if self.check_punct('(') {
                let range = self.parenthesized_range();
                walk_tokens(&self.tokens[range], scope, refs);
            }

            if self.check_punct(',') {
                self.advance();
            } else {
                return;
            }
        }
    }

    /// Capture the created name of `CREATE [EXTERNAL|TEMPORARY|OR
    /// REPLACE] TABLE|VIEW [IF NOT EXISTS] <name>` as pending. Other
    /// CREATE forms capture nothing.
    fn parse_create_target(&mut self) {
        self.advance();
        while self.check_keyword("OR")
            || self.check_keyword("REPLACE")
            || self.check_keyword("TEMPORARY")
            || self.check_keyword("EXTERNAL")
        {
            self.advance();
        }
        if !self.check_keyword("TABLE") && !self.check_keyword("VIEW") {
            return;
        }
        self.advance();
        if self.check_keyword("IF") {
            self.advance();
            if self.check_keyword("NOT") {
                self.advance();
            }
            if self.check_keyword("EXISTS") {
                self.advance();
            }
        }
        if !self.current_is_name() {
            return;
        }
        let (parts, offset, _) = self.parse_qualified_name();
        self.pending_create = Some(TableReference {
            parts,
            offset,
            classification: Classification::Source,
        });
    }

    /// Parse the comma-separated table factors after `FROM`.
    fn parse_table_list(&mut self, scope: &mut NameScope<'_>, refs: &mut Vec<TableReference>) {
        if !self.parse_table_factor(scope, refs) {
            return;
        }
        while self.check_punct(',') {
            self.advance();
            if !self.parse_table_factor(scope, refs) {
                return;
            }
        }
    }

    /// Parse a single table factor: a parenthesized subquery, a
    /// function call, or a (possibly qualified) table name, each with an
    /// optional trailing alias. Returns false when no factor starts at
    /// the current position.
    fn parse_table_factor(&mut self, scope: &mut NameScope<'_>, refs: &mut Vec<TableReference>) -> bool {
        if self.check_punct('(') {
            let range = self.parenthesized_range();
            walk_tokens(&self.tokens[range], scope, refs);
            self.bind_alias_if_present(scope, refs);
            return true;
        }
        if !self.current_is_name() {
            return false;
        }
        let (parts, offset, complete) = self.parse_qualified_name();

        // A name directly followed by `(` is a function call or
        // table-generating expression, not a table. Its arguments are
        // still walked for embedded subqueries.
        if self.check_punct('(') {
            let range = self.parenthesized_range();
            walk_tokens(&self.tokens[range], scope, refs);
            self.bind_alias_if_present(scope, refs);
            return true;
        }

        let shadowed = parts.len() == 1 && scope.resolve(&parts[0]).is_some();
        if !shadowed {
            let classification = if complete {
                Classification::Source
            } else {
                Classification::Unresolved
            };
            refs.push(TableReference {
                parts,
                offset,
                classification,
            });
        }
        self.bind_alias_if_present(scope, refs);
        true
    }

    /// Parse `ident (. ident)*`. The completeness flag is false when the
    /// chain is cut off by end of input (a trailing dot with nothing
    /// after it).
    fn parse_qualified_name(&mut self) -> (Vec<String>, usize, bool) {
        let offset = self.current_offset();
        let mut parts = Vec::new();
        if let Some(name) = self.current_name() {
            parts.push(name);
            self.advance();
        }
        let mut complete = true;
        while self.check_punct('.') {
            self.advance();
            match self.current_name() {
                Some(name) => {
                    parts.push(name);
                    self.advance();
                }
                None => {
                    complete = false;
                    break;
                }
            }
        }
        (parts, offset, complete)
    }

    /// Bind `AS <ident>` or a bare trailing identifier as an alias in
    /// the current scope.
    fn bind_alias_if_present(&mut self, scope: &mut NameScope<'_>, refs: &mut Vec<TableReference>) {
        if self.check_keyword("AS") {
            self.advance();
        }
        let Some(alias) = self.current_name() else {
            return;
        };
        let offset = self.current_offset();
        self.advance();
        scope.bind(&alias, Binding::Alias);
        refs.push(TableReference {
            parts: vec![alias],
            offset,
            classification: Classification::AliasDefinition,
        });
    }

    /// Consume a parenthesized group, returning the token range between
    /// the outer parentheses. Ends past the closing parenthesis; an
    /// unbalanced group runs to the end of the statement.
    fn parenthesized_range(&mut self) -> std::ops::Range<usize> {
        let start = self.pos + 1;
        let mut depth = 0i32;
        while !self.is_at_end() {
            if self.check_punct('(') {
                depth += 1;
            } else if self.check_punct(')') {
                depth -= 1;
                if depth == 0 {
                    let end = self.pos;
                    self.advance();
                    return start..end;
                }
            }
            self.advance();
        }
        start.min(self.tokens.len())..self.tokens.len()
    }

    fn starts_query(&self) -> bool {
        self.current()
            .is_some_and(|t| t.is_keyword("SELECT") || t.is_keyword("WITH") || t.is_punct('('))
    }

    // === Cursor helpers ===

    #[inline]
    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    #[inline]
    fn check_keyword(&self, word: &str) -> bool {
        self.current().is_some_and(|t| t.is_keyword(word))
    }

    #[inline]
    fn peek_is_keyword(&self, offset: usize, word: &str) -> bool {
        self.tokens
            .get(self.pos + offset)
            .is_some_and(|t| t.is_keyword(word))
    }

    #[inline]
    fn check_punct(&self, c: char) -> bool {
        self.current().is_some_and(|t| t.is_punct(c))
    }

    #[inline]
    fn current_is_name(&self) -> bool {
        self.current().is_some_and(Token::is_name)
    }

    fn current_name(&self) -> Option<String> {
        self.current().and_then(Token::name)
    }

    fn current_offset(&self) -> usize {
        self.current().map(|t| t.offset).unwrap_or_default()
    }
}
