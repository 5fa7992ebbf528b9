//! Token model for the SQL lexer.

/// The kind of a lexed token.
///
/// `Comment` and `Whitespace` tokens are produced by the lexer so byte
/// offsets stay accurate, but they are dropped before statements reach
/// the table walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    QuotedIdentifier,
    String,
    Number,
    Punctuation,
    Comment,
    Whitespace,
}

/// A single lexed token: kind, raw text, and byte offset into the
/// original script. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

impl Token {
    /// Check whether this token is the given keyword (case-insensitive).
    #[inline]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(word)
    }

    /// Check whether this token is the given punctuation character.
    #[inline]
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punctuation && self.text.chars().eq(std::iter::once(c))
    }

    /// Check whether this token can name a table, alias, or CTE.
    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        )
    }

    /// The identifier this token names, with any surrounding quotes
    /// removed. Quoted identifiers keep their exact inner text, so a
    /// reserved word used as a table name (e.g. `` `from` ``) comes back
    /// literally.
    pub fn name(&self) -> Option<String> {
        match self.kind {
            TokenKind::Identifier => Some(self.text.clone()),
            TokenKind::QuotedIdentifier => Some(unquote(&self.text)),
            _ => None,
        }
    }
}

/// Strip the surrounding quote characters from a quoted identifier and
/// collapse doubled quotes. An unterminated identifier (closed by end of
/// input) has no trailing quote to strip.
fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    let inner = chars.as_str();
    let inner = inner.strip_suffix(quote).unwrap_or(inner);
    let doubled: String = [quote, quote].iter().collect();
    inner.replace(&doubled, &quote.to_string())
}
