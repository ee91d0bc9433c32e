//! Token model tying a `TokenKind` to its source span.
//!
//! A `Token` is its classification (`kind`) plus byte offsets (`start`, `end`)
//! into the original SQL string. Offsets let higher-level logic (statement
//! spans, cursor checks) slice the original buffer directly; the stripped view
//! shares the same coordinates.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};

/// A lexical token with its inclusive start and exclusive end byte offsets.
///
/// Invariants:
/// - `end >= start`
/// - `[start, end)` is a valid slice range for the original input
/// - consecutive tokens from the scanner satisfy `prev.end == next.start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// Construct a new token.
    pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Byte length of this token (`end - start`).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True if the token's length is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source text of this token.
    pub fn text<'a>(&self, sql: &'a str) -> &'a str {
        &sql[self.start..self.end]
    }

    /// Returns the identifier text if this token is an identifier.
    pub fn ident(&self) -> Option<&str> {
        self.kind.ident()
    }

    /// Returns true if this token represents a given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// True if the cursor sits strictly between the first and last byte, i.e.
    /// typing there would edit the token's interior.
    pub fn surrounds(&self, cursor: usize) -> bool {
        cursor > self.start && cursor < self.end
    }

    /// Convenience: convert to a `(start, end)` tuple.
    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}
