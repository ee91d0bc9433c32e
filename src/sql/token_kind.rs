//! Token kind definitions for the SQL scanner.
//!
//! Each `TokenKind` variant represents a lexical atom discovered during the
//! lenient scanning phase. Whitespace and comments are kinds of their own so
//! the token stream covers the buffer without gaps.
//!
//! Design goals:
//! - Preserve original identifier casing via `Ident(String)` for downstream
//!   display and matching; quoted identifiers carry their unescaped name.
//! - Keep structural punctuation explicit (comma, dot, parens, semicolon) as
//!   that is all statement splitting and clause classification look at.
//! - Provide ergonomic helpers (`is_keyword`, `ident`, `is_trivia`) to avoid
//!   verbose pattern matches at call sites.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Table / alias / column / function name, bare or double-quoted.
    Ident(String),
    /// Recognized SQL keyword.
    Keyword(Keyword),
    /// Numeric literal.
    Number,
    /// Single-quoted string literal, quotes included in the span.
    StringLiteral,
    /// Run of operator characters (`=`, `<>`, `||`, `::`, ...).
    Operator,
    Comma,
    Dot,
    ParenOpen,
    ParenClose,
    /// Statement terminator `;`.
    Semicolon,
    /// `-- line` or `/* block */` comment.
    Comment,
    Whitespace,
    /// Any other character we do not specially classify.
    Other(char),
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    /// Returns the identifier text if this token is an `Ident`.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whitespace and comments: tokens that never carry statement content.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Tokens whose interior is opaque text (comments and string literals).
    pub fn is_opaque(&self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::StringLiteral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::keyword::Keyword;

    #[test]
    fn keyword_detection() {
        let tk = TokenKind::Keyword(Keyword::Select);
        assert!(tk.is_keyword(Keyword::Select));
        assert!(!tk.is_keyword(Keyword::From));
        assert_eq!(tk.keyword(), Some(Keyword::Select));
        assert!(tk.ident().is_none());
    }

    #[test]
    fn ident_access() {
        let tk = TokenKind::Ident("MyTable".into());
        assert_eq!(tk.ident(), Some("MyTable"));
        assert!(tk.keyword().is_none());
    }

    #[test]
    fn trivia_and_opaque() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::StringLiteral.is_trivia());
        assert!(TokenKind::StringLiteral.is_opaque());
        assert!(TokenKind::Comment.is_opaque());
        assert!(!TokenKind::Other('@').is_opaque());
    }
}
