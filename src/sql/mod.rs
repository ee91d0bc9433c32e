//! Lenient SQL scanning for a live editor buffer.
//!
//! This module groups the lexical building blocks the statement splitter and
//! the autocomplete engine share, so there is exactly one place that decides
//! whether a byte sits inside a string literal or a comment.
//!
//! Modules:
//! - `keyword`    : Keywords that steer scoping and clause classification.
//! - `token_kind` : Classification of lexical atoms, trivia included.
//! - `token`      : Token struct pairing a `TokenKind` with source byte offsets.
//! - `tokenizer`  : Single pass O(n) scanner producing a gap-free `Vec<Token>`.
//! - `stripped`   : Comment-blanked copy of the buffer plus its offset map.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid SQL (robust for live editing).
//! 2. Preserve original identifier casing for display & lookup.
//! 3. Keep keyword set purposely small; extend only when classification demands.
//! 4. Never shift offsets: every derived buffer shares the original coordinates.
//!
//! NOTE: This is **not** a SQL parser; no AST is ever built.

pub mod keyword;
pub mod stripped;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::{ClauseRole, Keyword};
pub use stripped::{OffsetMap, StrippedView, strip_comments};
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::{is_unterminated, tokenize};

/// Convenience prelude re‑exporting the most commonly used items.
pub mod prelude {
    pub use super::{Keyword, StrippedView, Token, TokenKind, strip_comments, tokenize};
}
