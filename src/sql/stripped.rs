//! Comment-stripped view of a SQL buffer.
//!
//! Comment bytes are overwritten with spaces in place, newlines excepted, so
//! the view has the same byte length and line structure as the text in the
//! editor. Offsets therefore translate one-to-one between the two buffers; the
//! view never shrinks.
use crate::sql::{token::Token, token_kind::TokenKind};

/// Correspondence between original-text offsets and stripped-view offsets.
///
/// Stripping never deletes bytes, so this is the identity clamped to the
/// buffer length. It exists so call sites state which coordinate space an
/// offset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetMap {
    len: usize,
}

impl OffsetMap {
    pub const fn identity(len: usize) -> Self {
        Self { len }
    }

    pub const fn to_stripped(&self, original: usize) -> usize {
        if original < self.len { original } else { self.len }
    }

    pub const fn to_original(&self, stripped: usize) -> usize {
        if stripped < self.len { stripped } else { self.len }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedView {
    pub text: String,
    pub map: OffsetMap,
}

impl StrippedView {
    /// True when `[start, end)` of the view holds nothing but whitespace
    /// (blanked comments included).
    pub fn is_blank(&self, start: usize, end: usize) -> bool {
        self.trim(start, end).is_none()
    }

    /// Narrow `[start, end)` to its first and last non-whitespace byte.
    /// Returns `None` when the range is blank.
    pub fn trim(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let slice = &self.text[start..end];
        let trimmed = slice.trim();
        if trimmed.is_empty() {
            return None;
        }
        let first = start + (slice.len() - slice.trim_start().len());
        Some((first, first + trimmed.len()))
    }
}

/// Build the stripped view from the scanner's tokens over `sql`.
pub fn strip_comments(sql: &str, tokens: &[Token]) -> StrippedView {
    let mut bytes = sql.as_bytes().to_vec();
    for token in tokens.iter().filter(|t| t.kind == TokenKind::Comment) {
        for b in &mut bytes[token.start..token.end] {
            if *b != b'\n' && *b != b'\r' {
                *b = b' ';
            }
        }
    }
    // Every byte of a comment (multi-byte chars included) became ASCII; the
    // rest is untouched UTF-8.
    let text = String::from_utf8(bytes).unwrap_or_else(|err| {
        String::from_utf8_lossy(err.as_bytes()).into_owned()
    });
    StrippedView {
        map: OffsetMap::identity(text.len()),
        text,
    }
}
