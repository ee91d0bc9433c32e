use crate::*;
use std::ops::Range;

/// Candidates ending in one of these are inserted without a trailing space.
const NO_SPACE_AFTER: [char; 5] = ['(', ')', ',', ';', '.'];

/// Replace `range` of the buffer with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub text: String,
}

impl TextEdit {
    pub fn apply(&self, sql: &str) -> String {
        let mut out = String::with_capacity(sql.len() - self.range.len() + self.text.len());
        out.push_str(&sql[..self.range.start]);
        out.push_str(&self.text);
        out.push_str(&sql[self.range.end..]);
        out
    }

    /// Where the caret lands once the edit is applied.
    pub fn cursor_after(&self) -> usize {
        self.range.start + self.text.len()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// The identifier fragment ending at `cursor` and its start offset.
pub fn word_before_cursor(sql: &str, cursor: usize) -> (usize, &str) {
    let cursor = clamp_offset(sql, cursor);
    let start = sql[..cursor]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map_or(cursor, |(i, _)| i);
    (start, &sql[start..cursor])
}

/// The edit that accepts `candidate` at `cursor`: the fragment before the
/// cursor is replaced, and a space follows unless the candidate ends in
/// punctuation or it was accepted with Tab.
pub fn completion_edit(sql: &str, cursor: usize, candidate: &str, via_tab: bool) -> TextEdit {
    let cursor = clamp_offset(sql, cursor);
    let (start, _) = word_before_cursor(sql, cursor);
    let bare = candidate.ends_with(NO_SPACE_AFTER) || via_tab;
    let text = if bare {
        candidate.to_string()
    } else {
        format!("{candidate} ")
    };
    trace!("Completing {:?} with {text:?}", &sql[start..cursor]);
    TextEdit {
        range: start..cursor,
        text,
    }
}
