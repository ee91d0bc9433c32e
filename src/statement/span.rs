use std::ops::Range;

/// One statement of the buffer, as a half-open byte range of the original text.
///
/// Spans are trimmed: they start at the first and end after the last byte of
/// statement content, so leading comments and the terminating `;` fall into
/// the gaps between spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatementSpan {
    /// Position in the buffer's statement sequence, starting at 0.
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl StatementSpan {
    pub const fn new(index: usize, start: usize, end: usize) -> Self {
        Self { index, start, end }
    }

    pub fn text<'a>(&self, sql: &'a str) -> &'a str {
        &sql[self.start..self.end]
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// NOTE: End is exclusive, so `offset == end` returns false.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub fn statement<'a>(&self, sql: &'a str) -> Statement<'a> {
        Statement {
            span: *self,
            sql: self.text(sql),
        }
    }
}

/// A span paired with its text, as handed to an executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    pub span: StatementSpan,
    pub sql: &'a str,
}

/// Byte ranges between (and around) `spans` in a buffer of `len` bytes.
///
/// Interleaving these with the spans reproduces the buffer exactly; empty
/// gaps are skipped.
pub fn gaps(len: usize, spans: &[StatementSpan]) -> Vec<Range<usize>> {
    let mut out = Vec::with_capacity(spans.len() + 1);
    let mut pos = 0;
    for span in spans {
        if span.start > pos {
            out.push(pos..span.start);
        }
        pos = span.end;
    }
    if pos < len {
        out.push(pos..len);
    }
    out
}
