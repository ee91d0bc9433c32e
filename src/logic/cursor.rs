/// A caret position, optionally extended into a selection.
///
/// `start` is where the caret sits; `end`, when present, is the other edge of
/// the selection. Both are UTF-8 byte offsets and may arrive out of range or
/// off a character boundary from the host, so consumers call
/// [`Cursor::clamp`] before slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    start: usize,
    end: Option<usize>,
}

impl Cursor {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    pub fn at(offset: usize) -> Self {
        Self::new(offset, None)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// Ordered `(low, high)` bounds of the selection; both equal the caret when
    /// nothing is selected.
    pub fn bounds(&self) -> (usize, usize) {
        let end = self.end.unwrap_or(self.start);
        (self.start.min(end), self.start.max(end))
    }

    /// Snap both edges into `sql`: past-the-end offsets become `sql.len()` and
    /// offsets inside a multi-byte character move back to its first byte.
    pub fn clamp(self, sql: &str) -> Self {
        Self {
            start: clamp_offset(sql, self.start),
            end: self.end.map(|end| clamp_offset(sql, end)),
        }
    }
}

impl From<usize> for Cursor {
    fn from(offset: usize) -> Self {
        Self::at(offset)
    }
}

/// Clamp a byte offset to the text length and floor it to a char boundary.
pub fn clamp_offset(sql: &str, offset: usize) -> usize {
    let mut offset = offset.min(sql.len());
    while !sql.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_past_the_end() {
        assert_eq!(Cursor::at(99).clamp("SELECT").start(), 6);
    }

    #[test]
    fn floors_inside_multibyte_char() {
        // 'é' occupies bytes 1..3
        let sql = "xé";
        assert_eq!(clamp_offset(sql, 2), 1);
        assert_eq!(clamp_offset(sql, 3), 3);
    }

    #[test]
    fn bounds_are_ordered() {
        assert_eq!(Cursor::new(10, Some(4)).bounds(), (4, 10));
        assert_eq!(Cursor::at(7).bounds(), (7, 7));
    }
}
