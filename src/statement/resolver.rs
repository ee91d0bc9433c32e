use crate::*;

/// Find the statement a cursor belongs to.
///
/// Policy for positions outside every span:
/// - Up to and on the terminating `;`, including comments trimmed off before
///   it, and in whitespace right after it, the cursor belongs to the
///   statement just finished.
/// - Inside or after a comment that follows the terminator, or before the
///   first statement, it belongs to the next statement.
/// - Past the last statement behind such a comment, or with no statements at
///   all, nothing is under the cursor.
///
/// `cursor` is clamped into `sql` first.
pub fn resolve<'s>(
    sql: &str,
    spans: &'s [StatementSpan],
    cursor: usize,
) -> Option<&'s StatementSpan> {
    let cursor = clamp_offset(sql, cursor);
    // spans[..next] all end at or before the cursor
    let next = spans.partition_point(|s| s.end <= cursor);

    if let Some(span) = spans.get(next).filter(|s| s.start <= cursor) {
        trace!("Cursor {cursor} inside statement {}", span.index);
        return Some(span);
    }

    let preceding = next.checked_sub(1).and_then(|i| spans.get(i));
    if let Some(prev) = preceding.filter(|prev| just_after(sql, prev.end, cursor)) {
        trace!("Cursor {cursor} trails statement {}", prev.index);
        return Some(prev);
    }

    let following = spans.get(next);
    trace!(
        "Cursor {cursor} in gap, attributed to {:?}",
        following.map(|s| s.index)
    );
    following
}

/// Between `end` and `cursor` lie only whitespace, terminators, and comments
/// that still precede the first terminator.
fn just_after(sql: &str, end: usize, cursor: usize) -> bool {
    let mut terminated = false;
    tokenize(&sql[end..])
        .iter()
        .take_while(|t| end + t.start < cursor)
        .all(|t| match t.kind {
            TokenKind::Semicolon => {
                terminated = true;
                true
            }
            TokenKind::Comment => !terminated,
            TokenKind::Whitespace => true,
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn resolved(sql: &str, cursor: usize) -> Option<&str> {
        let spans = split(sql);
        resolve(sql, &spans, cursor).map(|s| s.text(sql))
    }

    #[test]
    fn boundary_semicolon_belongs_to_preceding() {
        let sql = "A; B;";
        let semicolon = sql.find(';').expect("terminator");
        assert_eq!(resolved(sql, semicolon), Some("A"));
    }

    #[rstest]
    // inside spans
    #[case("SELECT 1; SELECT 2", 0, Some("SELECT 1"))]
    #[case("SELECT 1; SELECT 2", 4, Some("SELECT 1"))]
    #[case("SELECT 1; SELECT 2", 10, Some("SELECT 2"))]
    // end of span and trailing whitespace
    #[case("SELECT 1; SELECT 2", 8, Some("SELECT 1"))]
    #[case("SELECT 1; SELECT 2", 9, Some("SELECT 1"))]
    #[case("SELECT 1;   \n SELECT 2", 12, Some("SELECT 1"))]
    #[case("SELECT 1; SELECT 2", 18, Some("SELECT 2"))]
    #[case("SELECT 1;\n\n", 11, Some("SELECT 1"))]
    // leading whitespace and comments go forward
    #[case("   SELECT 1", 1, Some("SELECT 1"))]
    #[case("-- intro\nSELECT 1", 3, Some("SELECT 1"))]
    #[case("SELECT 1; -- next\nSELECT 2", 12, Some("SELECT 2"))]
    #[case("SELECT 1; /* x */ SELECT 2", 17, Some("SELECT 2"))]
    // start of a comment right after the terminator still trails
    #[case("SELECT 1; -- next\nSELECT 2", 10, Some("SELECT 1"))]
    // nothing follows a trailing comment
    #[case("SELECT 1; -- done", 14, None)]
    // comments trimmed off before the terminator stay with the statement
    #[case("SELECT 1 -- comment ; more\n; SELECT 2", 27, Some("SELECT 1"))]
    #[case("SELECT 1 -- comment ; more\n; SELECT 2", 28, Some("SELECT 1"))]
    #[case("SELECT 1 -- comment ; more\n; SELECT 2", 10, Some("SELECT 1"))]
    #[case("SELECT 1 -- comment ; more\n; SELECT 2", 14, Some("SELECT 1"))]
    #[case("SELECT 1 /* note */;", 19, Some("SELECT 1"))]
    #[case("SELECT 1 /* note */;", 20, Some("SELECT 1"))]
    #[case("SELECT 1 /* a */ /* b */ ; SELECT 2", 25, Some("SELECT 1"))]
    // out of range cursor is clamped
    #[case("SELECT 1", 999, Some("SELECT 1"))]
    fn resolves_cursor(
        #[case] sql: &str,
        #[case] cursor: usize,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(resolved(sql, cursor), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("-- only comments\n/* here */")]
    fn blank_buffers_resolve_to_nothing(#[case] sql: &str) {
        assert_eq!(resolved(sql, 0), None);
        assert_eq!(resolved(sql, sql.len()), None);
    }
}
