use crate::*;

/// The syntactic slot the cursor sits in, which decides what kind of
/// candidate makes sense there.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ClauseContext {
    #[display("select list")]
    SelectList,
    /// Table position after FROM, JOIN, UPDATE or INTO. `partial` is the
    /// identifier typed so far; `join` is set right after a JOIN.
    #[display("table target ({partial:?}, join: {join})")]
    FromOrJoin { partial: String, join: bool },
    #[display("where clause")]
    WhereClause,
    #[display("join condition")]
    OnClause,
    #[display("order/group by")]
    OrderOrGroupBy,
    /// Directly inside the argument list of `function(`.
    #[display("arguments of {function}")]
    FunctionArgs { function: String },
    /// Right after `qualifier.`, where only that table's columns fit.
    #[display("after {qualifier}.")]
    AfterTableDot { qualifier: String },
    #[display("inside literal")]
    InsideLiteral,
    #[display("unclassified")]
    Unclassified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorContext {
    pub clause: ClauseContext,
    /// Tables visible from the cursor's query level, in statement order.
    pub tables: Vec<TableRef>,
    /// The identifier fragment immediately before the cursor.
    pub prefix: String,
}

impl CursorContext {
    pub fn new(clause: ClauseContext) -> Self {
        Self {
            clause,
            tables: vec![],
            prefix: String::new(),
        }
    }
}

/// Classify the cursor using the configured scan window.
pub fn classify(sql: &str, tokens: &[Token], cursor: usize) -> CursorContext {
    classify_within(sql, tokens, cursor, config().scan_window)
}

/// Classify `cursor` against `tokens`, the tokens of the statement it belongs
/// to (the whole buffer's tokens work too, at the cost of a larger scope).
///
/// Priority: inside a literal or comment, then `qualifier.`, then a function
/// argument list, then the nearest clause keyword at the cursor's nesting
/// level. The walk back looks at no more than `scan_window` significant
/// tokens; a cursor further than that from any clause keyword is
/// [`ClauseContext::Unclassified`].
pub fn classify_within(
    sql: &str,
    tokens: &[Token],
    cursor: usize,
    scan_window: usize,
) -> CursorContext {
    let cursor = clamp_offset(sql, cursor);
    if in_literal(sql, tokens, cursor) {
        trace!("Cursor {cursor} is inside a literal or comment");
        return CursorContext::new(ClauseContext::InsideLiteral);
    }

    let typed = tokens
        .iter()
        .filter(|t| t.start < cursor && cursor <= t.end)
        .find_map(|t| fragment_start(sql, t).map(|from| (t.start, from)));
    let prefix = typed.map_or_else(String::new, |(_, from)| sql[from..cursor].to_string());
    let walk_end = typed.map_or(cursor, |(start, _)| start);
    let before: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.end <= walk_end && !t.is_trivia())
        .collect();

    let clause = after_table_dot(&before)
        .or_else(|| function_args(&before, scan_window))
        .unwrap_or_else(|| nearest_clause(&before, &prefix, scan_window));
    let tables = scope_tables(tokens, cursor);
    debug!(
        "Cursor {cursor}: {clause}, prefix {prefix:?}, {} table(s) in scope",
        tables.len()
    );

    CursorContext {
        clause,
        tables,
        prefix,
    }
}

/// True when `cursor` sits strictly inside a string literal or a comment. The
/// end of a token that is still open counts as inside, so typing at the end of
/// `-- note` or `'abc` stays in the literal.
pub fn in_literal(sql: &str, tokens: &[Token], cursor: usize) -> bool {
    tokens.iter().filter(|t| t.kind.is_opaque()).any(|t| {
        t.surrounds(cursor) || (cursor == t.end && cursor > t.start && is_unterminated(sql, t))
    })
}

/// Where the completable fragment of `token` begins. Bare identifiers and
/// keywords complete from their first byte, a quoted identifier still being
/// typed from just past its opening quote. Closed quoted identifiers are not
/// completed.
fn fragment_start(sql: &str, token: &Token) -> Option<usize> {
    match token.kind {
        TokenKind::Keyword(_) => Some(token.start),
        TokenKind::Ident(_) if !token.text(sql).starts_with('"') => Some(token.start),
        TokenKind::Ident(_) if is_unterminated(sql, token) => Some(token.start + 1),
        _ => None,
    }
}

fn after_table_dot(before: &[&Token]) -> Option<ClauseContext> {
    match before {
        [.., qualifier, dot] if dot.kind == TokenKind::Dot => {
            qualifier.ident().map(|q| ClauseContext::AfterTableDot {
                qualifier: q.to_string(),
            })
        }
        _ => None,
    }
}

/// The innermost unclosed `(` before the cursor, when an identifier names it.
fn function_args(before: &[&Token], scan_window: usize) -> Option<ClauseContext> {
    let mut depth = 0usize;
    for (idx, token) in before.iter().enumerate().rev().take(scan_window) {
        match token.kind {
            TokenKind::ParenClose => depth += 1,
            TokenKind::ParenOpen if depth == 0 => {
                let name = idx.checked_sub(1).and_then(|i| before[i].ident())?;
                return Some(ClauseContext::FunctionArgs {
                    function: name.to_string(),
                });
            }
            TokenKind::ParenOpen => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Walk back to the closest clause keyword at the cursor's nesting level.
///
/// Closed parenthesised groups are skipped whole; an unmatched `(` is stepped
/// out of, so a cursor at the start of a subquery still sees the outer clause.
fn nearest_clause(before: &[&Token], prefix: &str, scan_window: usize) -> ClauseContext {
    let mut depth = 0usize;
    let mut conjunction = false;

    for (seen, token) in before.iter().rev().enumerate() {
        if seen >= scan_window {
            trace!("No clause keyword within {scan_window} tokens");
            return ClauseContext::Unclassified;
        }
        match token.kind {
            TokenKind::ParenClose => depth += 1,
            TokenKind::ParenOpen => depth = depth.saturating_sub(1),
            TokenKind::Keyword(keyword) if depth == 0 => match keyword.role() {
                ClauseRole::Projection => return ClauseContext::SelectList,
                ClauseRole::TableTarget => {
                    return ClauseContext::FromOrJoin {
                        partial: prefix.to_string(),
                        join: keyword == Keyword::Join,
                    };
                }
                ClauseRole::Filter => return ClauseContext::WhereClause,
                ClauseRole::JoinPredicate => return ClauseContext::OnClause,
                ClauseRole::Ordering => return ClauseContext::OrderOrGroupBy,
                ClauseRole::Boundary => return ClauseContext::Unclassified,
                ClauseRole::Conjunction => conjunction = true,
                ClauseRole::Neutral => {}
            },
            _ => {}
        }
    }

    if conjunction {
        ClauseContext::WhereClause
    } else {
        ClauseContext::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at_end(sql: &str) -> CursorContext {
        classify(sql, &tokenize(sql), sql.len())
    }

    fn from_or_join(partial: &str, join: bool) -> ClauseContext {
        ClauseContext::FromOrJoin {
            partial: partial.to_string(),
            join,
        }
    }

    #[rstest]
    #[case("SELECT id, na", ClauseContext::SelectList, "na")]
    #[case("SELECT ", ClauseContext::SelectList, "")]
    #[case("SELECT DISTINCT ", ClauseContext::SelectList, "")]
    #[case("SELECT * FROM ", from_or_join("", false), "")]
    #[case("SELECT * FROM ord", from_or_join("ord", false), "ord")]
    #[case("SELECT * FROM orders o JOIN cu", from_or_join("cu", true), "cu")]
    #[case("SELECT * FROM orders o LEFT JOIN ", from_or_join("", true), "")]
    #[case("UPDATE ", from_or_join("", false), "")]
    #[case("SELECT * FROM orders WHERE ", ClauseContext::WhereClause, "")]
    #[case("SELECT * FROM orders WHERE total > 3 AND ", ClauseContext::WhereClause, "")]
    #[case("SELECT * FROM orders GROUP BY status HAVING ", ClauseContext::WhereClause, "")]
    #[case("SELECT * FROM a JOIN b ON ", ClauseContext::OnClause, "")]
    #[case("SELECT * FROM a JOIN b ON a.id = b.a_id AND ", ClauseContext::OnClause, "")]
    #[case("SELECT * FROM orders ORDER BY ", ClauseContext::OrderOrGroupBy, "")]
    #[case("SELECT * FROM orders GROUP BY st", ClauseContext::OrderOrGroupBy, "st")]
    #[case("SELECT * FROM orders LIMIT ", ClauseContext::Unclassified, "")]
    #[case("", ClauseContext::Unclassified, "")]
    #[case("sel", ClauseContext::Unclassified, "sel")]
    #[case("SELECT 'abc", ClauseContext::InsideLiteral, "")]
    #[case("SELECT 1 -- note", ClauseContext::InsideLiteral, "")]
    fn classifies_clause(
        #[case] sql: &str,
        #[case] clause: ClauseContext,
        #[case] prefix: &str,
    ) {
        let ctx = at_end(sql);
        assert_eq!(ctx.clause, clause, "{sql:?}");
        assert_eq!(ctx.prefix, prefix, "{sql:?}");
    }

    #[test]
    fn qualifier_dot_wins_over_clause() {
        let sql = "SELECT * FROM orders o JOIN customers c ON o.";
        let ctx = at_end(sql);
        assert_eq!(
            ctx.clause,
            ClauseContext::AfterTableDot {
                qualifier: "o".into()
            }
        );
        assert_eq!(ctx.prefix, "");
        assert_eq!(ctx.tables.len(), 2);
    }

    #[test]
    fn qualifier_dot_with_partial_column() {
        let ctx = at_end("SELECT c.na");
        assert_eq!(
            ctx.clause,
            ClauseContext::AfterTableDot {
                qualifier: "c".into()
            }
        );
        assert_eq!(ctx.prefix, "na");
    }

    #[rstest]
    #[case("SELECT count(", "count")]
    #[case("SELECT coalesce(a, ", "coalesce")]
    #[case("SELECT max(abs(x), ", "max")]
    #[case("SELECT * FROM t WHERE lower(na", "lower")]
    fn function_argument_lists(#[case] sql: &str, #[case] function: &str) {
        assert_eq!(
            at_end(sql).clause,
            ClauseContext::FunctionArgs {
                function: function.into()
            }
        );
    }

    #[test]
    fn qualifier_dot_wins_over_function_args() {
        assert_eq!(
            at_end("SELECT count(o.").clause,
            ClauseContext::AfterTableDot {
                qualifier: "o".into()
            }
        );
    }

    #[rstest]
    #[case("SELECT * FROM orders WHERE \"na", ClauseContext::WhereClause, "na")]
    #[case("SELECT * FROM \"ord", from_or_join("ord", false), "ord")]
    #[case("SELECT \"", ClauseContext::SelectList, "")]
    #[case("SELECT \"na\"", ClauseContext::SelectList, "")]
    fn open_quoted_identifier_keeps_typed_text(
        #[case] sql: &str,
        #[case] clause: ClauseContext,
        #[case] prefix: &str,
    ) {
        let ctx = at_end(sql);
        assert_eq!(ctx.clause, clause, "{sql:?}");
        assert_eq!(ctx.prefix, prefix, "{sql:?}");
    }

    #[test]
    fn closed_groups_are_skipped() {
        let sql = "SELECT * FROM t WHERE x IN (SELECT y FROM u ORDER BY y) AND ";
        assert_eq!(at_end(sql).clause, ClauseContext::WhereClause);
    }

    #[test]
    fn unmatched_paren_is_stepped_out_of() {
        let sql = "SELECT * FROM t WHERE (a = 1 OR ";
        assert_eq!(at_end(sql).clause, ClauseContext::WhereClause);
    }

    #[test]
    fn subquery_select_is_classified_inside() {
        let sql = "SELECT * FROM t WHERE x IN (SELECT ";
        assert_eq!(at_end(sql).clause, ClauseContext::SelectList);
    }

    #[test]
    fn cursor_in_middle_of_word_uses_left_part() {
        let sql = "SELECT name FROM t";
        let ctx = classify(sql, &tokenize(sql), 9);
        assert_eq!(ctx.clause, ClauseContext::SelectList);
        assert_eq!(ctx.prefix, "na");
    }

    #[test]
    fn cursor_inside_closed_string_is_literal() {
        let sql = "SELECT * FROM t WHERE name = 'bob'";
        let cursor = sql.len() - 2;
        let ctx = classify(sql, &tokenize(sql), cursor);
        assert_eq!(ctx.clause, ClauseContext::InsideLiteral);
    }

    #[test]
    fn after_closed_string_is_not_literal() {
        let sql = "SELECT * FROM t WHERE name = 'bob' ";
        assert_eq!(at_end(sql).clause, ClauseContext::WhereClause);
    }

    #[test]
    fn out_of_range_cursor_is_clamped() {
        let sql = "SELECT ";
        let ctx = classify(sql, &tokenize(sql), 999);
        assert_eq!(ctx.clause, ClauseContext::SelectList);
    }

    #[test]
    fn walk_is_bounded_by_scan_window() {
        let mut sql = String::from("SELECT ");
        for i in 0..50 {
            sql.push_str(&format!("c{i}, "));
        }
        let tokens = tokenize(&sql);
        assert_eq!(
            classify_within(&sql, &tokens, sql.len(), 10).clause,
            ClauseContext::Unclassified
        );
        assert_eq!(
            classify_within(&sql, &tokens, sql.len(), 500).clause,
            ClauseContext::SelectList
        );
    }

    #[test]
    fn display_reads_naturally() {
        assert_eq!(ClauseContext::SelectList.to_string(), "select list");
        assert_eq!(
            ClauseContext::AfterTableDot {
                qualifier: "o".into()
            }
            .to_string(),
            "after o."
        );
    }
}
