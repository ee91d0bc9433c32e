use crate::*;
use std::ops::Range;

/// A table referenced by the statement, with the alias it was given there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>, alias: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            alias: alias.map(Into::into),
        }
    }

    /// How the statement refers to this table: the alias if it has one.
    pub fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Whether `qualifier` (as typed before a `.`) names this table.
    pub fn answers_to(&self, qualifier: &str) -> bool {
        self.alias
            .as_deref()
            .is_some_and(|a| a.eq_ignore_ascii_case(qualifier))
            || self.name.eq_ignore_ascii_case(qualifier)
    }
}

/// Tables visible from `cursor` inside a single statement's tokens.
///
/// The scope is the innermost parenthesised subquery around the cursor, or the
/// whole statement when there is none. Nested subqueries inside the scope are
/// skipped, so their tables never leak outwards.
pub fn scope_tables(tokens: &[Token], cursor: usize) -> Vec<TableRef> {
    let significant: Vec<&Token> = tokens.iter().filter(|t| !t.is_trivia()).collect();
    let range = scope_range(&significant, cursor);
    trace!("Scope for cursor {cursor} spans significant tokens {range:?}");
    collect_tables(&significant[range])
}

fn scope_range(significant: &[&Token], cursor: usize) -> Range<usize> {
    let mut open = Vec::new();
    for (idx, token) in significant.iter().enumerate() {
        if token.start >= cursor {
            break;
        }
        match token.kind {
            TokenKind::ParenOpen => open.push(idx),
            TokenKind::ParenClose => {
                open.pop();
            }
            _ => {}
        }
    }

    let subquery = open.iter().rev().copied().find(|&idx| {
        significant
            .get(idx + 1)
            .is_some_and(|t| t.is_keyword(Keyword::Select) || t.is_keyword(Keyword::With))
    });
    let Some(paren) = subquery else {
        return 0..significant.len();
    };

    let mut depth = 0isize;
    let close = significant[paren..].iter().position(|t| {
        match t.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => depth -= 1,
            _ => {}
        }
        depth == 0
    });
    paren + 1..close.map_or(significant.len(), |offset| paren + offset)
}

/// Marks every `(` that has a matching `)`. Unclosed parens are what the user
/// is still typing and must not hide the tokens after them.
fn closed_parens(significant: &[&Token]) -> Vec<bool> {
    let mut closed = vec![false; significant.len()];
    let mut open = Vec::new();
    for (idx, token) in significant.iter().enumerate() {
        match token.kind {
            TokenKind::ParenOpen => open.push(idx),
            TokenKind::ParenClose => {
                if let Some(start) = open.pop() {
                    closed[start] = true;
                }
            }
            _ => {}
        }
    }
    closed
}

fn collect_tables(significant: &[&Token]) -> Vec<TableRef> {
    let closed = closed_parens(significant);
    let mut tables = Vec::new();
    let mut depth = 0usize;
    let mut expecting = false;
    let mut table_list = false;
    let mut idx = 0;

    while let Some(token) = significant.get(idx) {
        idx += 1;
        match &token.kind {
            TokenKind::ParenOpen => {
                if closed[idx - 1] {
                    depth += 1;
                }
                expecting = false;
            }
            TokenKind::ParenClose => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            TokenKind::Keyword(keyword) if keyword.role() == ClauseRole::TableTarget => {
                expecting = true;
                table_list = *keyword == Keyword::From;
            }
            TokenKind::Keyword(keyword) if Keyword::TERMINATORS.contains(keyword) => {
                expecting = false;
                table_list = false;
            }
            TokenKind::Comma if table_list => expecting = true,
            TokenKind::Ident(name) if expecting => {
                let (table, next) = table_reference(significant, idx - 1, name);
                if !tables.contains(&table) {
                    tables.push(table);
                }
                idx = next;
                expecting = false;
            }
            _ => {}
        }
    }
    tables
}

/// Read `name[.name...] [[AS] alias]` starting at `at`; returns the reference
/// and the index just past it. Only the last segment of a qualified name is
/// kept.
fn table_reference(significant: &[&Token], at: usize, first: &str) -> (TableRef, usize) {
    let mut name = first;
    let mut last = at;
    while let (Some(dot), Some(part)) = (significant.get(last + 1), significant.get(last + 2)) {
        let Some(part) = part.ident().filter(|_| dot.kind == TokenKind::Dot) else {
            break;
        };
        name = part;
        last += 2;
    }

    let alias_at = if significant
        .get(last + 1)
        .is_some_and(|t| t.is_keyword(Keyword::As))
    {
        last + 2
    } else {
        last + 1
    };
    match significant.get(alias_at).and_then(|t| t.ident()) {
        Some(alias) => (TableRef::new(name, Some(alias)), alias_at + 1),
        None => (TableRef::new(name, None::<&str>), last + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tables(sql: &str, cursor: usize) -> Vec<(String, Option<String>)> {
        scope_tables(&tokenize(sql), cursor)
            .into_iter()
            .map(|t| (t.name, t.alias))
            .collect()
    }

    fn named(pairs: &[(&str, Option<&str>)]) -> Vec<(String, Option<String>)> {
        pairs
            .iter()
            .map(|(n, a)| (n.to_string(), a.map(str::to_string)))
            .collect()
    }

    #[rstest]
    #[case("SELECT * FROM orders", &[("orders", None)])]
    #[case("SELECT * FROM orders o", &[("orders", Some("o"))])]
    #[case("SELECT * FROM orders AS o", &[("orders", Some("o"))])]
    #[case("SELECT * FROM public.orders o", &[("orders", Some("o"))])]
    #[case("SELECT * FROM a, b bb, c AS cc", &[("a", None), ("b", Some("bb")), ("c", Some("cc"))])]
    #[case(
        "SELECT * FROM orders o LEFT OUTER JOIN customers c ON o.customer_id = c.id",
        &[("orders", Some("o")), ("customers", Some("c"))]
    )]
    #[case("SELECT * FROM orders WHERE id = 1", &[("orders", None)])]
    #[case("SELECT * FROM orders o INNER JOIN items", &[("orders", Some("o")), ("items", None)])]
    #[case("UPDATE orders SET total = 0", &[("orders", None)])]
    #[case("INSERT INTO orders (id, total) VALUES (1, 2)", &[("orders", None)])]
    #[case("DELETE FROM orders WHERE id = 1", &[("orders", None)])]
    #[case("SELECT * FROM a JOIN a", &[("a", None)])]
    #[case("SELECT 1", &[])]
    fn extracts_statement_tables(#[case] sql: &str, #[case] expected: &[(&str, Option<&str>)]) {
        assert_eq!(tables(sql, sql.len()), named(expected));
    }

    #[test]
    fn subquery_tables_do_not_leak_outwards() {
        let sql = "SELECT * FROM orders o WHERE o.id IN (SELECT order_id FROM items i) AND ";
        assert_eq!(tables(sql, sql.len()), named(&[("orders", Some("o"))]));
    }

    #[test]
    fn cursor_inside_subquery_sees_inner_scope() {
        let sql = "SELECT * FROM orders o WHERE o.id IN (SELECT  FROM items i)";
        let cursor = sql.find("SELECT  ").map(|p| p + 7).expect("inner select");
        assert_eq!(tables(sql, cursor), named(&[("items", Some("i"))]));
    }

    #[test]
    fn unclosed_subquery_scope_runs_to_end() {
        let sql = "SELECT * FROM orders WHERE id IN (SELECT order_id FROM items WHERE ";
        assert_eq!(tables(sql, sql.len()), named(&[("items", None)]));
    }

    #[test]
    fn function_parens_are_not_scopes() {
        let sql = "SELECT count( FROM orders";
        let cursor = sql.find('(').map(|p| p + 1).expect("paren");
        assert_eq!(tables(sql, cursor), named(&[("orders", None)]));
    }

    #[test]
    fn reference_prefers_alias() {
        let aliased = TableRef::new("orders", Some("o"));
        assert_eq!(aliased.reference(), "o");
        assert!(aliased.answers_to("O"));
        assert!(aliased.answers_to("orders"));
        assert_eq!(TableRef::new("orders", None::<&str>).reference(), "orders");
    }
}
