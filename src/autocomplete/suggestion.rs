use crate::*;
use itertools::Itertools;
use std::fmt;

/// An autocomplete suggestion. Variants represent the different kinds of
/// things that can be offered while the user types: keywords, functions,
/// operators, columns and tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suggestion {
    Star,
    Keyword(String),
    Function(String),
    Operator(String),
    /// `qualifier` is only set when the bare name would be ambiguous.
    Column {
        qualifier: Option<String>,
        name: String,
    },
    /// `join` carries a proposed `ON` condition after a JOIN.
    Table { name: String, join: Option<String> },
}
pub type Suggestions = Vec<Suggestion>;

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::Star => f.write_str("*"),
            Suggestion::Keyword(word) | Suggestion::Function(word) | Suggestion::Operator(word) => {
                f.write_str(word)
            }
            Suggestion::Column {
                qualifier: Some(qualifier),
                name,
            } => write!(f, "{qualifier}.{name}"),
            Suggestion::Column {
                qualifier: None,
                name,
            } => f.write_str(name),
            Suggestion::Table {
                name,
                join: Some(condition),
            } => write!(f, "{name} ON {condition}"),
            Suggestion::Table { name, join: None } => f.write_str(name),
        }
    }
}

impl Suggestion {
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified_column(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }

    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: name.into(),
            join: None,
        }
    }

    /// The part compared against the typed prefix: a qualified column matches
    /// on its bare name, an annotated table on the table name.
    pub fn match_text(&self) -> &str {
        match self {
            Suggestion::Star => "*",
            Suggestion::Keyword(word) | Suggestion::Function(word) | Suggestion::Operator(word) => {
                word
            }
            Suggestion::Column { name, .. } | Suggestion::Table { name, .. } => name,
        }
    }

    /// Text to insert when picked. Functions open their argument list.
    pub fn insert_text(&self) -> String {
        match self {
            Suggestion::Function(name) => format!("{name}("),
            other => other.to_string(),
        }
    }
}

/// Words offered when the cursor's clause cannot be determined.
pub const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "AND", "OR", "INNER", "OUTER", "LEFT", "RIGHT", "JOIN", "ON",
    "GROUP", "BY", "HAVING", "ORDER", "LIMIT", "OFFSET", "UNION", "EXCEPT", "INTERSECT", "CREATE",
    "TABLE", "INDEX", "VIEW", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE", "TRUNCATE",
    "ALTER", "ADD", "DROP", "COLUMN", "CONSTRAINT", "PRIMARY", "KEY", "FOREIGN", "REFERENCES",
    "UNIQUE", "NOT", "NULL", "IS", "DISTINCT", "CASE", "WHEN", "THEN", "ELSE", "END", "AS", "WITH",
    "BETWEEN", "LIKE", "IN", "EXISTS", "ALL", "ANY", "SOME", "DESC", "ASC", "AVG", "COUNT", "SUM",
    "MAX", "MIN", "COALESCE", "CAST", "CONVERT",
];

/// Aggregate and window functions offered in a select list.
pub const FUNCTIONS: &[&str] = &[
    "COUNT",
    "SUM",
    "AVG",
    "MIN",
    "MAX",
    "STRING_AGG",
    "ROW_NUMBER",
    "RANK",
    "DENSE_RANK",
    "NTILE",
    "LAG",
    "LEAD",
    "FIRST_VALUE",
    "LAST_VALUE",
];

pub const OPERATORS: &[&str] = &[
    "=",
    "<>",
    "!=",
    "<",
    "<=",
    ">",
    ">=",
    "LIKE",
    "IN",
    "BETWEEN",
    "IS NULL",
    "IS NOT NULL",
];

/// Candidates for `context`, using the configured key suffixes.
pub fn generate(context: &CursorContext, schema: &SchemaSnapshot) -> Suggestions {
    generate_with(context, schema, &config().key_suffixes)
}

/// Candidates for `context` drawn from `schema`, filtered by the typed prefix
/// and ranked: prefix matches first, then substring matches, each group in
/// case-insensitive alphabetical order.
pub fn generate_with(
    context: &CursorContext,
    schema: &SchemaSnapshot,
    key_suffixes: &[String],
) -> Suggestions {
    let candidates: Suggestions = match &context.clause {
        ClauseContext::InsideLiteral => vec![],
        ClauseContext::Unclassified => KEYWORDS
            .iter()
            .map(|k| Suggestion::Keyword(k.to_string()))
            .collect(),
        ClauseContext::SelectList => std::iter::once(Suggestion::Star)
            .chain(scope_columns(&context.tables, schema))
            .chain(FUNCTIONS.iter().map(|f| Suggestion::Function(f.to_string())))
            .collect(),
        ClauseContext::FromOrJoin { partial, join } => {
            table_candidates(partial, *join, &context.tables, schema, key_suffixes)
        }
        ClauseContext::WhereClause | ClauseContext::OnClause => scope_columns(&context.tables, schema)
            .chain(OPERATORS.iter().map(|o| Suggestion::Operator(o.to_string())))
            .collect(),
        ClauseContext::OrderOrGroupBy | ClauseContext::FunctionArgs { .. } => {
            scope_columns(&context.tables, schema).collect()
        }
        ClauseContext::AfterTableDot { qualifier } => {
            qualified_columns(qualifier, &context.tables, schema)
        }
    };
    let ranked = rank(&context.prefix, candidates);
    debug!(
        "Generated {} suggestion(s) for {} with prefix {:?}",
        ranked.len(),
        context.clause,
        context.prefix
    );
    ranked
}

/// Resolve the in-scope references that the schema knows about.
fn resolved<'a>(
    tables: &'a [TableRef],
    schema: &'a SchemaSnapshot,
) -> Vec<(&'a TableRef, &'a Table)> {
    tables
        .iter()
        .filter_map(|r| schema.table(&r.name).map(|t| (r, t)))
        .collect()
}

/// Columns of every resolved in-scope table. A name occurring in more than one
/// of them is qualified with each table's reference.
fn scope_columns<'a>(
    tables: &'a [TableRef],
    schema: &'a SchemaSnapshot,
) -> impl Iterator<Item = Suggestion> + 'a {
    let present = resolved(tables, schema);
    let counts = present
        .iter()
        .flat_map(|(_, t)| t.columns.iter().map(|c| c.to_lowercase()).unique())
        .counts();

    present
        .into_iter()
        .flat_map(move |(r, t)| {
            let counts = counts.clone();
            t.columns.iter().map(move |c| {
                if counts.get(&c.to_lowercase()).copied().unwrap_or(0) > 1 {
                    Suggestion::qualified_column(r.reference(), c)
                } else {
                    Suggestion::column(c)
                }
            })
        })
        .unique()
}

/// Columns of the table `qualifier` stands for, unqualified.
fn qualified_columns(qualifier: &str, tables: &[TableRef], schema: &SchemaSnapshot) -> Suggestions {
    let table = tables
        .iter()
        .find(|r| r.alias.as_deref().is_some_and(|a| a.eq_ignore_ascii_case(qualifier)))
        .or_else(|| tables.iter().find(|r| r.answers_to(qualifier)))
        .map_or(qualifier, |r| r.name.as_str());

    match schema.table(table) {
        Some(t) => t.columns.iter().map(Suggestion::column).collect(),
        None => {
            debug!("Qualifier {qualifier:?} resolves to unknown table {table:?}");
            vec![]
        }
    }
}

fn table_candidates(
    partial: &str,
    join: bool,
    tables: &[TableRef],
    schema: &SchemaSnapshot,
    key_suffixes: &[String],
) -> Suggestions {
    let needle = partial.to_lowercase();
    let present = if join {
        resolved(tables, schema)
    } else {
        vec![]
    };

    schema
        .tables()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .map(|t| Suggestion::Table {
            name: t.name.clone(),
            join: present
                .iter()
                .filter(|(_, p)| !p.name.eq_ignore_ascii_case(&t.name))
                .find_map(|(r, p)| join_condition(t, r, p, key_suffixes)),
        })
        .collect()
}

/// Propose `candidate.x = reference.y` between a table being joined and one
/// already in the statement. A foreign-key shaped pair (`<singular>_id` on one
/// side, `id` on the other) wins over equal key-like column names.
fn join_condition(
    candidate: &Table,
    reference: &TableRef,
    present: &Table,
    key_suffixes: &[String],
) -> Option<String> {
    let on = |left: &str, right: &str| {
        format!("{}.{left} = {}.{right}", candidate.name, reference.reference())
    };

    if let Some(fk) = foreign_key(present, candidate) {
        return Some(on("id", fk));
    }
    if let Some(fk) = foreign_key(candidate, present) {
        return Some(on(fk, "id"));
    }
    candidate
        .columns
        .iter()
        .filter(|c| is_key_like(c, key_suffixes))
        .find_map(|c| present.column(c).map(|p| on(c, p)))
}

/// The column of `holder` pointing at `target.id`, named `<singular target>_id`.
fn foreign_key<'a>(holder: &'a Table, target: &Table) -> Option<&'a str> {
    if !target.has_column("id") {
        return None;
    }
    let expected = format!("{}_id", singular(&target.name.to_lowercase()));
    holder.column(&expected)
}

fn singular(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = name.strip_suffix('s') {
        stem.to_string()
    } else {
        name.to_string()
    }
}

fn is_key_like(column: &str, key_suffixes: &[String]) -> bool {
    let column = column.to_lowercase();
    column == "id" || key_suffixes.iter().any(|s| column.ends_with(&s.to_lowercase()))
}

/// Filter by case-insensitive substring, then order prefix matches before
/// other matches; ties go alphabetical ignoring case, then by bytes.
fn rank(prefix: &str, candidates: Suggestions) -> Suggestions {
    let needle = prefix.to_lowercase();
    candidates
        .into_iter()
        .filter_map(|s| {
            let key = s.match_text().to_lowercase();
            let tier = if key.starts_with(&needle) {
                0
            } else if key.contains(&needle) {
                1
            } else {
                return None;
            };
            let label = s.to_string();
            Some((tier, label.to_lowercase(), label, s))
        })
        .sorted_by(|a, b| (a.0, &a.1, &a.2).cmp(&(b.0, &b.1, &b.2)))
        .map(|(_, _, _, s)| s)
        .unique()
        .collect()
}
