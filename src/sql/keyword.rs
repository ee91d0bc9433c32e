//! SQL keyword model used by the scanner and the context classifier.
//!
//! Only words that steer statement scoping or clause classification are
//! keywords here; everything else (function names, types, dialect extensions)
//! stays an identifier so it can still be suggested or used as a table name.
//!
//! Design notes:
//! - Keywords are matched case‑insensitively via `from_lower` using a pre‑lower‑cased
//!   string slice.
//! - `as_str` provides the canonical upper-case spelling used for suggestions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    All,
    And,
    As,
    Asc,
    Between,
    By,
    Case,
    Create,
    Cross,
    Delete,
    Desc,
    Distinct,
    Else,
    End,
    Except,
    Exists,
    From,
    Full,
    Group,
    Having,
    In,
    Inner,
    Insert,
    Intersect,
    Into,
    Is,
    Join,
    Left,
    Like,
    Limit,
    Natural,
    Not,
    Null,
    Offset,
    On,
    Or,
    Order,
    Outer,
    Right,
    Select,
    Set,
    Table,
    Then,
    Union,
    Update,
    Using,
    Values,
    When,
    Where,
    With,
}

/// Role a keyword plays when classifying the clause around the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseRole {
    /// Starts a projection list.
    Projection,
    /// Introduces a table reference.
    TableTarget,
    /// Starts a filter predicate (`WHERE`, `HAVING`).
    Filter,
    /// Starts a join predicate.
    JoinPredicate,
    /// Continues whichever predicate precedes it (`AND`, `OR`).
    Conjunction,
    /// `BY` of `ORDER BY` / `GROUP BY`.
    Ordering,
    /// Ends the previous clause without opening a completable one.
    Boundary,
    /// Modifier that never decides the clause on its own.
    Neutral,
}

impl Keyword {
    /// Keywords that close a `FROM` table list.
    pub const TERMINATORS: [Self; 14] = [
        Keyword::Where,
        Keyword::Group,
        Keyword::Order,
        Keyword::Having,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Union,
        Keyword::Except,
        Keyword::Intersect,
        Keyword::On,
        Keyword::Using,
        Keyword::Set,
        Keyword::Values,
        Keyword::Select,
    ];

    /// Attempt to classify a *lower‑cased* word slice into a `Keyword`.
    /// Returns `None` if the word is not a recognized keyword.
    ///
    /// NOTE: The caller is responsible for lower‑casing the input.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "all" => All,
            "and" => And,
            "as" => As,
            "asc" => Asc,
            "between" => Between,
            "by" => By,
            "case" => Case,
            "create" => Create,
            "cross" => Cross,
            "delete" => Delete,
            "desc" => Desc,
            "distinct" => Distinct,
            "else" => Else,
            "end" => End,
            "except" => Except,
            "exists" => Exists,
            "from" => From,
            "full" => Full,
            "group" => Group,
            "having" => Having,
            "in" => In,
            "inner" => Inner,
            "insert" => Insert,
            "intersect" => Intersect,
            "into" => Into,
            "is" => Is,
            "join" => Join,
            "left" => Left,
            "like" => Like,
            "limit" => Limit,
            "natural" => Natural,
            "not" => Not,
            "null" => Null,
            "offset" => Offset,
            "on" => On,
            "or" => Or,
            "order" => Order,
            "outer" => Outer,
            "right" => Right,
            "select" => Select,
            "set" => Set,
            "table" => Table,
            "then" => Then,
            "union" => Union,
            "update" => Update,
            "using" => Using,
            "values" => Values,
            "when" => When,
            "where" => Where,
            "with" => With,
            _ => return None,
        };
        Some(kw)
    }

    /// Canonical upper-case spelling of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            All => "ALL",
            And => "AND",
            As => "AS",
            Asc => "ASC",
            Between => "BETWEEN",
            By => "BY",
            Case => "CASE",
            Create => "CREATE",
            Cross => "CROSS",
            Delete => "DELETE",
            Desc => "DESC",
            Distinct => "DISTINCT",
            Else => "ELSE",
            End => "END",
            Except => "EXCEPT",
            Exists => "EXISTS",
            From => "FROM",
            Full => "FULL",
            Group => "GROUP",
            Having => "HAVING",
            In => "IN",
            Inner => "INNER",
            Insert => "INSERT",
            Intersect => "INTERSECT",
            Into => "INTO",
            Is => "IS",
            Join => "JOIN",
            Left => "LEFT",
            Like => "LIKE",
            Limit => "LIMIT",
            Natural => "NATURAL",
            Not => "NOT",
            Null => "NULL",
            Offset => "OFFSET",
            On => "ON",
            Or => "OR",
            Order => "ORDER",
            Outer => "OUTER",
            Right => "RIGHT",
            Select => "SELECT",
            Set => "SET",
            Table => "TABLE",
            Then => "THEN",
            Union => "UNION",
            Update => "UPDATE",
            Using => "USING",
            Values => "VALUES",
            When => "WHEN",
            Where => "WHERE",
            With => "WITH",
        }
    }

    pub const fn role(self) -> ClauseRole {
        use Keyword::*;
        match self {
            Select => ClauseRole::Projection,
            From | Join | Update | Into => ClauseRole::TableTarget,
            Where | Having => ClauseRole::Filter,
            On => ClauseRole::JoinPredicate,
            And | Or => ClauseRole::Conjunction,
            By => ClauseRole::Ordering,
            Limit | Offset | Union | Except | Intersect | Values | Set | Using | With | Create
            | Delete | Insert | Table => ClauseRole::Boundary,
            _ => ClauseRole::Neutral,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
