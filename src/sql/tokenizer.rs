use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};
use crate::*;

/// Lenient SQL scanner producing a gap-free stream of `Token`s.
///
/// Scope / Intent:
/// - Runs on every keystroke against a buffer that is usually mid-edit.
/// - Gives a single answer to "is this byte inside a string or a comment",
///   which the splitter and the classifier both rely on.
///
/// Behavior:
/// - Whitespace runs and comments are emitted as tokens, so the token spans
///   tile `[0, sql.len())` exactly.
/// - `--` comments stop before the newline; `/* */` comments close at the first
///   `*/` (no nesting).
/// - `'...'` strings and `"..."` identifiers treat a doubled quote as an
///   escaped quote, not a terminator.
/// - An unterminated string, identifier or block comment runs to end of input.
/// - Words are keywords when `Keyword::from_lower` knows them, identifiers
///   otherwise, preserving original case.
///
/// Guarantees:
/// - Never panics and never fails on any UTF-8 input.
/// - O(n) time.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let bytes = sql.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let kind = match bytes[i] {
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i = line_comment_end(bytes, i);
                TokenKind::Comment
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = block_comment_end(bytes, i);
                TokenKind::Comment
            }
            b'\'' => {
                i = quoted_end(bytes, i).0;
                TokenKind::StringLiteral
            }
            b'"' => {
                let (end, closed) = quoted_end(bytes, i);
                i = end;
                let inner_end = if closed { end - 1 } else { end };
                TokenKind::Ident(sql[start + 1..inner_end].replace("\"\"", "\""))
            }
            b'0'..=b'9' => {
                i = number_end(bytes, i);
                TokenKind::Number
            }
            b',' => {
                i += 1;
                TokenKind::Comma
            }
            b'.' => {
                i += 1;
                TokenKind::Dot
            }
            b'(' => {
                i += 1;
                TokenKind::ParenOpen
            }
            b')' => {
                i += 1;
                TokenKind::ParenClose
            }
            b';' => {
                i += 1;
                TokenKind::Semicolon
            }
            b if is_operator_byte(b) => {
                i = operator_end(bytes, i);
                TokenKind::Operator
            }
            _ => {
                let Some(ch) = sql[i..].chars().next() else {
                    break;
                };
                if ch.is_whitespace() {
                    i = char_run_end(sql, i, char::is_whitespace);
                    TokenKind::Whitespace
                } else if ch.is_alphabetic() || ch == '_' {
                    i = char_run_end(sql, i, is_word_char);
                    word_kind(&sql[start..i])
                } else {
                    i += ch.len_utf8();
                    TokenKind::Other(ch)
                }
            }
        };
        out.push(Token::new(kind, start, i));
    }

    trace!("Scanned {} bytes into {} tokens", sql.len(), out.len());
    out
}

/// True when typing at `token.end` would still extend the token: line
/// comments, and strings, quoted identifiers or block comments that reached end
/// of input without their closing delimiter.
pub fn is_unterminated(sql: &str, token: &Token) -> bool {
    let text = token.text(sql);
    match token.kind {
        TokenKind::Comment => text.starts_with("--") || text.len() < 4 || !text.ends_with("*/"),
        TokenKind::StringLiteral => !quoted_end(sql.as_bytes(), token.start).1,
        TokenKind::Ident(_) if text.starts_with('"') => !quoted_end(sql.as_bytes(), token.start).1,
        _ => false,
    }
}

fn word_kind(text: &str) -> TokenKind {
    Keyword::from_lower(&text.to_ascii_lowercase())
        .map(TokenKind::Keyword)
        .unwrap_or_else(|| TokenKind::Ident(text.to_string()))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_operator_byte(b: u8) -> bool {
    matches!(
        b,
        b'=' | b'<' | b'>' | b'!' | b'+' | b'-' | b'*' | b'/' | b'%' | b'|' | b'&' | b'^' | b'~'
            | b':'
    )
}

/// End of a run of chars satisfying `pred`, starting at `from` (which must match).
fn char_run_end(sql: &str, from: usize, pred: impl Fn(char) -> bool) -> usize {
    sql[from..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(idx, _)| from + idx)
        .unwrap_or(sql.len())
}

fn line_comment_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|idx| from + idx)
        .unwrap_or(bytes.len())
}

fn block_comment_end(bytes: &[u8], from: usize) -> usize {
    bytes[from + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|idx| from + 2 + idx + 2)
        .unwrap_or(bytes.len())
}

/// Scan a quoted run opened at `from`. Returns the exclusive end and whether a
/// closing quote was found. A doubled quote is an escaped quote.
fn quoted_end(bytes: &[u8], from: usize) -> (usize, bool) {
    let quote = bytes[from];
    let mut i = from + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return (i + 1, true);
        }
        i += 1;
    }
    (bytes.len(), false)
}

fn number_end(bytes: &[u8], from: usize) -> usize {
    let digits = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };
    let mut i = digits(from);
    if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
        i = digits(i + 1);
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(i + 1), Some(b'+' | b'-')));
        if bytes.get(i + 1 + sign).is_some_and(u8::is_ascii_digit) {
            i = digits(i + 1 + sign);
        }
    }
    i
}

/// Operator runs never swallow the start of a comment.
fn operator_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from + 1;
    while i < bytes.len() && is_operator_byte(bytes[i]) {
        if matches!(&bytes[i..], [b'-', b'-', ..] | [b'/', b'*', ..]) {
            break;
        }
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::keyword::Keyword;
    use crate::sql::token_kind::TokenKind;
    use rstest::rstest;

    fn kinds(sql: &str) -> Vec<TokenKind> {
        tokenize(sql).into_iter().map(|t| t.kind).collect()
    }

    fn texts(sql: &str) -> Vec<&str> {
        tokenize(sql).iter().map(|t| t.text(sql)).collect()
    }

    #[rstest]
    #[case("")]
    #[case("SELECT a, b FROM t;")]
    #[case("SELECT 'it''s' -- trailing\n/* block */ FROM \"My \"\"T\"\"\"")]
    #[case("SELECT 'unterminated")]
    #[case("/* open block")]
    #[case("SELECT café, ünïcödé FROM naïve WHERE x → 1")]
    #[case("a<>b||c::int>=1.5e-3")]
    fn tokens_tile_the_input(#[case] sql: &str) {
        let toks = tokenize(sql);
        let mut pos = 0;
        for t in &toks {
            assert_eq!(t.start, pos, "gap before {t:?} in {sql:?}");
            assert!(t.end > t.start, "empty token {t:?}");
            pos = t.end;
        }
        assert_eq!(pos, sql.len());
        assert_eq!(toks.iter().map(|t| t.text(sql)).collect::<String>(), sql);
    }

    #[test]
    fn basic_select_sequence() {
        let toks = tokenize("SELECT a, b FROM t");
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::Select)));
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::From)));
        for name in ["a", "b", "t"] {
            assert!(
                toks.iter().any(|t| t.ident() == Some(name)),
                "missing identifier {name}"
            );
        }
    }

    #[test]
    fn preserves_case_for_identifiers() {
        let toks = tokenize("From MyTable");
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::From)));
        assert!(toks.iter().any(|t| t.ident() == Some("MyTable")));
    }

    #[test]
    fn doubled_quote_does_not_terminate_string() {
        let sql = "SELECT 'a'';b' ; x";
        assert_eq!(texts(sql)[2], "'a'';b'");
        assert_eq!(
            kinds(sql)
                .iter()
                .filter(|k| **k == TokenKind::Semicolon)
                .count(),
            1
        );
    }

    #[test]
    fn quoted_identifier_is_unescaped_and_never_a_keyword() {
        let toks = tokenize(r#"SELECT "from", "a""b" FROM t"#);
        assert_eq!(toks[2].ident(), Some("from"));
        assert_eq!(toks[5].ident(), Some("a\"b"));
    }

    #[test]
    fn line_comment_stops_before_newline() {
        let sql = "SELECT 1 -- note ; here\n; SELECT 2";
        let toks = tokenize(sql);
        let comment = toks
            .iter()
            .find(|t| t.kind == TokenKind::Comment)
            .expect("comment token");
        assert_eq!(comment.text(sql), "-- note ; here");
        assert_eq!(sql.as_bytes()[comment.end], b'\n');
    }

    #[test]
    fn block_comment_closes_at_first_terminator() {
        let sql = "/* a /* b */ c */";
        assert_eq!(texts(sql)[0], "/* a /* b */");
        assert!(tokenize(sql).iter().any(|t| t.ident() == Some("c")));
    }

    #[rstest]
    #[case("SELECT 'abc", "'abc")]
    #[case("SELECT \"abc", "\"abc")]
    #[case("SELECT /* abc", "/* abc")]
    fn unterminated_runs_to_end_of_input(#[case] sql: &str, #[case] last: &str) {
        assert_eq!(*texts(sql).last().expect("tokens"), last);
    }

    #[rstest]
    #[case("SELECT 'abc", true)]
    #[case("SELECT 'abc'", false)]
    #[case("SELECT 'it''", true)]
    #[case("SELECT \"abc", true)]
    #[case("SELECT \"abc\"", false)]
    #[case("SELECT 1 -- note", true)]
    #[case("SELECT 1 /* note", true)]
    #[case("SELECT 1 /* note */", false)]
    #[case("SELECT 1 /*/", true)]
    #[case("SELECT abc", false)]
    fn detects_open_trailing_token(#[case] sql: &str, #[case] open: bool) {
        let toks = tokenize(sql);
        let last = toks.last().expect("tokens");
        assert_eq!(is_unterminated(sql, last), open, "{sql:?}");
    }

    #[test]
    fn numbers_and_operators() {
        assert_eq!(texts("1.5e-3>=x"), vec!["1.5e-3", ">=", "x"]);
        assert_eq!(kinds("a<>b")[1], TokenKind::Operator);
        assert_eq!(kinds("12")[0], TokenKind::Number);
    }

    #[test]
    fn operator_run_stops_at_comment_opener() {
        assert_eq!(texts("a=--c"), vec!["a", "=", "--c"]);
        assert_eq!(texts("a+/*c*/"), vec!["a", "+", "/*c*/"]);
    }

    #[test]
    fn punctuation_tokens() {
        let toks = tokenize("(a.b,c);");
        assert!(toks.iter().any(|t| t.kind == TokenKind::ParenOpen));
        assert!(toks.iter().any(|t| t.kind == TokenKind::Dot));
        assert!(toks.iter().any(|t| t.kind == TokenKind::Comma));
        assert!(toks.iter().any(|t| t.kind == TokenKind::ParenClose));
        assert!(toks.iter().any(|t| t.kind == TokenKind::Semicolon));
    }

    #[test]
    fn other_characters() {
        let toks = tokenize("SELECT @x");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Other('@')));
    }
}
