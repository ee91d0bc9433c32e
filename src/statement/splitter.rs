use crate::*;

/// Split a buffer into its statements.
///
/// Strategy:
/// 1. Tokenize the SQL (strings and comments become opaque tokens).
/// 2. Build the comment-stripped view.
/// 3. Cut at every `;` outside parentheses and trim each piece against the view.
pub fn split(sql: &str) -> Vec<StatementSpan> {
    let tokens = tokenize(sql);
    let view = strip_comments(sql, &tokens);
    split_tokens(&tokens, &view)
}

/// Split using an already scanned buffer.
///
/// Parenthesis depth only moves on `(`/`)` tokens, so parentheses inside
/// strings and comments never count, and a stray `)` cannot drive the depth
/// below zero and swallow every later terminator. Pieces holding nothing but
/// whitespace and comments are dropped.
pub fn split_tokens(tokens: &[Token], view: &StrippedView) -> Vec<StatementSpan> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut piece_start = 0;

    for token in tokens {
        match token.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => depth = depth.saturating_sub(1),
            TokenKind::Semicolon if depth == 0 => {
                push_piece(&mut spans, view, piece_start, token.start);
                piece_start = token.end;
            }
            _ => {}
        }
    }
    push_piece(&mut spans, view, piece_start, view.text.len());

    debug!(
        "Split {} bytes into {} statement(s)",
        view.text.len(),
        spans.len()
    );
    spans
}

/// A buffer scanned once: its tokens and the statements they split into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedBuffer {
    pub tokens: Vec<Token>,
    pub spans: Vec<StatementSpan>,
}

impl ScannedBuffer {
    pub fn scan(sql: &str) -> Self {
        let tokens = tokenize(sql);
        let view = strip_comments(sql, &tokens);
        let spans = split_tokens(&tokens, &view);
        Self { tokens, spans }
    }

    /// Tokens overlapping `span`, including a trailing token the span only
    /// partly covers (an unterminated string ending in whitespace).
    pub fn statement_tokens(&self, span: &StatementSpan) -> &[Token] {
        let lo = self.tokens.partition_point(|t| t.end <= span.start);
        let hi = self.tokens.partition_point(|t| t.start < span.end);
        &self.tokens[lo..hi.max(lo)]
    }
}

fn push_piece(spans: &mut Vec<StatementSpan>, view: &StrippedView, start: usize, end: usize) {
    match view.trim(start, end) {
        Some((start, end)) => {
            let span = StatementSpan::new(
                spans.len(),
                view.map.to_original(start),
                view.map.to_original(end),
            );
            trace!("Statement {} at {}..{}", span.index, span.start, span.end);
            spans.push(span);
        }
        None => trace!("Dropping blank piece {start}..{end}"),
    }
}
