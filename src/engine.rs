use crate::*;
use std::sync::Arc;

/// Entry point for a host editor: owns the settings and the scan cache, and
/// answers every query against the buffer's current text.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    cache: SplitCache,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(config().clone())
    }
}

impl Engine {
    pub fn new(config: Config) -> Self {
        info!(
            "Starting engine (scan window {}, cache capacity {})",
            config.scan_window, config.split_cache_capacity
        );
        Self {
            cache: SplitCache::new(config.split_cache_capacity),
            config,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scan(&self, sql: &str) -> Arc<ScannedBuffer> {
        self.cache.scan(sql)
    }

    pub fn split(&self, sql: &str) -> Vec<StatementSpan> {
        self.scan(sql).spans.clone()
    }

    pub fn current_statement(&self, sql: &str, cursor: usize) -> Option<StatementSpan> {
        let scanned = self.scan(sql);
        resolve(sql, &scanned.spans, cursor).copied()
    }

    pub fn context_at(&self, sql: &str, cursor: usize) -> CursorContext {
        context_in(sql, &self.scan(sql), cursor, self.config.scan_window)
    }

    pub fn suggest(&self, sql: &str, cursor: usize, schema: &SchemaSnapshot) -> Suggestions {
        let context = self.context_at(sql, cursor);
        generate_with(&context, schema, &self.config.key_suffixes)
    }

    pub fn execute_all<E: Executor>(&self, sql: &str, executor: &mut E) -> Result<Vec<Outcome>> {
        execute_statements(sql, &self.scan(sql).spans, executor)
    }

    pub fn execute_current<E: Executor>(
        &self,
        sql: &str,
        cursor: usize,
        executor: &mut E,
    ) -> Result<Option<Outcome>> {
        let scanned = self.scan(sql);
        execute_span(sql, resolve(sql, &scanned.spans, cursor), executor)
    }

    /// Drop every cached scan, e.g. when the host swaps documents.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

/// Classify `cursor` in a buffer without a cache.
pub fn context_at(sql: &str, cursor: usize) -> CursorContext {
    context_in(sql, &ScannedBuffer::scan(sql), cursor, config().scan_window)
}

/// Completion candidates for `cursor` in a buffer without a cache.
pub fn suggest(sql: &str, cursor: usize, schema: &SchemaSnapshot) -> Suggestions {
    generate(&context_at(sql, cursor), schema)
}

/// Classify against the statement under the cursor. A cursor that only
/// trails a statement past its `;` starts a fresh one.
fn context_in(
    sql: &str,
    scanned: &ScannedBuffer,
    cursor: usize,
    scan_window: usize,
) -> CursorContext {
    let cursor = clamp_offset(sql, cursor);
    if in_literal(sql, &scanned.tokens, cursor) {
        return CursorContext::new(ClauseContext::InsideLiteral);
    }
    match resolve(sql, &scanned.spans, cursor) {
        Some(span) if terminated_before(&scanned.tokens, span, cursor) => {
            trace!("Cursor {cursor} follows terminated statement {}", span.index);
            CursorContext::new(ClauseContext::Unclassified)
        }
        Some(span) => {
            classify_within(sql, scanned.statement_tokens(span), cursor, scan_window)
        }
        None => CursorContext::new(ClauseContext::Unclassified),
    }
}

/// A `;` token ends `span` somewhere before `cursor`.
fn terminated_before(tokens: &[Token], span: &StatementSpan, cursor: usize) -> bool {
    tokens
        .iter()
        .skip_while(|t| t.start < span.end)
        .take_while(|t| t.end <= cursor)
        .any(|t| t.kind == TokenKind::Semicolon)
}
