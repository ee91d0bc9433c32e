use crate::*;
use std::fmt::Display;

/// What a batch run does after a statement fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    Stop,
    Continue,
}

/// Something that runs one statement at a time, such as a database session
/// owned by the host.
pub trait Executor {
    type Error: Display;

    fn execute(&mut self, statement: &Statement<'_>) -> std::result::Result<(), Self::Error>;

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Stop
    }
}

/// How a single statement went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub span: StatementSpan,
    pub error: Option<String>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Run every statement of the buffer in order.
pub fn execute_all<E: Executor>(sql: &str, executor: &mut E) -> Result<Vec<Outcome>> {
    execute_statements(sql, &split(sql), executor)
}

/// Run the statement under `cursor`; `None` when there is none.
pub fn execute_current<E: Executor>(
    sql: &str,
    cursor: usize,
    executor: &mut E,
) -> Result<Option<Outcome>> {
    let spans = split(sql);
    execute_span(sql, resolve(sql, &spans, cursor), executor)
}

/// Run `spans` in order. Under [`FailurePolicy::Stop`] the first failure ends
/// the run with [`Error::Execution`]; under [`FailurePolicy::Continue`] it is
/// recorded in its [`Outcome`] and the run goes on.
pub fn execute_statements<E: Executor>(
    sql: &str,
    spans: &[StatementSpan],
    executor: &mut E,
) -> Result<Vec<Outcome>> {
    info!("Executing {} statement(s)", spans.len());
    spans
        .iter()
        .map(|span| run(sql, span, executor))
        .collect()
}

pub fn execute_span<E: Executor>(
    sql: &str,
    span: Option<&StatementSpan>,
    executor: &mut E,
) -> Result<Option<Outcome>> {
    match span {
        Some(span) => run(sql, span, executor).map(Some),
        None => {
            info!("No statement under the cursor");
            Ok(None)
        }
    }
}

fn run<E: Executor>(sql: &str, span: &StatementSpan, executor: &mut E) -> Result<Outcome> {
    let statement = span.statement(sql);
    debug!("Executing statement {}: {}", span.index, statement.sql);
    match executor.execute(&statement) {
        Ok(()) => Ok(Outcome {
            span: *span,
            error: None,
        }),
        Err(err) => {
            let message = err.to_string();
            warn!("Statement {} failed: {message}", span.index);
            match executor.failure_policy() {
                FailurePolicy::Stop => Err(Error::Execution {
                    index: span.index,
                    message,
                }),
                FailurePolicy::Continue => Ok(Outcome {
                    span: *span,
                    error: Some(message),
                }),
            }
        }
    }
}
