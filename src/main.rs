use qedit::{Engine, LineIndex, Result, StatementSpan};
use std::io::{ErrorKind, Read};
use tracing_subscriber::EnvFilter;

/// Reads a SQL buffer from stdin. Without arguments every statement is
/// printed with its line range; `qedit <cursor>` prints only the statement
/// under that byte offset.
fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut sql = String::new();
    std::io::stdin().read_to_string(&mut sql)?;
    let engine = Engine::from_env()?;
    let lines = LineIndex::new(&sql);

    match std::env::args().nth(1) {
        Some(arg) => {
            let cursor = arg.parse::<usize>().map_err(|err| {
                std::io::Error::new(ErrorKind::InvalidInput, format!("cursor {arg:?}: {err}"))
            })?;
            if let Some(span) = engine.current_statement(&sql, cursor) {
                print_statement(&sql, &lines, &span);
            }
        }
        None => {
            for span in engine.split(&sql) {
                print_statement(&sql, &lines, &span);
            }
        }
    }
    Ok(())
}

fn print_statement(sql: &str, lines: &LineIndex, span: &StatementSpan) {
    let first = lines.line(span.start);
    let last = lines.line(span.end - 1);
    println!("-- statement {} (lines {first}-{last})", span.index + 1);
    println!("{};", span.text(sql));
}
