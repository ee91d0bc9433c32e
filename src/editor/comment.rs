use crate::*;

/// Comment or uncomment every line the selection touches.
///
/// Each line is handled on its own: one whose text starts with `--` after
/// leading whitespace loses that first `--`, any other line gets `--`
/// prepended. A caret without a selection toggles its own line.
pub fn toggle_line_comment(sql: &str, selection: Cursor) -> String {
    let (low, high) = selection.clamp(sql).bounds();
    let mut out = String::with_capacity(sql.len() + 2);
    let mut line_start = 0;
    let mut toggled = 0usize;

    for line in sql.split_inclusive('\n') {
        let line_end = line_start + line.len();
        // the last line has no newline, so its end offset is still inside it
        let touched = line_start <= high && (low < line_end || !line.ends_with('\n'));
        if touched {
            out.push_str(&toggle(line));
            toggled += 1;
        } else {
            out.push_str(line);
        }
        line_start = line_end;
    }
    if sql.is_empty() || (sql.ends_with('\n') && high == sql.len()) {
        out.push_str("--");
        toggled += 1;
    }

    debug!("Toggled comments on {toggled} line(s)");
    out
}

fn toggle(line: &str) -> String {
    let indent = line.len() - line.trim_start().len();
    if line[indent..].starts_with("--") {
        format!("{}{}", &line[..indent], &line[indent + 2..])
    } else {
        format!("--{line}")
    }
}
