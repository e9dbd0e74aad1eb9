//! Logical-line splitting (spec §4.5 "Block grouping"): physical lines
//! are joined across backslash-newline continuations and across
//! unbalanced brackets before indentation is measured, grounded on the
//! teacher's `runtime/execution/mod.rs` source-to-instruction-stream
//! preprocessing pass.

use crate::error::CantusError;
use crate::operators::bracket;

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub indent: usize,
    /// 1-based physical line number of the first line this logical line
    /// was joined from, used to tag errors (spec §7).
    pub line_no: usize,
}

const TAB_WIDTH: usize = 4;

fn indent_width(raw: &str) -> usize {
    let mut width = 0;
    for c in raw.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH,
            _ => break,
        }
    }
    width
}

/// Strips a `#`-comment that starts outside of any quoted text.
fn strip_comment(text: &str) -> &str {
    let mut in_quotes = false;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &text[..i],
            _ => {}
        }
    }
    text
}

/// Joins physical lines into logical lines (spec §4.5): trailing `\`
/// continues onto the next physical line, and a line with unbalanced
/// brackets keeps absorbing following lines until they balance.
pub fn split_into_lines(source: &str) -> Result<Vec<Line>, CantusError> {
    let mut lines = Vec::new();
    let mut pending: Option<(String, usize)> = None;

    for (physical_no, raw) in source.lines().enumerate() {
        let line_no = physical_no + 1;
        let stripped = strip_comment(raw);
        let (indent, content) = match &pending {
            Some((joined, indent)) => (*indent, format!("{joined} {}", stripped.trim())),
            None => (indent_width(stripped), stripped.trim().to_string()),
        };
        let started_at = pending.as_ref().map(|_| line_no).unwrap_or(line_no);

        let without_continuation = content.strip_suffix('\\').map(str::to_string);
        let body = without_continuation.clone().unwrap_or(content);

        if without_continuation.is_some() {
            pending = Some((body, indent));
            continue;
        }

        if body.is_empty() {
            pending = None;
            continue;
        }

        if bracket::scan(&body).is_err() {
            pending = Some((body, indent));
            continue;
        }

        pending = None;
        lines.push(Line { text: body, indent, line_no: started_at });
    }

    if let Some((body, indent)) = pending {
        if !body.is_empty() {
            lines.push(Line { text: body, indent, line_no: source.lines().count() });
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_outside_quotes() {
        let lines = split_into_lines("x := 1 # comment\ny := \"a # b\"").unwrap();
        assert_eq!(lines[0].text, "x := 1");
        assert_eq!(lines[1].text, "y := \"a # b\"");
    }

    #[test]
    fn joins_backslash_continuation() {
        let lines = split_into_lines("x := 1 + \\\n    2").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "x := 1 + 2");
    }

    #[test]
    fn joins_across_unbalanced_brackets() {
        let lines = split_into_lines("m := [1, 2,\n     3, 4]").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "m := [1, 2, 3, 4]");
    }

    #[test]
    fn measures_indentation_in_spaces() {
        let lines = split_into_lines("if true:\n    x := 1").unwrap();
        assert_eq!(lines[0].indent, 0);
        assert_eq!(lines[1].indent, 4);
    }
}
