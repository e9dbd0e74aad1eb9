//! Bracket/quote scanning (spec §4.4 step 1: "scan brackets first, before
//! any tokenization"), grounded on the teacher's `parser` pairing logic
//! for nested delimiters, generalized to the five delimiter families
//! Cantus text can contain: `(...)`, `[...]`, `{...}`, `|...|` (absolute
//! value), and backtick lambda literals, plus the four quoted-text forms
//! (`"…"`, `'…'`, triple-quoted `"""…"""`, raw-quoted `r"…"`) that
//! suppress bracket matching inside them.

use crate::error::{CantusError, SyntaxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Paren,
    Square,
    Curly,
    Pipe,
    Backtick,
}

impl BracketKind {
    fn open(self) -> char {
        match self {
            BracketKind::Paren => '(',
            BracketKind::Square => '[',
            BracketKind::Curly => '{',
            BracketKind::Pipe => '|',
            BracketKind::Backtick => '`',
        }
    }

    fn close(self) -> char {
        match self {
            BracketKind::Paren => ')',
            BracketKind::Square => ']',
            BracketKind::Curly => '}',
            BracketKind::Pipe => '|',
            BracketKind::Backtick => '`',
        }
    }

    /// `|` and `` ` `` are their own close sign, so they cannot nest inside
    /// themselves the way `(`/`[`/`{` can.
    fn self_closing(self) -> bool {
        matches!(self, BracketKind::Pipe | BracketKind::Backtick)
    }

    fn from_open(c: char) -> Option<BracketKind> {
        match c {
            '(' => Some(BracketKind::Paren),
            '[' => Some(BracketKind::Square),
            '{' => Some(BracketKind::Curly),
            '|' => Some(BracketKind::Pipe),
            '`' => Some(BracketKind::Backtick),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketSpan {
    pub kind: BracketKind,
    /// Byte offset of the opening delimiter.
    pub start: usize,
    /// Byte offset one past the closing delimiter.
    pub end: usize,
    pub depth: usize,
}

/// Which quoted-text form the scanner is currently suppressing bracket
/// matching inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteMode {
    Double,
    Single,
    Triple,
    Raw,
}

/// Finds every top-level and nested bracket span in `text`, honoring
/// `\`-escapes and suppressing matching inside any of the four quoted-text
/// forms (spec §4.4 step 1, spec §4.3). Returns spans in the order their
/// openers appear.
pub fn scan(text: &str) -> Result<Vec<BracketSpan>, CantusError> {
    let chars: Vec<char> = text.chars().collect();
    let mut stack: Vec<(BracketKind, usize, usize)> = Vec::new();
    let mut spans = Vec::new();
    let mut quote: Option<QuoteMode> = None;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if let Some(mode) = quote {
            match mode {
                QuoteMode::Double | QuoteMode::Single | QuoteMode::Triple if c == '\\' => {
                    i += 2;
                    continue;
                }
                QuoteMode::Double if c == '"' => quote = None,
                QuoteMode::Single if c == '\'' => quote = None,
                QuoteMode::Raw if c == '"' => quote = None,
                QuoteMode::Triple if chars[i..].starts_with(&['"', '"', '"']) => {
                    i += 3;
                    quote = None;
                    continue;
                }
                _ => {}
            }
            i += 1;
            continue;
        }

        if c == '\\' {
            i += 2;
            continue;
        }
        if i + 2 < chars.len() && chars[i] == '"' && chars[i + 1] == '"' && chars[i + 2] == '"' {
            quote = Some(QuoteMode::Triple);
            i += 3;
            continue;
        }
        if c == '"' && i > 0 && chars[i - 1] == 'r' {
            quote = Some(QuoteMode::Raw);
            i += 1;
            continue;
        }
        if c == '"' {
            quote = Some(QuoteMode::Double);
            i += 1;
            continue;
        }
        if c == '\'' {
            quote = Some(QuoteMode::Single);
            i += 1;
            continue;
        }
        if let Some((top_kind, ..)) = stack.last() {
            if *top_kind == BracketKind::Pipe || *top_kind == BracketKind::Backtick {
                if c == top_kind.close() {
                    let (kind, start, _) = stack.pop().unwrap();
                    spans.push(BracketSpan { kind, start, end: i + 1, depth: stack.len() });
                    i += 1;
                    continue;
                }
            }
        }
        if let Some(kind) = BracketKind::from_open(c) {
            stack.push((kind, i, stack.len()));
            i += 1;
            continue;
        }
        if matches!(c, ')' | ']' | '}') {
            let expected = match c {
                ')' => BracketKind::Paren,
                ']' => BracketKind::Square,
                '}' => BracketKind::Curly,
                _ => unreachable!(),
            };
            match stack.pop() {
                Some((kind, start, _)) if kind == expected => {
                    spans.push(BracketSpan { kind, start, end: i + 1, depth: stack.len() });
                }
                _ => return Err(SyntaxError::UnmatchedBracket { open: c.to_string() }.into()),
            }
            i += 1;
            continue;
        }
        i += 1;
    }
    if let Some((kind, ..)) = stack.pop() {
        return Err(SyntaxError::UnmatchedBracket { open: kind.open().to_string() }.into());
    }
    spans.sort_by_key(|s| s.start);
    Ok(spans)
}

/// The spans with no parent span, in source order (spec §4.4 step 1's
/// "outermost first" bracket-scan requirement).
pub fn top_level(spans: &[BracketSpan]) -> Vec<&BracketSpan> {
    let mut result = Vec::new();
    let mut covered_until = 0usize;
    for span in spans.iter() {
        if span.start >= covered_until {
            result.push(span);
            covered_until = span.end;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_nested_parens() {
        let spans = scan("(1 + (2 * 3))").unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(top_level(&spans).len(), 1);
    }

    #[test]
    fn ignores_brackets_inside_quotes() {
        let spans = scan(r#"f("(not a bracket)")"#).unwrap();
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn ignores_brackets_inside_single_quotes() {
        let spans = scan("f('(not a bracket)')").unwrap();
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn ignores_brackets_inside_triple_quotes() {
        let spans = scan("f(\"\"\"(not a bracket)\"\"\")").unwrap();
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn ignores_brackets_inside_raw_quotes() {
        let spans = scan(r#"f(r"(not a bracket)")"#).unwrap();
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn unmatched_bracket_errors() {
        assert!(scan("(1 + 2").is_err());
    }

    #[test]
    fn pipe_absolute_value_pairs() {
        let spans = scan("|-5|").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, BracketKind::Pipe);
    }
}
