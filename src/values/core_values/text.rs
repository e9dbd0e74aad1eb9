//! `Value::Text` (spec §3: "mutable character sequence; supports
//! C-style escape resolution"), grounded on the teacher's
//! `values/core_values/text.rs` string wrapper shape.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Text(pub String);

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Text(value.into())
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, other: &Text) {
        self.0.push_str(&other.0);
    }

    /// Resolves C-style escape sequences (`\n`, `\t`, `\r`, `\\`, `\"`,
    /// `\'`, `\0`) in literal source text, spec §3.
    pub fn resolve_escapes(raw: &str) -> Text {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('\'') => out.push('\''),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        }
        Text(out)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text(value)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_common_escapes() {
        assert_eq!(Text::resolve_escapes(r"a\nb\tc").0, "a\nb\tc");
        assert_eq!(Text::resolve_escapes(r#"quote: \"x\""#).0, "quote: \"x\"");
    }

    #[test]
    fn leaves_unknown_escape_intact() {
        assert_eq!(Text::resolve_escapes(r"\q").0, "\\q");
    }
}
