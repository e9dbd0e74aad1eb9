//! Expression-level tokenizer, grounded on the teacher's
//! `compiler/lexer.rs` `logos`-derived `Token` enum: fixed single-char
//! punctuation tokens plus regex-driven literals, with Cantus's
//! data-driven operator signs (spec §4.3) deliberately left for
//! `expr_evaluator`'s maximal-munch grouping pass rather than baked into
//! the token set, since the sign list comes from `OperatorTable`, not a
//! fixed grammar.

use logos::{Lexer, Logos};
use std::fmt;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    #[regex(r"0[xX][0-9a-fA-F]+|[0-9][0-9]*(\.[0-9]+)?", slice)]
    Number(String),

    #[regex(r#""(?:\\.|[^\\"])*""#, quoted)]
    #[regex(r#"'(?:\\.|[^\\'])*'"#, single_quoted)]
    #[token("\"\"\"", triple_quoted)]
    Text(String),

    /// `r"..."` raw-quoted text (spec §4.3): kept distinct from `Text` so
    /// `expr_evaluator` can skip escape resolution on its content.
    #[regex(r#"r"[^"]*""#, raw_quoted)]
    RawText(String),

    #[regex(r"[_\p{L}][_\p{L}\p{N}]*", slice)]
    Identifier(String),

    #[regex(r"`[^`]*`", backtick)]
    Backtick(String),

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LCurly,
    #[token("}")]
    RCurly,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    /// Any run of punctuation characters that isn't one of the tokens
    /// above; `expr_evaluator` groups these against
    /// `OperatorTable::signs_longest_first` (spec §4.4 step 2).
    #[regex(r"[+\-*/%^=<>!&|\\~]+", slice)]
    SignChunk(String),

    Error,
}

fn slice(lex: &mut Lexer<Token>) -> String {
    lex.slice().to_owned()
}

fn quoted(lex: &mut Lexer<Token>) -> String {
    let raw = lex.slice();
    raw[1..raw.len() - 1].to_owned()
}

fn single_quoted(lex: &mut Lexer<Token>) -> String {
    let raw = lex.slice();
    raw[1..raw.len() - 1].to_owned()
}

/// `r"..."` raw-quoted text (spec §4.3): no escape processing, a literal
/// `\` stays a `\` in the token's content.
fn raw_quoted(lex: &mut Lexer<Token>) -> String {
    let raw = lex.slice();
    raw[2..raw.len() - 1].to_owned()
}

/// `"""..."""` triple-quoted text (spec §4.3): the opening token is just
/// the three quote characters, so the closing delimiter is found by
/// scanning the lexer's remainder and bumping past it.
fn triple_quoted(lex: &mut Lexer<Token>) -> Option<String> {
    let rest = lex.remainder();
    let close = rest.find("\"\"\"")?;
    let content = rest[..close].to_owned();
    lex.bump(close + 3);
    Some(content)
}

fn backtick(lex: &mut Lexer<Token>) -> String {
    let raw = lex.slice();
    raw[1..raw.len() - 1].to_owned()
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Text(t) => write!(f, "\"{t}\""),
            Token::RawText(t) => write!(f, "r\"{t}\""),
            Token::Identifier(i) => write!(f, "{i}"),
            Token::Backtick(b) => write!(f, "`{b}`"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LCurly => write!(f, "{{"),
            Token::RCurly => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::SignChunk(s) => write!(f, "{s}"),
            Token::Error => write!(f, "<error>"),
        }
    }
}

/// A token plus its byte span in the source expression, used to render
/// `ariadne` diagnostics (spec §7).
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

pub fn tokenize(source: &str) -> Vec<Spanned> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| Spanned { token: result.unwrap_or(Token::Error), span })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_arithmetic_expression() {
        let tokens = tokenize("3 + 4 * x");
        let kinds: Vec<&Token> = tokens.iter().map(|s| &s.token).collect();
        assert!(matches!(kinds[0], Token::Number(n) if n == "3"));
        assert!(matches!(kinds[1], Token::SignChunk(s) if s == "+"));
        assert!(matches!(kinds[4], Token::Identifier(i) if i == "x"));
    }

    #[test]
    fn groups_compound_sign_as_one_chunk() {
        let tokens = tokenize("a <= b");
        assert!(matches!(&tokens[1].token, Token::SignChunk(s) if s == "<="));
    }

    #[test]
    fn quoted_text_strips_delimiters() {
        let tokens = tokenize(r#""hello""#);
        assert!(matches!(&tokens[0].token, Token::Text(s) if s == "hello"));
    }

    #[test]
    fn single_quoted_text_strips_delimiters() {
        let tokens = tokenize("'hello'");
        assert!(matches!(&tokens[0].token, Token::Text(s) if s == "hello"));
    }

    #[test]
    fn triple_quoted_text_spans_newlines() {
        let tokens = tokenize("\"\"\"a\nb\"\"\"");
        assert!(matches!(&tokens[0].token, Token::Text(s) if s == "a\nb"));
    }

    #[test]
    fn raw_quoted_text_keeps_backslashes_literal() {
        let tokens = tokenize(r#"r"a\nb""#);
        assert!(matches!(&tokens[0].token, Token::RawText(s) if s == r"a\nb"));
    }
}
