//! The expression evaluator (spec §4.4): bracket-first scan, tokenization
//! with longest-match-first signs and implicit-multiplication
//! disambiguation, precedence passes high to low, reference handling, the
//! defer protocol, and result coercion. Grounded on the teacher's
//! tree-walking expression dispatch in `runtime/execution_context.rs`,
//! generalized from a pre-parsed AST to a precedence-table-driven
//! multi-pass evaluator over raw text, since Cantus resolves operator
//! meaning (spec §4.3.1) from a runtime-configurable `OperatorTable`
//! rather than a fixed grammar.

use crate::bigdecimal::BigDecimal;
use crate::error::{CantusError, SyntaxError};
use crate::operators::bracket::{self, BracketKind};
use crate::operators::defer;
use crate::operators::operator::{Arity, ExecContext, OperatorTable};
use crate::operators::precedence::{Precedence, PRECEDENCE_LEVELS};
use crate::parser::lexer::{self, Token};
use crate::values::core_values::lambda::Lambda;
use crate::values::core_values::matrix::{Matrix, MatrixRow};
use crate::values::core_values::set::SetValue;
use crate::values::core_values::text::Text;
use crate::values::core_values::tuple::Tuple;
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

/// Word-form signs that read as an identifier lexically but act as an
/// operator (spec §4.3): checked before falling back to variable lookup.
const KEYWORD_SIGNS: &[&str] = &["and", "or", "not", "mod", "choose", "ref", "deref", "bitand"];

#[derive(Clone)]
enum Node {
    Operand(ValueContainer),
    Sign(String),
}

/// Caller-supplied variable/function resolution, kept out of this module
/// so it stays decoupled from `Scope`/`VarStore` (spec §4.4 step 3 needs
/// only *a* resolver, not a concrete one).
pub trait IdentifierResolver {
    fn resolve(&self, name: &str) -> Result<ValueContainer, CantusError>;

    /// Invokes `name` as a call (spec §4.6/§4.7): a user-defined function,
    /// a host builtin, or a variable bound to a `Lambda`, in that order.
    /// Routed here from `build_nodes` whenever an identifier directly
    /// abuts a `(` span with no intervening sign or whitespace.
    fn call(&self, name: &str, args: Vec<ValueContainer>) -> Result<ValueContainer, CantusError>;

    /// Invokes a `Lambda` value directly, for when one is already in
    /// hand rather than bound to a name (spec §8: applying `` `x=>x*x` ``
    /// through `*`, routed from `apply_operator`).
    fn call_lambda_value(&self, lambda: &Lambda, args: Vec<ValueContainer>) -> Result<ValueContainer, CantusError>;
}

pub struct ExprEvaluator<'a> {
    pub table: &'a OperatorTable,
    pub ctx: ExecContext<'a>,
}

impl<'a> ExprEvaluator<'a> {
    pub fn new(table: &'a OperatorTable, ctx: ExecContext<'a>) -> Self {
        ExprEvaluator { table, ctx }
    }

    /// Evaluates a single expression string to a `ValueContainer` (spec
    /// §4.4's full six-step contract).
    pub fn eval(&self, source: &str, resolver: &dyn IdentifierResolver) -> Result<ValueContainer, CantusError> {
        let mut nodes = self.build_nodes(source, resolver)?;
        self.insert_implicit_multiplication(&mut nodes);
        for &precedence in PRECEDENCE_LEVELS.iter().rev() {
            self.reduce_precedence_level(&mut nodes, precedence, resolver)?;
        }
        match nodes.len() {
            1 => match nodes.into_iter().next().unwrap() {
                Node::Operand(value) => Ok(value),
                Node::Sign(sign) => Err(SyntaxError::UnknownOperatorSign(sign).into()),
            },
            0 => Err(SyntaxError::UnexpectedEndOfInput.into()),
            _ => Err(SyntaxError::UnexpectedToken { found: source.to_string() }.into()),
        }
    }

    /// Step 1 + step 2: resolves bracketed sub-expressions first (spec
    /// §4.4 step 1), then tokenizes the remaining flat text between them
    /// (spec §4.4 step 2), interleaving both into one node sequence in
    /// source order. A `(` span whose opener directly abuts a preceding
    /// identifier, with no sign or whitespace between them, is a call
    /// (spec §4.6/§4.7) rather than a grouped/tuple value.
    fn build_nodes(&self, source: &str, resolver: &dyn IdentifierResolver) -> Result<Vec<Node>, CantusError> {
        let spans = bracket::scan(source)?;
        let top = bracket::top_level(&spans);
        let mut nodes = Vec::new();
        let mut cursor = 0usize;
        let chars: Vec<char> = source.chars().collect();
        for span in top {
            if span.kind == BracketKind::Paren {
                if let Some((name, name_start)) = trailing_call_name(&chars, cursor, span.start) {
                    if name_start > cursor {
                        let text: String = chars[cursor..name_start].iter().collect();
                        nodes.extend(self.tokenize_plain(&text, resolver)?);
                    }
                    let inner: String = chars[span.start + 1..span.end - 1].iter().collect();
                    let args = self.eval_call_args(&inner, resolver)?;
                    nodes.push(Node::Operand(resolver.call(&name, args)?));
                    cursor = span.end;
                    continue;
                }
            }
            if span.start > cursor {
                let text: String = chars[cursor..span.start].iter().collect();
                nodes.extend(self.tokenize_plain(&text, resolver)?);
            }
            let inner: String = chars[span.start + 1..span.end - 1].iter().collect();
            nodes.push(Node::Operand(self.eval_bracket(span.kind, &inner, resolver)?));
            cursor = span.end;
        }
        if cursor < chars.len() {
            let text: String = chars[cursor..].iter().collect();
            nodes.extend(self.tokenize_plain(&text, resolver)?);
        }
        Ok(nodes)
    }

    /// Splits a call's argument list on top-level commas, evaluating each
    /// part independently; `f()` yields no arguments rather than one
    /// empty one.
    fn eval_call_args(&self, inner: &str, resolver: &dyn IdentifierResolver) -> Result<Vec<ValueContainer>, CantusError> {
        split_top_level(inner, ',')
            .into_iter()
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .map(|part| self.eval(&part, resolver))
            .collect()
    }

    fn eval_bracket(&self, kind: BracketKind, inner: &str, resolver: &dyn IdentifierResolver) -> Result<ValueContainer, CantusError> {
        match kind {
            // `(...)`: a single comma-free part is plain grouping; two or
            // more top-level parts build a `Tuple` (spec §6: "( … ) tuple
            // or grouping").
            BracketKind::Paren => {
                let parts = split_top_level(inner, ',');
                let trimmed: Vec<&str> = parts.iter().map(|p| p.trim()).collect();
                if trimmed.len() <= 1 {
                    self.eval(inner, resolver)
                } else {
                    let elements = trimmed
                        .into_iter()
                        .filter(|p| !p.is_empty())
                        .map(|part| self.eval(part, resolver))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(ValueContainer::new_value(Value::Tuple(Tuple::new(elements))))
                }
            }
            BracketKind::Pipe => {
                let value = self.eval(inner, resolver)?.try_to_value()?;
                match value {
                    Value::Number(n) => Ok(ValueContainer::new_value(Value::Number(n.abs()))),
                    Value::Matrix(m) => Ok(ValueContainer::new_value(Value::Number(
                        crate::operators::matrix_ops::norm(&m, self.ctx.config.division_precision)?,
                    ))),
                    _ => Err(crate::error::MathError::Undefined.into()),
                }
            }
            // `[...]`: a `Matrix` literal (spec §6); each top-level
            // comma-separated element becomes a row, nested `[...]`
            // sub-expressions becoming `MatrixRow::Nested`.
            BracketKind::Square => {
                let rows = split_top_level(inner, ',')
                    .into_iter()
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .map(|part| match self.eval(&part, resolver)?.try_to_value()? {
                        Value::Matrix(nested) => Ok(MatrixRow::Nested(nested)),
                        other => Ok(MatrixRow::Scalar(ValueContainer::new_value(other))),
                    })
                    .collect::<Result<Vec<_>, CantusError>>()?;
                Ok(ValueContainer::new_value(Value::Matrix(Matrix::new(rows))))
            }
            BracketKind::Curly => {
                let mut set = SetValue::new();
                for entry in split_top_level(inner, ',') {
                    let entry = entry.trim();
                    if entry.is_empty() {
                        continue;
                    }
                    let mut parts = split_top_level(entry, ':').into_iter();
                    let key_text = parts.next().unwrap_or_default();
                    let key = self.eval(key_text.trim(), resolver)?;
                    let value = match parts.next() {
                        Some(value_text) => Some(self.eval(value_text.trim(), resolver)?),
                        None => None,
                    };
                    set.insert(key, value);
                }
                Ok(ValueContainer::new_value(Value::Set(set)))
            }
            BracketKind::Backtick => {
                let (args_text, body) = inner.split_once("=>").unwrap_or(("", inner));
                let args = args_text
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                Ok(ValueContainer::new_value(Value::Lambda(Lambda::Flat { args, body: body.trim().to_string() })))
            }
        }
    }

    /// Tokenizes text known to contain no brackets, mapping each token to
    /// an operand or sign node and checking word-form signs against
    /// `KEYWORD_SIGNS` before falling back to identifier resolution.
    fn tokenize_plain(&self, text: &str, resolver: &dyn IdentifierResolver) -> Result<Vec<Node>, CantusError> {
        let mut nodes = Vec::new();
        for spanned in lexer::tokenize(text) {
            match spanned.token {
                Token::Number(raw) => {
                    nodes.push(Node::Operand(ValueContainer::new_value(Value::Number(BigDecimal::parse_with_sig_figs(&raw)?))));
                }
                Token::Text(raw) => {
                    nodes.push(Node::Operand(ValueContainer::new_value(Value::Text(Text::resolve_escapes(&raw)))));
                }
                Token::RawText(raw) => {
                    nodes.push(Node::Operand(ValueContainer::new_value(Value::Text(Text(raw)))));
                }
                Token::Backtick(raw) => {
                    let (args_text, body) = raw.split_once("=>").unwrap_or(("", raw.as_str()));
                    let args = args_text.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect();
                    nodes.push(Node::Operand(ValueContainer::new_value(Value::Lambda(Lambda::Flat {
                        args,
                        body: body.trim().to_string(),
                    }))));
                }
                Token::Identifier(name) => {
                    nodes.push(self.identifier_node(&name, resolver)?);
                }
                Token::SignChunk(chunk) => {
                    nodes.extend(self.split_sign_chunk(&chunk)?);
                }
                Token::Comma | Token::Colon => {
                    return Err(SyntaxError::UnexpectedToken { found: spanned.token.to_string() }.into());
                }
                Token::LParen | Token::RParen | Token::LBracket | Token::RBracket | Token::LCurly | Token::RCurly => {
                    return Err(SyntaxError::UnmatchedBracket { open: spanned.token.to_string() }.into());
                }
                Token::Error => return Err(SyntaxError::UnexpectedToken { found: text.to_string() }.into()),
            }
        }
        Ok(nodes)
    }

    fn identifier_node(&self, name: &str, resolver: &dyn IdentifierResolver) -> Result<Node, CantusError> {
        match name {
            "true" => return Ok(Node::Operand(ValueContainer::new_value(Value::Boolean(true)))),
            "false" => return Ok(Node::Operand(ValueContainer::new_value(Value::Boolean(false)))),
            "null" | "undefined" => {
                return Ok(Node::Operand(ValueContainer::new_value(Value::Number(BigDecimal::undefined()))));
            }
            _ => {}
        }
        if KEYWORD_SIGNS.contains(&name) {
            return Ok(Node::Sign(name.to_string()));
        }
        Ok(Node::Operand(resolver.resolve(name)?))
    }

    /// Greedy longest-match-first split of a run of punctuation characters
    /// into registered signs (spec §4.4 step 2).
    fn split_sign_chunk(&self, chunk: &str) -> Result<Vec<Node>, CantusError> {
        let signs = self.table.signs_longest_first();
        let mut nodes = Vec::new();
        let mut rest = chunk;
        while !rest.is_empty() {
            let matched = signs.iter().find(|s| rest.starts_with(*s));
            match matched {
                Some(sign) => {
                    nodes.push(Node::Sign((*sign).to_string()));
                    rest = &rest[sign.len()..];
                }
                None => {
                    let bad = rest.chars().next().unwrap();
                    return Err(SyntaxError::UnknownOperatorSign(bad.to_string()).into());
                }
            }
        }
        Ok(nodes)
    }

    /// Step 2's implicit-multiplication disambiguation: two adjacent
    /// operands with no sign between them (`2x`, `(a)(b)`) are joined by
    /// an implicit `*`.
    fn insert_implicit_multiplication(&self, nodes: &mut Vec<Node>) {
        let mut i = 0;
        while i + 1 < nodes.len() {
            if matches!(nodes[i], Node::Operand(_)) && matches!(nodes[i + 1], Node::Operand(_)) {
                nodes.insert(i + 1, Node::Sign("*".to_string()));
            }
            i += 1;
        }
    }

    /// Step 3-5: repeatedly reduces every operator bound to `precedence`
    /// until none remain at this level, scanning right-to-left for the
    /// (only) right-associative bucket and left-to-right otherwise.
    ///
    /// A binary sign at this precedence can be stuck behind a lower-
    /// precedence unary one on its right (`m^-1`: `^` is due this pass,
    /// but `-` isn't due until `AddSub`, so `^`'s right neighbor is still
    /// a `Sign`, not the `Operand` it needs). When this pass runs dry with
    /// such a sign still present, `collapse_blocking_unary_operand` folds
    /// just that blocking run in so the normal match can retry.
    fn reduce_precedence_level(&self, nodes: &mut Vec<Node>, precedence: Precedence, resolver: &dyn IdentifierResolver) -> Result<(), CantusError> {
        loop {
            let found = if precedence.is_right_associative() {
                self.find_operator(nodes, precedence, true)
            } else {
                self.find_operator(nodes, precedence, false)
            };
            let Some((index, arity)) = found else {
                if self.collapse_blocking_unary_operand(nodes, precedence, resolver)? {
                    continue;
                }
                return Ok(());
            };
            self.apply_operator(nodes, index, arity, precedence, resolver)?;
        }
    }

    /// Looks for a `Binary` sign registered at `precedence` whose left
    /// neighbor is already an operand but whose right neighbor is a run
    /// of exclusively unary-before signs ending in an operand, and
    /// collapses that run right to left, each at its own registered
    /// precedence, so the blocked binary match can succeed on retry.
    /// Leaves everything else untouched: a sign that already matches
    /// normally (e.g. `-2^2`'s `^`) never reaches this fallback.
    fn collapse_blocking_unary_operand(&self, nodes: &mut Vec<Node>, precedence: Precedence, resolver: &dyn IdentifierResolver) -> Result<bool, CantusError> {
        for i in 0..nodes.len() {
            let Node::Sign(sign) = &nodes[i] else { continue };
            let blocked = i > 0
                && i + 1 < nodes.len()
                && matches!(nodes[i - 1], Node::Operand(_))
                && matches!(nodes[i + 1], Node::Sign(_))
                && self.table.at_precedence(precedence).any(|d| d.sign == sign && d.arity == Arity::Binary);
            if !blocked {
                continue;
            }
            let mut j = i + 1;
            let run_end = loop {
                let Node::Sign(s) = &nodes[j] else { break None };
                if !self.table.bindings_for_sign(s).iter().any(|d| d.arity == Arity::UnaryBefore) {
                    break None;
                }
                if j + 1 >= nodes.len() {
                    break None;
                }
                j += 1;
                if matches!(nodes[j], Node::Operand(_)) {
                    break Some(j);
                }
            };
            let Some(end) = run_end else { continue };
            let mut k = end - 1;
            loop {
                let Node::Sign(sign) = nodes[k].clone() else { unreachable!() };
                let def = self
                    .table
                    .bindings_for_sign(&sign)
                    .into_iter()
                    .find(|d| d.arity == Arity::UnaryBefore)
                    .expect("checked by the run scan above");
                self.apply_operator(nodes, k, Arity::UnaryBefore, def.precedence, resolver)?;
                if k == i + 1 {
                    break;
                }
                k -= 1;
            }
            return Ok(true);
        }
        Ok(false)
    }

    fn find_operator(&self, nodes: &[Node], precedence: Precedence, reverse: bool) -> Option<(usize, Arity)> {
        let indices: Box<dyn Iterator<Item = usize>> = if reverse {
            Box::new((0..nodes.len()).rev())
        } else {
            Box::new(0..nodes.len())
        };
        for i in indices {
            let Node::Sign(sign) = &nodes[i] else { continue };
            for def in self.table.at_precedence(precedence) {
                if def.sign != sign {
                    continue;
                }
                match def.arity {
                    Arity::Binary if i > 0 && i + 1 < nodes.len() => {
                        if matches!(nodes[i - 1], Node::Operand(_)) && matches!(nodes[i + 1], Node::Operand(_)) {
                            return Some((i, Arity::Binary));
                        }
                    }
                    Arity::UnaryBefore if i + 1 < nodes.len() => {
                        if matches!(nodes[i + 1], Node::Operand(_)) && (i == 0 || matches!(nodes[i - 1], Node::Sign(_))) {
                            return Some((i, Arity::UnaryBefore));
                        }
                    }
                    Arity::UnaryAfter if i > 0 => {
                        if matches!(nodes[i - 1], Node::Operand(_)) {
                            return Some((i, Arity::UnaryAfter));
                        }
                    }
                    _ => {}
                }
            }
        }
        None
    }

    fn apply_operator(&self, nodes: &mut Vec<Node>, index: usize, arity: Arity, precedence: Precedence, resolver: &dyn IdentifierResolver) -> Result<(), CantusError> {
        let Node::Sign(sign) = nodes[index].clone() else {
            unreachable!("apply_operator called on a non-sign node")
        };
        match arity {
            Arity::Binary => {
                let (Node::Operand(lhs), Node::Operand(rhs)) = (nodes[index - 1].clone(), nodes[index + 1].clone()) else {
                    unreachable!("find_operator only returns Binary when both neighbors are operands")
                };
                // `` `x=>x*x` * 7 `` (spec §8): applying a lambda through
                // `*` rather than call syntax, so it's intercepted here
                // instead of inside `operators::binary`'s executor, which
                // has no evaluator handle to run a lambda body with.
                let result = match (sign.as_str(), lhs.to_value(), rhs.to_value()) {
                    ("*", Some(Value::Lambda(lambda)), Some(_)) => resolver.call_lambda_value(&lambda, vec![rhs.clone()])?,
                    ("*", Some(_), Some(Value::Lambda(lambda))) => resolver.call_lambda_value(&lambda, vec![lhs.clone()])?,
                    _ => defer::run_binary(self.table, &sign, precedence, &lhs, &rhs, &self.ctx)?,
                };
                nodes.splice(index - 1..=index + 1, [Node::Operand(result)]);
            }
            Arity::UnaryBefore => {
                let Node::Operand(operand) = nodes[index + 1].clone() else {
                    unreachable!("find_operator only returns UnaryBefore when the next node is an operand")
                };
                let result = defer::run_unary(self.table, &sign, precedence, &operand, &self.ctx)?;
                nodes.splice(index..=index + 1, [Node::Operand(result)]);
            }
            Arity::UnaryAfter => {
                let Node::Operand(operand) = nodes[index - 1].clone() else {
                    unreachable!("find_operator only returns UnaryAfter when the previous node is an operand")
                };
                let result = defer::run_unary(self.table, &sign, precedence, &operand, &self.ctx)?;
                nodes.splice(index - 1..=index, [Node::Operand(result)]);
            }
        }
        Ok(())
    }
}

/// Finds the identifier directly abutting `paren_start` (no intervening
/// whitespace or sign), if any, returning its name and where it starts.
/// Excludes word-form operator signs (spec §4.3's `not`/`ref`/`deref`/…)
/// and the literal keywords, so `not(x)`/`ref(x)` keep applying as the
/// unary operators they already are rather than becoming calls.
fn trailing_call_name(chars: &[char], cursor: usize, paren_start: usize) -> Option<(String, usize)> {
    if paren_start <= cursor {
        return None;
    }
    let mut start = paren_start;
    while start > cursor && (chars[start - 1].is_alphanumeric() || chars[start - 1] == '_') {
        start -= 1;
    }
    if start == paren_start || !(chars[start].is_alphabetic() || chars[start] == '_') {
        return None;
    }
    let name: String = chars[start..paren_start].iter().collect();
    if KEYWORD_SIGNS.contains(&name.as_str()) || matches!(name.as_str(), "true" | "false" | "null" | "undefined") {
        return None;
    }
    Some((name, start))
}

/// Splits `text` on `sep` at bracket/quote depth zero — used for comma and
/// colon separators inside `[...]`/`{...}` literals, where nested
/// brackets must not be split on.
pub(crate) fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_quotes = false;
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            current.push(c);
            if let Some(next) = chars.next() {
                current.push(next);
            }
            continue;
        }
        if c == '"' {
            in_quotes = !in_quotes;
            current.push(c);
            continue;
        }
        if in_quotes {
            current.push(c);
            continue;
        }
        match c {
            '(' | '[' | '{' | '|' | '`' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ => {}
        }
        if c == sep && depth == 0 {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvaluatorConfig;

    struct NoVars;
    impl IdentifierResolver for NoVars {
        fn resolve(&self, name: &str) -> Result<ValueContainer, CantusError> {
            Err(crate::error::EvaluatorError::UndefinedIdentifier(name.to_string()).into())
        }

        fn call(&self, name: &str, _args: Vec<ValueContainer>) -> Result<ValueContainer, CantusError> {
            Err(crate::error::EvaluatorError::UndefinedIdentifier(name.to_string()).into())
        }

        fn call_lambda_value(&self, _lambda: &Lambda, _args: Vec<ValueContainer>) -> Result<ValueContainer, CantusError> {
            Err(crate::error::EvaluatorError::UndefinedIdentifier("<lambda>".to_string()).into())
        }
    }

    fn eval(source: &str) -> Value {
        let table = OperatorTable::standard();
        let config = EvaluatorConfig::default();
        let ctx = ExecContext { config: &config, condition_mode: false };
        let evaluator = ExprEvaluator::new(&table, ctx);
        evaluator.eval(source, &NoVars).unwrap().try_to_value().unwrap()
    }

    #[test]
    fn respects_precedence() {
        assert_eq!(eval("2 + 3 * 4").to_string(), "14");
    }

    #[test]
    fn parens_override_precedence() {
        assert_eq!(eval("(2 + 3) * 4").to_string(), "20");
    }

    #[test]
    fn implicit_multiplication_between_parens() {
        assert_eq!(eval("(2)(3)").to_string(), "6");
    }

    #[test]
    fn unary_minus_applies_after_exponent_reduces() {
        assert_eq!(eval("-2^2").to_string(), "-4");
    }

    #[test]
    fn leading_unary_minus_then_addition() {
        assert_eq!(eval("-2 + 3").to_string(), "1");
    }

    #[test]
    fn square_brackets_build_matrix_row() {
        let value = eval("[1, 2, 3]");
        assert!(matches!(value, Value::Matrix(m) if m.height() == 3 && m.width == 1));
    }

    #[test]
    fn paren_comma_list_builds_tuple() {
        let value = eval("(1, 2, 3)");
        assert!(matches!(value, Value::Tuple(t) if t.len() == 3));
    }

    #[test]
    fn absolute_value_pipes() {
        assert_eq!(eval("|-5|").to_string(), "5");
    }

    /// `^`'s right-hand pass runs before unary `-`'s (`Exponent` before
    /// `AddSub`), so without `collapse_blocking_unary_operand` this would
    /// fall through to a bogus `MulDiv`-level match on `1` and `m`-shaped
    /// operands, or an unreduced-node error for plain numbers.
    #[test]
    fn exponent_binds_a_unary_minus_exponent_before_its_own_pass() {
        let Value::Number(n) = eval("2^-1") else { panic!("expected a number") };
        assert_eq!(n.to_f64(), 0.5);
    }
}
