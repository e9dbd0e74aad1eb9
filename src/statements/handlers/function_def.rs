//! `function name(args):` plus the `let`/`global` single-line declarers
//! (spec §4.5, spec §4.6), grounded on the teacher's function-registration
//! pattern in `runtime/definitions.rs`.

use crate::error::{CantusError, MathError};
use crate::parser::expr_evaluator::split_top_level;
use crate::runtime::definitions::user_function::{ArgSpec, UserFunction};
use crate::scope::var_store::Modifiers;
use crate::statements::block::{render_source, Block};
use crate::statements::exec_code::StatementResult;
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::values::value_container::ValueContainer;

/// Parses `name(arg1, arg2=default)` into its name and ordered arg specs,
/// shared with `class_def`'s method parsing.
pub(crate) fn parse_signature(rest: &str) -> Result<(String, Vec<ArgSpec>), CantusError> {
    let rest = rest.trim();
    let open = rest.find('(').ok_or(CantusError::from(MathError::Undefined))?;
    let close = rest.rfind(')').ok_or(CantusError::from(MathError::Undefined))?;
    if close < open {
        return Err(MathError::Undefined.into());
    }
    let name = rest[..open].trim().to_string();
    let args_text = &rest[open + 1..close];
    let args = split_top_level(args_text, ',')
        .into_iter()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((name, default)) => ArgSpec::with_default(name.trim(), default.trim()),
            None => ArgSpec::required(part),
        })
        .collect();
    Ok((name, args))
}

pub fn exec(header_rest: &str, body: &[Block], host: &mut dyn StatementHost, modifiers: Modifiers) -> Result<StatementResult, CantusError> {
    let (name, args) = parse_signature(header_body(header_rest))?;
    let function = UserFunction::new(name, render_source(body), args, host.current_scope(), modifiers);
    host.define_user_function(function);
    Ok(StatementResult::resume(ValueContainer::new_value(crate::statements::undefined_value())))
}

fn split_declaration(text: &str) -> Result<(&str, &str), CantusError> {
    if let Some(pos) = text.find(":=") {
        return Ok((text[..pos].trim(), &text[pos + 2..]));
    }
    if let Some(pos) = text.find('=') {
        return Ok((text[..pos].trim(), &text[pos + 1..]));
    }
    Err(MathError::Undefined.into())
}

pub fn exec_let(header_rest: &str, host: &mut dyn StatementHost, modifiers: Modifiers) -> Result<StatementResult, CantusError> {
    let (name, expr) = split_declaration(header_rest)?;
    let value = host.eval_expr(expr.trim(), false)?;
    host.declare_variable(name, value.clone(), modifiers);
    Ok(StatementResult::resume(value))
}

/// Declares in the outermost (root) scope rather than the current one
/// (spec §3 gives `global` a "global (root scope)" lifetime, distinct
/// from `let`'s current-scope binding).
pub fn exec_global(header_rest: &str, host: &mut dyn StatementHost, modifiers: Modifiers) -> Result<StatementResult, CantusError> {
    let (name, expr) = split_declaration(header_rest)?;
    let value = host.eval_expr(expr.trim(), false)?;
    let root = host.root_scope();
    host.declare_variable_in(&root, name, value.clone(), modifiers);
    Ok(StatementResult::resume(value))
}
