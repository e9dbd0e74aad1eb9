//! The block/statement interpreter (spec §4.5), grounded on the
//! teacher's `runtime/execution/mod.rs` instruction-loop shape,
//! generalized from a bytecode dispatch loop to a line-dispatch loop over
//! indentation blocks: `block.rs` groups logical lines into a block
//! forest, `keyword_table.rs` resolves each header's leading keyword, and
//! `handlers/` implements one file per construct, all driven through the
//! `StatementHost` seam so this module never touches `Evaluator` fields
//! directly.

pub mod block;
pub mod exec_code;
pub mod handlers;
pub mod host;
pub mod keyword_table;
pub mod line;

use crate::error::{CantusError, EvaluatorError};
use crate::scope::var_store::Modifiers;
use crate::statements::block::Block;
use crate::statements::exec_code::{ExecCode, StatementResult};
use crate::statements::host::StatementHost;
use crate::statements::keyword_table::KeywordShape;
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

/// Parses `source` into a block forest and runs it top to bottom (spec
/// §4.5, spec §6 `eval`).
pub fn run_script(source: &str, host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let lines = line::split_into_lines(source)?;
    let blocks = block::group_blocks(&lines);
    exec_blocks(&blocks, host)
}

/// Runs a sequence of sibling blocks, short-circuiting as soon as one
/// yields a non-`Resume` code (spec §4.5: `return`/`break`/`continue`/
/// `breakLevel` all stop the straight-line sequence they're in).
pub fn exec_blocks(blocks: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let mut last = StatementResult::resume(ValueContainer::new_value(undefined()));
    for block in blocks {
        if host.is_cancelled() {
            return Err(EvaluatorError::UserRaised("evaluation cancelled".to_string()).into());
        }
        last = exec_one(block, host)?;
        if last.interrupts_sequence() {
            return Ok(last);
        }
    }
    Ok(last)
}

fn undefined() -> Value {
    undefined_value()
}

pub(crate) fn undefined_value() -> Value {
    Value::Number(crate::bigdecimal::BigDecimal::undefined())
}

/// Dispatches a single block to its handler by the leading keyword of its
/// header line, falling back to plain expression evaluation for headers
/// that match no registered keyword.
pub fn exec_one(block: &Block, host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let Some((def, rest)) = keyword_table::leading_keyword(&block.header.text) else {
        let value = host.eval_expr(&block.header.text, false)?;
        return Ok(StatementResult::resume(value));
    };

    match def.word {
        "if" => handlers::if_elif_else::exec(block, host),
        "while" => handlers::while_until::exec_while(rest, &block.body, host),
        "until" => handlers::while_until::exec_until(rest, &block.body, host),
        "repeat" => handlers::repeat_run::exec_repeat(rest, &block.body, host),
        "run" => handlers::repeat_run::exec_run(&block.body, host),
        "for" => {
            if rest.contains(" in ") {
                handlers::for_in::exec(rest, &block.body, host)
            } else {
                handlers::for_to_step::exec(rest, &block.body, host)
            }
        }
        "try" => handlers::try_catch_finally::exec(block, host),
        "with" => handlers::with_stmt::exec(rest, &block.body, host),
        "switch" => handlers::switch_case::exec(rest, &block.continuations, host),
        "namespace" => handlers::namespace::exec(rest, &block.body, host),
        "class" => handlers::class_def::exec(rest, &block.body, host, Modifiers::public()),
        "function" => handlers::function_def::exec(rest, &block.body, host, Modifiers::public()),
        "return" => {
            let value = if rest.trim().is_empty() {
                ValueContainer::new_value(undefined())
            } else {
                host.eval_expr(rest, false)?
            };
            Ok(StatementResult::with_code(value, ExecCode::Return))
        }
        "break" => Ok(StatementResult::with_code(ValueContainer::new_value(undefined()), ExecCode::Break)),
        "continue" => Ok(StatementResult::with_code(ValueContainer::new_value(undefined()), ExecCode::Continue)),
        "let" => handlers::function_def::exec_let(rest, host, Modifiers::public()),
        "global" => handlers::function_def::exec_global(rest, host, Modifiers::public()),
        "import" => handlers::import_load::exec_import(rest, host),
        "load" => handlers::import_load::exec_load(rest, host),
        "public" | "private" | "static" => handlers::modifiers::exec(def.word, rest, block, host),
        _ if def.shape == KeywordShape::BlockLevel => {
            let value = host.eval_expr(&block.header.text, false)?;
            Ok(StatementResult::resume(value))
        }
        _ => {
            let value = host.eval_expr(&block.header.text, false)?;
            Ok(StatementResult::resume(value))
        }
    }
}
