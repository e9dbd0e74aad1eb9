//! `try`/`catch [<name>]`/`finally` (spec §4.5), grounded on the
//! teacher's error-unwind handling in `runtime/execution/execution_loop.rs`.

use crate::error::CantusError;
use crate::scope::var_store::Modifiers;
use crate::statements::block::Block;
use crate::statements::exec_code::StatementResult;
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::keyword_table;
use crate::statements::exec_blocks;
use crate::values::core_values::text::Text;
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

/// Default binding name for the caught error when `catch` doesn't name one
/// (matches `EvaluatorConfig::default_catch_binding`'s default).
const DEFAULT_CATCH_BINDING: &str = "error";

pub fn exec(block: &Block, host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let try_result = exec_blocks(&block.body, host);

    let result = match try_result {
        Ok(value) => Ok(value),
        Err(error) => run_catch(&block.continuations, error, host),
    };

    for continuation in &block.continuations {
        let (def, rest) = keyword_table::leading_keyword(&continuation.header.text).expect("aux keyword");
        if def.word == "finally" {
            let _ = header_body(rest);
            exec_blocks(&continuation.body, host)?;
        }
    }

    result
}

fn run_catch(continuations: &[Block], error: CantusError, host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    for continuation in continuations {
        let (def, rest) = keyword_table::leading_keyword(&continuation.header.text).expect("aux keyword");
        if def.word != "catch" {
            continue;
        }
        let header = header_body(rest);
        let named = header.strip_prefix("as ").unwrap_or(header).trim();
        let binding = if named.is_empty() { DEFAULT_CATCH_BINDING } else { named };
        host.declare_variable(
            binding,
            ValueContainer::new_value(Value::Text(Text::new(error.to_string()))),
            Modifiers::public(),
        );
        return exec_blocks(&continuation.body, host);
    }
    Err(error)
}
