//! `public`/`private`/`static` prefixes (spec §4.6), grounded on the
//! teacher's visibility-flag handling in `scope/var_store.rs`'s
//! `Modifiers`. Chained prefixes (`public static function foo():`) peel
//! one keyword at a time until the underlying `let`/`global`/`function`/
//! `class` declaration is reached.

use crate::error::CantusError;
use crate::scope::var_store::Modifiers;
use crate::statements::block::Block;
use crate::statements::exec_code::StatementResult;
use crate::statements::handlers::{class_def, function_def};
use crate::statements::host::StatementHost;
use crate::statements::keyword_table;

fn apply(word: &str, modifiers: Modifiers) -> Modifiers {
    match word {
        "private" => modifiers.with_private(),
        "static" => modifiers.with_static(),
        _ => modifiers,
    }
}

pub fn exec(word: &str, rest: &str, block: &Block, host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let mut modifiers = apply(word, Modifiers::public());
    let mut remaining = rest;

    loop {
        let Some((def, next_rest)) = keyword_table::leading_keyword(remaining) else {
            break;
        };
        match def.word {
            "public" | "private" | "static" => {
                modifiers = apply(def.word, modifiers);
                remaining = next_rest;
            }
            "function" => return function_def::exec(next_rest, &block.body, host, modifiers),
            "class" => return class_def::exec(next_rest, &block.body, host, modifiers),
            "let" => return function_def::exec_let(next_rest, host, modifiers),
            "global" => return function_def::exec_global(next_rest, host, modifiers),
            _ => break,
        }
    }

    Err(crate::error::MathError::Undefined.into())
}
