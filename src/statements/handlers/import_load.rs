//! `import <scope>:` / `load <path> [auto_import]:` (spec §4.6), grounded
//! on the teacher's module-loading entry points in `runtime/loader.rs`.

use crate::error::CantusError;
use crate::statements::exec_code::StatementResult;
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::undefined_value;
use crate::values::value_container::ValueContainer;

pub fn exec_import(header_rest: &str, host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let scope_name = header_body(header_rest).trim_matches(|c| c == '"' || c == '\'');
    host.import(scope_name)?;
    Ok(StatementResult::resume(ValueContainer::new_value(undefined_value())))
}

pub fn exec_load(header_rest: &str, host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let body = header_body(header_rest);
    let (path_part, auto_import) = match body.rsplit_once(' ') {
        Some((path, "auto_import")) => (path, true),
        _ => (body, false),
    };
    let path = path_part.trim().trim_matches(|c| c == '"' || c == '\'');
    host.load(path, auto_import)?;
    Ok(StatementResult::resume(ValueContainer::new_value(undefined_value())))
}
