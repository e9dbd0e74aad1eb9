//! `namespace <name>:` (spec §4.6), grounded on the teacher's
//! scope-tree nesting in `scope/mod.rs`.

use crate::error::CantusError;
use crate::statements::block::Block;
use crate::statements::exec_code::StatementResult;
use crate::statements::handlers::header_body;
use crate::statements::host::StatementHost;
use crate::statements::exec_blocks;

pub fn exec(header_rest: &str, body: &[Block], host: &mut dyn StatementHost) -> Result<StatementResult, CantusError> {
    let name = header_body(header_rest);
    host.push_scope(Some(name));
    let result = exec_blocks(body, host);
    host.pop_scope();
    result
}
