//! The `Evaluator` facade (spec §6) and the script-defined function/class
//! registries it owns (spec §4.6), grounded on the teacher's
//! `runtime/execution_context.rs` sub-evaluator spawning pattern.

pub mod async_task;
pub mod definitions;
pub mod evaluator;
