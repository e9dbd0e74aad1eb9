//! Operator registry and precedence engine (spec §4.3, spec §4.4),
//! grounded on the teacher's `global/operators/` module split: signs and
//! precedence buckets live beside the executors that implement them
//! rather than inside the parser.

pub mod assignment;
pub mod binary;
pub mod bracket;
pub mod defer;
pub mod matrix_ops;
pub mod operator;
pub mod precedence;
pub mod unary;

pub use operator::{Arity, ExecContext, OperatorDef, OperatorOutcome, OperatorTable};
pub use precedence::Precedence;
