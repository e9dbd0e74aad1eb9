//! Scope naming and the flat variable store (spec §4.6), grounded on the
//! teacher's `precompiler/scope.rs` / `precompiler/scope_stack.rs`
//! realm-indexed lookup, generalized from compile-time realm ids to a
//! runtime dotted scope name plus visibility modifiers.

pub mod scope_name;
pub mod var_store;

pub use scope_name::ScopeName;
pub use var_store::{Modifiers, Variable, VarStore};
