//! Cross-cutting equality/identity traits (spec §4.2), grounded on the
//! teacher's `values/traits/{structural_eq,value_eq}.rs` and
//! `traits/identity.rs`: three distinct traits rather than folding the
//! three notions of "equal" into inherent methods, since `Value`'s
//! `PartialEq` (reference identity) and its structural/cross-type
//! comparator meanings are genuinely different relations.

mod identity;
mod structural_eq;
mod value_eq;

pub use identity::Identity;
pub use structural_eq::StructuralEq;
pub use value_eq::ValueEq;
