//! Two-valued logic helpers for `Value::Boolean` (spec §3). A thin module
//! rather than a newtype, since spec §3 specifies no boolean behavior
//! beyond ordinary `bool` semantics; kept as its own file purely to match
//! the one-module-per-variant layout the rest of `core_values/` follows.

pub fn and(a: bool, b: bool) -> bool {
    a && b
}

pub fn or(a: bool, b: bool) -> bool {
    a || b
}

pub fn not(a: bool) -> bool {
    !a
}
