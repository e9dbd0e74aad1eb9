/// Cross-type value equality: equal under the total-ordering comparator
/// used by `Set` (spec §4.2), so e.g. the integer `2` and the decimal `2.0`
/// are `value_eq` even though they are not `structural_eq` by type.
pub trait ValueEq {
    fn value_eq(&self, other: &Self) -> bool;
}

#[macro_export]
macro_rules! assert_value_eq {
    ($left_val:expr, $right_val:expr $(,)?) => {
        if !$left_val.value_eq(&$right_val) {
            panic!(
                "value equality assertion failed: `(left === right)`\n  left: `{:?}`,\n right: `{:?}`",
                $left_val, $right_val
            );
        }
    };
}
