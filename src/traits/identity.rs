/// Reference identity: same underlying storage cell, not merely equal
/// value (spec §4.2, the relation `Reference` equality uses).
pub trait Identity {
    fn identical(&self, other: &Self) -> bool;
}

#[macro_export]
macro_rules! assert_identical {
    ($left_val:expr, $right_val:expr $(,)?) => {
        if !$left_val.identical(&$right_val) {
            panic!(
                "identity assertion failed: `(left is right)`\n  left: `{:?}`,\n right: `{:?}`",
                $left_val, $right_val
            );
        }
    };
}
