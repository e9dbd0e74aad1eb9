//! Significant-figure inference from literal source text (spec §4.1).
//!
//! Leading zeros never count. Trailing zeros only count when they appear
//! after a decimal point, since trailing zeros in a bare integer literal
//! are ambiguous about precision (`100` could be 1, 2 or 3 sig figs;
//! `100.0` is unambiguously 4).

/// Returns the number of significant digits in a plain decimal literal, or
/// `None` for literals this heuristic does not apply to (hex/octal/
/// `undefined`, which carry no significant-figure notion).
pub fn infer_sig_figs(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let body = trimmed.strip_prefix('-').or_else(|| trimmed.strip_prefix('+')).unwrap_or(trimmed);

    if body.starts_with("0x") || body.starts_with("0X") {
        return None;
    }
    if body.eq_ignore_ascii_case("null") || body.eq_ignore_ascii_case("undefined") {
        return None;
    }

    let has_point = body.contains('.');
    let digits: String = body.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let significant: &str = digits.trim_start_matches('0');
    if significant.is_empty() {
        // all zero, e.g. "0" or "0.00"
        return Some(if has_point { digits.len() as u32 } else { 1 });
    }

    if has_point {
        Some(significant.len() as u32)
    } else {
        Some(significant.trim_end_matches('0').len().max(1) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_trailing_zeros_are_ambiguous() {
        assert_eq!(infer_sig_figs("100"), Some(1));
    }

    #[test]
    fn decimal_trailing_zeros_count() {
        assert_eq!(infer_sig_figs("100.0"), Some(4));
        assert_eq!(infer_sig_figs("0.00120"), Some(3));
    }

    #[test]
    fn hex_and_undefined_have_no_sig_figs() {
        assert_eq!(infer_sig_figs("0x1A"), None);
        assert_eq!(infer_sig_figs("undefined"), None);
    }
}
