//! The cross-type total ordering over `Value` (spec §4.2): type-id bucket
//! first, then element-wise comparison within a bucket. This is the
//! ordering `Set` keeps its keys sorted by, and the definition of
//! value equality used throughout the runtime.

use std::cmp::Ordering;

use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

/// Type-id buckets in comparator order (spec §4.2 step 1): numeric,
/// floating, textual, date, span, listlike, maplike, other.
fn bucket(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Complex(_) => 1,
        Value::Boolean(_) => 1,
        Value::Text(_) => 2,
        Value::Identifier(_) => 2,
        Value::DateTime(d) if !d.is_span() => 3,
        Value::DateTime(_) => 4,
        Value::Tuple(_) => 5,
        Value::Matrix(_) => 5,
        Value::LinkedList(_) => 5,
        Value::Set(_) => 6,
        Value::HashSet(_) => 6,
        Value::Lambda(_) => 7,
        Value::ClassInstance(_) => 7,
        Value::SystemMessage(_) => 7,
    }
}

/// Total ordering over `Value` (spec §4.2, spec §8 property 3).
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (ba, bb) = (bucket(a), bucket(b));
    if ba != bb {
        return ba.cmp(&bb);
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.compare(y),
        (Value::Complex(x), Value::Complex(y)) => x
            .magnitude()
            .partial_cmp(&y.magnitude())
            .unwrap_or(Ordering::Equal),
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::Complex(x), Value::Boolean(y)) => {
            x.magnitude().partial_cmp(&if *y { 1.0 } else { 0.0 }).unwrap_or(Ordering::Equal)
        }
        (Value::Boolean(x), Value::Complex(y)) => {
            (if *x { 1.0 } else { 0.0 }).partial_cmp(&y.magnitude()).unwrap_or(Ordering::Equal)
        }
        (Value::Text(x), Value::Text(y)) => x.0.cmp(&y.0),
        (Value::Identifier(x), Value::Identifier(y)) => x.cmp(y),
        (Value::Text(x), Value::Identifier(y)) => x.0.cmp(y),
        (Value::Identifier(x), Value::Text(y)) => x.cmp(&y.0),
        (Value::DateTime(x), Value::DateTime(y)) => compare_date_time(x, y),
        (Value::Tuple(x), Value::Tuple(y)) => compare_containers(x.0.iter(), y.0.iter()),
        (Value::LinkedList(x), Value::LinkedList(y)) => compare_containers(x.iter(), y.iter()),
        (Value::Matrix(x), Value::Matrix(y)) => x.to_string().cmp(&y.to_string()),
        (Value::Set(x), Value::Set(y)) => compare_maplike(x.iter(), y.iter()),
        (Value::HashSet(x), Value::HashSet(y)) => {
            x.len().cmp(&y.len()).then_with(|| x.to_string().cmp(&y.to_string()))
        }
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn compare_date_time(a: &crate::values::core_values::DateTimeValue, b: &crate::values::core_values::DateTimeValue) -> Ordering {
    use crate::values::core_values::DateTimeValue::*;
    match (a, b) {
        (Instant(x), Instant(y)) => x.cmp(y),
        (Span(x), Span(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Lexicographic comparison used for `Tuple`/`LinkedList` (spec §4.2 step
/// 3: "Lists ... compare lexicographically").
fn compare_containers<'a>(
    mut a: impl Iterator<Item = &'a ValueContainer>,
    mut b: impl Iterator<Item = &'a ValueContainer>,
) -> Ordering {
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) => {
                let ord = compare(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Map comparison used for `Set` (spec §4.2 step 3: "map-equality requires
/// key equality and value equality").
fn compare_maplike<'a>(
    mut a: impl Iterator<Item = &'a (ValueContainer, Option<ValueContainer>)>,
    mut b: impl Iterator<Item = &'a (ValueContainer, Option<ValueContainer>)>,
) -> Ordering {
    loop {
        match (a.next(), b.next()) {
            (Some((ka, va)), Some((kb, vb))) => {
                let key_ord = compare(ka, kb);
                if key_ord != Ordering::Equal {
                    return key_ord;
                }
                let value_ord = match (va, vb) {
                    (Some(va), Some(vb)) => compare(va, vb),
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Less,
                    (Some(_), None) => Ordering::Greater,
                };
                if value_ord != Ordering::Equal {
                    return value_ord;
                }
            }
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Resolves both operands to owned `Value`s (collapsing any `Reference`
/// indirection) before applying `compare_values`.
pub fn compare(a: &ValueContainer, b: &ValueContainer) -> Ordering {
    match (a.to_value(), b.to_value()) {
        (Some(x), Some(y)) => compare_values(&x, &y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigdecimal::BigDecimal;

    #[test]
    fn numeric_bucket_precedes_textual_bucket() {
        let number = Value::Number(BigDecimal::from(1));
        let text = Value::Text(crate::values::core_values::Text::new("a"));
        assert_eq!(compare_values(&number, &text), Ordering::Less);
    }

    #[test]
    fn comparator_is_antisymmetric() {
        let a = Value::Number(BigDecimal::from(3));
        let b = Value::Number(BigDecimal::from(7));
        assert_eq!(compare_values(&a, &b), Ordering::Less);
        assert_eq!(compare_values(&b, &a), Ordering::Greater);
    }
}
