use crate::value::{Value, combine};
use casegen_schema::node::Comparison;

/// Compare one field's values by its compiled comparison.
#[must_use]
pub fn field_eq(comparison: &Comparison, a: &Value, b: &Value) -> bool {
    if comparison.is_nullable() {
        match (a.is_null(), b.is_null()) {
            (true, true) => return true,
            (true, false) | (false, true) => return false,
            (false, false) => {}
        }
    }

    match comparison {
        Comparison::Equatable { .. } | Comparison::Optional { equatable: true } => {
            a.equatable_eq(b)
        }
        Comparison::Default { .. } | Comparison::Optional { equatable: false } => a.default_eq(b),
        Comparison::Sequence { element } => {
            sequence_eq(a, b, |x, y| field_eq(element, x, y))
        }
        Comparison::UntypedSequence => sequence_eq(a, b, Value::default_eq),
    }
}

/// Hash one field's value consistently with `field_eq`; null is zero.
#[must_use]
pub fn field_hash(comparison: &Comparison, value: &Value) -> u64 {
    if value.is_null() {
        return 0;
    }

    match comparison {
        Comparison::Equatable { .. } | Comparison::Optional { equatable: true } => {
            value.equatable_hash()
        }
        Comparison::Default { .. } | Comparison::Optional { equatable: false } => {
            value.default_hash()
        }
        Comparison::Sequence { element } => match value.as_list() {
            Some(items) => combine(items.iter().map(|item| field_hash(element, item))),
            None => value.default_hash(),
        },
        Comparison::UntypedSequence => match value.as_list() {
            Some(items) => combine(items.iter().map(Value::default_hash)),
            None => value.default_hash(),
        },
    }
}

// Equal length, then pairwise in iteration order. A value that is not a
// list falls back to default equality.
fn sequence_eq(a: &Value, b: &Value, eq: impl Fn(&Value, &Value) -> bool) -> bool {
    match (a.as_list(), b.as_list()) {
        (Some(a), Some(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| eq(x, y)),
        _ => a.default_eq(b),
    }
}
