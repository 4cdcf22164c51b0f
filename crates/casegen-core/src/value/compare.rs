use crate::value::{Object, Value};
use std::sync::Arc;

impl Value {
    /// Platform default equality: structural for scalars, text, lists and
    /// records; objects by state only when they are equatable, otherwise by
    /// identity.
    #[must_use]
    pub fn default_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => {
                if a.equatable && b.equatable {
                    object_state_eq(a, b)
                } else {
                    Arc::ptr_eq(a, b)
                }
            }
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.default_eq(y))
            }
            _ => scalar_eq(self, other),
        }
    }

    /// Equality through the value's own equatable capability. Objects are
    /// compared by state; a value without the capability falls back to
    /// default equality.
    #[must_use]
    pub fn equatable_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) if a.equatable && b.equatable => {
                object_state_eq(a, b)
            }
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equatable_eq(y))
            }
            _ => self.default_eq(other),
        }
    }
}

fn object_state_eq(a: &Object, b: &Object) -> bool {
    a.type_name == b.type_name && a.state.equatable_eq(&b.state)
}

fn scalar_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Char(a), Value::Char(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Uint(a), Value::Uint(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => float_eq(*a, *b),
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Record(a), Value::Record(b)) => a == b,
        _ => false,
    }
}

// NaN equals NaN so equality stays reflexive; -0.0 equals 0.0.
#[allow(clippy::float_cmp)]
fn float_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}
