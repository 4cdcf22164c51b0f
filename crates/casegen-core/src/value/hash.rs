use crate::value::{Object, Value};
use casegen_schema::node::{HASH_MULTIPLIER, HASH_SEED};
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

/// Stable 64-bit hash of text content.
#[must_use]
pub fn hash_text(text: &str) -> u64 {
    xxh3_64(text.as_bytes())
}

impl Value {
    /// Hash consistent with `default_eq`; null hashes to zero.
    #[must_use]
    pub fn default_hash(&self) -> u64 {
        match self {
            Self::Object(object) => {
                if object.equatable {
                    object_state_hash(object)
                } else {
                    identity_hash(object)
                }
            }
            Self::List(items) => combine(items.iter().map(Self::default_hash)),
            _ => scalar_hash(self),
        }
    }

    /// Hash consistent with `equatable_eq`.
    #[must_use]
    pub fn equatable_hash(&self) -> u64 {
        match self {
            Self::List(items) => combine(items.iter().map(Self::equatable_hash)),
            _ => self.default_hash(),
        }
    }
}

/// Fold element hashes with the record hash constants.
pub(crate) fn combine(hashes: impl IntoIterator<Item = u64>) -> u64 {
    hashes.into_iter().fold(HASH_SEED, |hash, h| {
        hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(h)
    })
}

fn object_state_hash(object: &Object) -> u64 {
    combine([hash_text(&object.type_name), object.state.equatable_hash()])
}

fn identity_hash(object: &Arc<Object>) -> u64 {
    Arc::as_ptr(object) as usize as u64
}

#[allow(clippy::cast_sign_loss)]
fn scalar_hash(value: &Value) -> u64 {
    match value {
        Value::Null => 0,
        Value::Bool(v) => u64::from(*v),
        Value::Char(v) => u64::from(*v),
        Value::Int(v) => *v as u64,
        Value::Uint(v) => *v,
        Value::Float(v) => float_bits(*v),
        Value::Text(v) => hash_text(v),
        Value::Record(record) => record.hash_code(),
        Value::List(_) | Value::Object(_) => value.default_hash(),
    }
}

// Canonical bits: every NaN hashes alike and -0.0 hashes as 0.0.
#[allow(clippy::float_cmp)]
fn float_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}
