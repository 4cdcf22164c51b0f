//! The `==` / `!=` operator pair over possibly-absent records.

use crate::record::Record;

/// Absent equals absent; absent never equals present.
#[must_use]
pub fn equals(a: Option<&Record>, b: Option<&Record>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.equals(b),
        (None, Some(_)) | (Some(_), None) => false,
    }
}

#[must_use]
pub fn not_equals(a: Option<&Record>, b: Option<&Record>) -> bool {
    !equals(a, b)
}
