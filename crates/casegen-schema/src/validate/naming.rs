use crate::{MAX_FIELD_NAME_LEN, MAX_RECORD_NAME_LEN, validate::reserved::is_reserved_word};
use convert_case::{Case, Casing};

/// The snake_case accessor a field is reachable under.
#[must_use]
pub fn accessor_name(field: &str) -> String {
    field.to_case(Case::Snake)
}

/// Ensure an identifier is non-empty, within bounds and, when asked, not a
/// reserved keyword.
pub(crate) fn validate_ident(ident: &str, check_reserved: bool) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }
    if ident.len() > MAX_FIELD_NAME_LEN {
        return Err(format!(
            "ident '{ident}' exceeds max length {MAX_FIELD_NAME_LEN}"
        ));
    }
    if check_reserved && is_reserved_word(ident) {
        return Err(format!("the word '{ident}' is reserved"));
    }

    Ok(())
}

/// Ensure record names are non-empty, ASCII, and within the maximum length.
pub(crate) fn validate_record_name(name: &str, check_reserved: bool) -> Result<(), String> {
    if name.is_empty() {
        return Err("record name is empty".to_string());
    }
    if name.len() > MAX_RECORD_NAME_LEN {
        return Err(format!(
            "record name '{name}' exceeds max length {MAX_RECORD_NAME_LEN}"
        ));
    }
    if !name.is_ascii() {
        return Err(format!("record name '{name}' must be ASCII"));
    }
    if check_reserved && is_reserved_word(name) {
        return Err(format!("the word '{name}' is reserved"));
    }

    Ok(())
}
