//! Signature validation ahead of synthesis.

pub mod naming;
pub mod reserved;

use crate::prelude::*;
use naming::{accessor_name, validate_ident, validate_record_name};
use std::collections::{BTreeMap, BTreeSet};

/// Validate one factory signature and the record name derived from it,
/// aggregating every problem instead of stopping at the first.
pub(crate) fn validate_signature(
    signature: &FactorySignature,
    record_name: &str,
    check_reserved: bool,
) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    if let Err(e) = validate_ident(&signature.name, false) {
        err!(errs, "factory: {e}");
    }
    if let Err(e) = validate_record_name(record_name, check_reserved) {
        errs.add(e);
    }

    validate_generics(signature, check_reserved, &mut errs);
    validate_fields(signature, check_reserved, &mut errs);

    errs.result()
}

fn validate_generics(signature: &FactorySignature, check_reserved: bool, errs: &mut ErrorTree) {
    let owner = GenericOwner::Factory(signature.name.clone());
    let mut seen = BTreeSet::new();

    for param in &signature.generic_parameters {
        let route = format!("<{}>", param.name);

        if let Err(e) = validate_ident(&param.name, check_reserved) {
            errs.add_for(&route, e);
        }
        if !seen.insert(param.name.as_str()) {
            errs.add_for(&route, format!("duplicate generic parameter '{}'", param.name));
        }
        if param.owner != owner {
            errs.add_for(
                &route,
                format!("generic parameter '{}' is owned by {}, not {owner}", param.name, param.owner),
            );
        }
    }
}

fn validate_fields(signature: &FactorySignature, check_reserved: bool, errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();
    let mut accessors: BTreeMap<String, &str> = BTreeMap::new();

    for (position, field) in signature.parameters.iter().enumerate() {
        let route = if field.name.is_empty() {
            format!("#{position}")
        } else {
            field.name.clone()
        };

        if let Err(e) = validate_ident(&field.name, check_reserved) {
            errs.add_for(&route, e);
        }
        if !field.name.is_empty() && !seen.insert(field.name.as_str()) {
            errs.add_for(&route, format!("duplicate field '{}'", field.name));
        } else if !field.name.is_empty() {
            let accessor = accessor_name(&field.name);
            if let Some(other) = accessors.get(&accessor) {
                errs.add_for(
                    &route,
                    format!("accessor '{accessor}' is already taken by field '{other}'"),
                );
            } else {
                accessors.insert(accessor, field.name.as_str());
            }
        }
        if field.ordinal_index != position {
            errs.add_for(
                &route,
                format!(
                    "ordinal index {} does not match position {position}",
                    field.ordinal_index
                ),
            );
        }
    }
}

///
/// TESTS
///
