//! Variety classification.
//!
//! Priority order, first match wins:
//! 1. generic parameters classify by their constraint set;
//! 2. arrays are always typed collections of their element;
//! 3. optional value types classify by their wrapped type;
//! 4. plain value types classify by equatability;
//! 5. reference types: equatable, then typed collection, then untyped
//!    collection, then plain reference.
//!
//! Equatability outranks collection-ness in step 5. A type that is both
//! equatable and enumerable is compared as an equatable scalar.

use crate::prelude::*;
use thiserror::Error as ThisError;

///
/// ClassifyError
/// Malformed type shapes; well-formed descriptors always classify.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ClassifyError {
    #[error(
        "generic parameter '{parameter}' of {owner} is constrained to both reference and value types"
    )]
    ConflictingConstraints {
        parameter: String,
        owner: GenericOwner,
    },

    #[error("optional value type '{name}' does not declare the type it wraps")]
    MissingUnderlyingType { name: String },

    #[error(
        "collection '{collection}' enumerates its parameter '{parameter}' but the declared type binds no such argument"
    )]
    UnboundElement {
        collection: String,
        parameter: String,
    },
}

/// Classify a declared type into its `TypeVariety`.
pub fn classify<R: CapabilityResolver + ?Sized>(
    descriptor: &TypeDescriptor,
    resolver: &R,
) -> Result<TypeVariety, ClassifyError> {
    let variety = match descriptor {
        TypeDescriptor::GenericParameter(param) => classify_parameter(param, resolver)?,
        TypeDescriptor::Array { element } => TypeVariety::TypedCollection(element.clone()),
        TypeDescriptor::Concrete(concrete) => classify_concrete(descriptor, concrete, resolver)?,
        TypeDescriptor::Collection(collection) => {
            classify_collection(descriptor, collection, resolver)
        }
    };

    debug_assert_eq!(
        descriptor.is_nullable(),
        variety.kind().is_nullable(),
        "variety {} contradicts the null handling of '{descriptor}'",
        variety.kind(),
    );
    tracing::trace!(ty = %descriptor, variety = %variety.kind(), "classified field type");

    Ok(variety)
}

// Parameters are classified from their constraints, never from whatever
// type they may later be bound to.
fn classify_parameter<R: CapabilityResolver + ?Sized>(
    param: &GenericParamSpec,
    resolver: &R,
) -> Result<TypeVariety, ClassifyError> {
    let constraints = &param.constraints;
    if constraints.reference && constraints.value {
        return Err(ClassifyError::ConflictingConstraints {
            parameter: param.name.clone(),
            owner: param.owner.clone(),
        });
    }

    let equatable = constraints.require_equatable(resolver);
    let ty = param.to_descriptor();

    let variety = match (constraints.reference, constraints.value, equatable) {
        (true, _, true) => TypeVariety::ReferenceEquatable(ty),
        (true, _, false) => TypeVariety::PlainReference(ty),
        (false, true, true) => TypeVariety::ValueEquatable(ty),
        (false, true, false) => TypeVariety::PlainValue(ty),
        (false, false, true) => TypeVariety::GenericEquatable(param.clone()),
        (false, false, false) => TypeVariety::PlainGeneric(param.clone()),
    };

    Ok(variety)
}

fn classify_concrete<R: CapabilityResolver + ?Sized>(
    descriptor: &TypeDescriptor,
    concrete: &ConcreteType,
    resolver: &R,
) -> Result<TypeVariety, ClassifyError> {
    match concrete.kind {
        TypeKind::OptionalValue => {
            let underlying =
                concrete
                    .underlying()
                    .ok_or_else(|| ClassifyError::MissingUnderlyingType {
                        name: concrete.name.clone(),
                    })?;

            Ok(if resolver.is_equatable(underlying) {
                TypeVariety::OptionalEquatable(underlying.clone())
            } else {
                TypeVariety::PlainOptional(underlying.clone())
            })
        }

        TypeKind::Value => Ok(if resolver.is_equatable(descriptor) {
            TypeVariety::ValueEquatable(descriptor.clone())
        } else {
            TypeVariety::PlainValue(descriptor.clone())
        }),

        TypeKind::Reference => {
            if resolver.is_equatable(descriptor) {
                return Ok(TypeVariety::ReferenceEquatable(descriptor.clone()));
            }

            match resolver.collection_of(concrete) {
                Some(CollectionShape::Typed(element)) => Ok(TypeVariety::TypedCollection(
                    Box::new(bind_element(concrete, element)?),
                )),
                Some(CollectionShape::Untyped) => Ok(TypeVariety::UntypedCollection),
                None => Ok(TypeVariety::PlainReference(descriptor.clone())),
            }
        }
    }
}

fn classify_collection<R: CapabilityResolver + ?Sized>(
    descriptor: &TypeDescriptor,
    collection: &CollectionType,
    resolver: &R,
) -> TypeVariety {
    if resolver.is_equatable(descriptor) {
        TypeVariety::ReferenceEquatable(descriptor.clone())
    } else if collection.homogeneous {
        TypeVariety::TypedCollection(collection.element.clone())
    } else {
        TypeVariety::UntypedCollection
    }
}

// An element reported as a parameter of the collection's own definition is
// replaced by the argument the declared type supplies for it.
fn bind_element(
    concrete: &ConcreteType,
    element: TypeDescriptor,
) -> Result<TypeDescriptor, ClassifyError> {
    let Some(param) = element.as_parameter() else {
        return Ok(element);
    };
    if !matches!(param.owner, GenericOwner::Definition(_)) {
        return Ok(element);
    }

    concrete
        .argument(&param.name)
        .cloned()
        .ok_or_else(|| ClassifyError::UnboundElement {
            collection: concrete.name.clone(),
            parameter: param.name.clone(),
        })
}

///
/// TESTS
///
