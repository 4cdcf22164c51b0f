use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// TypeVariety
///
/// Semantic classification of a field type. The tag decides which equality,
/// hash and null-handling rules a synthesized field receives; the payload is
/// the minimal type information needed to synthesize them.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "variety", content = "ty", rename_all = "snake_case")]
pub enum TypeVariety {
    ReferenceEquatable(TypeDescriptor),
    PlainReference(TypeDescriptor),
    ValueEquatable(TypeDescriptor),
    PlainValue(TypeDescriptor),
    OptionalEquatable(TypeDescriptor),
    PlainOptional(TypeDescriptor),
    GenericEquatable(GenericParamSpec),
    PlainGeneric(GenericParamSpec),
    TypedCollection(Box<TypeDescriptor>),
    UntypedCollection,
}

impl TypeVariety {
    #[must_use]
    pub const fn kind(&self) -> VarietyKind {
        match self {
            Self::ReferenceEquatable(_) => VarietyKind::ReferenceEquatable,
            Self::PlainReference(_) => VarietyKind::PlainReference,
            Self::ValueEquatable(_) => VarietyKind::ValueEquatable,
            Self::PlainValue(_) => VarietyKind::PlainValue,
            Self::OptionalEquatable(_) => VarietyKind::OptionalEquatable,
            Self::PlainOptional(_) => VarietyKind::PlainOptional,
            Self::GenericEquatable(_) => VarietyKind::GenericEquatable,
            Self::PlainGeneric(_) => VarietyKind::PlainGeneric,
            Self::TypedCollection(_) => VarietyKind::TypedCollection,
            Self::UntypedCollection => VarietyKind::UntypedCollection,
        }
    }

    /// Element type of a typed collection.
    #[must_use]
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::TypedCollection(element) => Some(element),
            _ => None,
        }
    }

    /// Rewrite every type carried in the payload.
    pub fn try_map_types<E>(
        self,
        mut f: impl FnMut(&TypeDescriptor) -> Result<TypeDescriptor, E>,
    ) -> Result<Self, E> {
        let remap_param = |param: &GenericParamSpec,
                           f: &mut dyn FnMut(&TypeDescriptor) -> Result<TypeDescriptor, E>|
         -> Result<GenericParamSpec, E> {
            match f(&param.to_descriptor())? {
                TypeDescriptor::GenericParameter(mapped) => Ok(mapped),
                // a parameter mapped onto a concrete type keeps its own spec
                _ => Ok(param.clone()),
            }
        };

        Ok(match self {
            Self::ReferenceEquatable(ty) => Self::ReferenceEquatable(f(&ty)?),
            Self::PlainReference(ty) => Self::PlainReference(f(&ty)?),
            Self::ValueEquatable(ty) => Self::ValueEquatable(f(&ty)?),
            Self::PlainValue(ty) => Self::PlainValue(f(&ty)?),
            Self::OptionalEquatable(ty) => Self::OptionalEquatable(f(&ty)?),
            Self::PlainOptional(ty) => Self::PlainOptional(f(&ty)?),
            Self::GenericEquatable(param) => Self::GenericEquatable(remap_param(&param, &mut f)?),
            Self::PlainGeneric(param) => Self::PlainGeneric(remap_param(&param, &mut f)?),
            Self::TypedCollection(element) => Self::TypedCollection(Box::new(f(&element)?)),
            Self::UntypedCollection => Self::UntypedCollection,
        })
    }
}

///
/// VarietyKind
/// Payload-free mirror of `TypeVariety`.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VarietyKind {
    ReferenceEquatable,
    PlainReference,
    ValueEquatable,
    PlainValue,
    OptionalEquatable,
    PlainOptional,
    GenericEquatable,
    PlainGeneric,
    TypedCollection,
    UntypedCollection,
}

impl VarietyKind {
    pub const ALL: [Self; 10] = [
        Self::ReferenceEquatable,
        Self::PlainReference,
        Self::ValueEquatable,
        Self::PlainValue,
        Self::OptionalEquatable,
        Self::PlainOptional,
        Self::GenericEquatable,
        Self::PlainGeneric,
        Self::TypedCollection,
        Self::UntypedCollection,
    ];

    /// Whether the field is compared with explicit null/absence handling.
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        !matches!(self, Self::ValueEquatable | Self::PlainValue)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_display() {
        for kind in VarietyKind::ALL {
            assert_eq!(kind.to_string().parse::<VarietyKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn value_kinds_are_the_only_non_nullable_ones() {
        let non_nullable = VarietyKind::ALL
            .into_iter()
            .filter(|kind| !kind.is_nullable())
            .collect::<Vec<_>>();

        assert_eq!(
            non_nullable,
            [VarietyKind::ValueEquatable, VarietyKind::PlainValue]
        );
    }

    #[test]
    fn map_types_rewrites_generic_payloads() {
        let factory = GenericParamSpec::factory("P", "wrap");
        let record = factory.rebind(GenericOwner::Record("Wrap".into()));
        let variety = TypeVariety::TypedCollection(Box::new(factory.to_descriptor()));

        let mapped = variety
            .try_map_types::<()>(|_| Ok(record.to_descriptor()))
            .expect("infallible");

        assert_eq!(mapped.element(), Some(&record.to_descriptor()));
    }
}
