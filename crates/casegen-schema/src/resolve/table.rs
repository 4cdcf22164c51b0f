use crate::{
    prelude::*,
    resolve::descriptor_is_equatable,
};
use std::collections::BTreeMap;

///
/// CollectionCapability
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionCapability {
    /// Enumerable over the definition parameter with this name.
    Typed { parameter: String },
    Untyped,
}

///
/// Capabilities
/// What a named type implements, as far as classification is concerned.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Capabilities {
    #[serde(default)]
    pub equatable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionCapability>,
}

impl Capabilities {
    #[must_use]
    pub const fn equatable() -> Self {
        Self {
            equatable: true,
            collection: None,
        }
    }

    #[must_use]
    pub fn typed_collection(parameter: impl Into<String>) -> Self {
        Self {
            equatable: false,
            collection: Some(CollectionCapability::Typed {
                parameter: parameter.into(),
            }),
        }
    }

    #[must_use]
    pub const fn untyped_collection() -> Self {
        Self {
            equatable: false,
            collection: Some(CollectionCapability::Untyped),
        }
    }
}

///
/// CapabilityTable
///
/// Name-keyed capability table layered over descriptor flags: a type is
/// equatable when either its descriptor or its table entry says so.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CapabilityTable {
    entries: BTreeMap<String, Capabilities>,
}

impl CapabilityTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or replace the entry for `name`, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, caps: Capabilities) -> Option<Capabilities> {
        self.entries.insert(name.into(), caps)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, caps: Capabilities) -> Self {
        self.insert(name, caps);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Capabilities> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Capabilities)> {
        self.entries.iter().map(|(name, caps)| (name.as_str(), caps))
    }
}

impl CapabilityResolver for CapabilityTable {
    fn is_equatable(&self, ty: &TypeDescriptor) -> bool {
        if descriptor_is_equatable(self, ty) {
            return true;
        }

        match ty {
            TypeDescriptor::Concrete(concrete) => self
                .get(&concrete.name)
                .is_some_and(|caps| caps.equatable),
            _ => false,
        }
    }

    fn collection_of(&self, ty: &ConcreteType) -> Option<CollectionShape> {
        let caps = self.get(&ty.name)?;

        match caps.collection.as_ref()? {
            CollectionCapability::Typed { parameter } => Some(CollectionShape::Typed(
                GenericParamSpec::definition(parameter.clone(), ty.name.clone()).to_descriptor(),
            )),
            CollectionCapability::Untyped => Some(CollectionShape::Untyped),
        }
    }
}

///
/// TESTS
///
