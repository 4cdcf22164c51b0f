use crate::prelude::*;
use derive_more::{Display, FromStr};
use std::fmt;

///
/// TypeDescriptor
///
/// Describes a declared type structurally, without resolving it to a runtime
/// type. Descriptors mirror static type syntax, so nesting is always finite
/// and acyclic.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeDescriptor {
    GenericParameter(GenericParamSpec),
    Concrete(ConcreteType),
    Array { element: Box<Self> },
    Collection(CollectionType),
}

impl TypeDescriptor {
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Concrete(ConcreteType::new(name, TypeKind::Reference))
    }

    #[must_use]
    pub fn value(name: impl Into<String>) -> Self {
        Self::Concrete(ConcreteType::new(name, TypeKind::Value))
    }

    /// Optional wrapper around a value type; the wrapped type is argument `T`.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Concrete(ConcreteType::new("Option", TypeKind::OptionalValue).with_argument("T", inner))
    }

    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    #[must_use]
    pub fn collection(name: impl Into<String>, element: Self) -> Self {
        Self::Collection(CollectionType::new(name, element, true))
    }

    #[must_use]
    pub fn untyped_collection(name: impl Into<String>, element: Self) -> Self {
        Self::Collection(CollectionType::new(name, element, false))
    }

    #[must_use]
    pub const fn parameter(param: GenericParamSpec) -> Self {
        Self::GenericParameter(param)
    }

    /// Mark a concrete descriptor as implementing the equatable capability.
    /// Other shapes are returned unchanged.
    #[must_use]
    pub fn equatable(self) -> Self {
        match self {
            Self::Concrete(concrete) => Self::Concrete(concrete.equatable()),
            other => other,
        }
    }

    /// Append a generic argument to a concrete descriptor.
    #[must_use]
    pub fn with_argument(self, parameter: impl Into<String>, ty: Self) -> Self {
        match self {
            Self::Concrete(concrete) => Self::Concrete(concrete.with_argument(parameter, ty)),
            other => other,
        }
    }

    #[must_use]
    pub const fn as_parameter(&self) -> Option<&GenericParamSpec> {
        match self {
            Self::GenericParameter(param) => Some(param),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_concrete(&self) -> Option<&ConcreteType> {
        match self {
            Self::Concrete(concrete) => Some(concrete),
            _ => None,
        }
    }

    /// Every generic parameter mentioned anywhere in this descriptor, in
    /// syntax order, including parameters nested in arguments and elements.
    #[must_use]
    pub fn generic_parameters(&self) -> Vec<&GenericParamSpec> {
        let mut out = Vec::new();
        self.collect_parameters(&mut out);

        out
    }

    fn collect_parameters<'a>(&'a self, out: &mut Vec<&'a GenericParamSpec>) {
        match self {
            Self::GenericParameter(param) => out.push(param),
            Self::Concrete(concrete) => {
                for arg in &concrete.arguments {
                    arg.ty.collect_parameters(out);
                }
            }
            Self::Array { element } => element.collect_parameters(out),
            Self::Collection(collection) => collection.element.collect_parameters(out),
        }
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters().is_empty()
    }

    /// Whether a value of this type may be null at runtime: reference types,
    /// optionals, arrays, collections and parameters not constrained to value
    /// types.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        match self {
            Self::GenericParameter(param) => !param.constraints.value,
            Self::Concrete(concrete) => !matches!(concrete.kind, TypeKind::Value),
            Self::Array { .. } | Self::Collection(_) => true,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenericParameter(param) => write!(f, "{}", param.name),
            Self::Concrete(concrete) => write!(f, "{concrete}"),
            Self::Array { element } => write!(f, "[{element}]"),
            Self::Collection(collection) => write!(f, "{collection}"),
        }
    }
}

///
/// TypeKind
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    OptionalValue,
    #[default]
    Reference,
    Value,
}

///
/// TypeArgument
/// A generic argument bound to the named parameter of a concrete type's definition.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TypeArgument {
    pub parameter: String,
    pub ty: TypeDescriptor,
}

///
/// ConcreteType
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ConcreteType {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeArgument>,

    #[serde(default)]
    pub kind: TypeKind,

    #[serde(default)]
    pub equatable: bool,
}

impl ConcreteType {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            kind,
            equatable: false,
        }
    }

    #[must_use]
    pub const fn equatable(mut self) -> Self {
        self.equatable = true;
        self
    }

    #[must_use]
    pub fn with_argument(mut self, parameter: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.arguments.push(TypeArgument {
            parameter: parameter.into(),
            ty,
        });
        self
    }

    #[must_use]
    pub fn argument(&self, parameter: &str) -> Option<&TypeDescriptor> {
        self.arguments
            .iter()
            .find(|arg| arg.parameter == parameter)
            .map(|arg| &arg.ty)
    }

    /// The wrapped type of an optional-value type.
    #[must_use]
    pub fn underlying(&self) -> Option<&TypeDescriptor> {
        match self.kind {
            TypeKind::OptionalValue => self.arguments.first().map(|arg| &arg.ty),
            TypeKind::Reference | TypeKind::Value => None,
        }
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.arguments.is_empty() {
            let args = self
                .arguments
                .iter()
                .map(|arg| arg.ty.to_string())
                .collect::<Vec<_>>();
            write!(f, "<{}>", args.join(", "))?;
        }

        Ok(())
    }
}

///
/// CollectionType
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CollectionType {
    pub name: String,
    pub element: Box<TypeDescriptor>,
    pub homogeneous: bool,
}

impl CollectionType {
    #[must_use]
    pub fn new(name: impl Into<String>, element: TypeDescriptor, homogeneous: bool) -> Self {
        Self {
            name: name.into(),
            element: Box::new(element),
            homogeneous,
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.homogeneous {
            write!(f, "{}<{}>", self.name, self.element)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

///
/// GenericOwner
/// The declaration a generic parameter belongs to.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericOwner {
    #[display("type {_0}")]
    Definition(String),

    #[display("fn {_0}")]
    Factory(String),

    #[display("record {_0}")]
    Record(String),
}

///
/// Constraints
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Constraints {
    #[serde(default)]
    pub reference: bool,

    #[serde(default)]
    pub value: bool,

    #[serde(default)]
    pub equatable: bool,

    /// Constraint types; any equatable bound makes the parameter equatable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeDescriptor>,
}

impl Constraints {
    /// Whether the constraint set requires the equatable capability, either
    /// directly or through an equatable bound (checked transitively).
    pub fn require_equatable<R: CapabilityResolver + ?Sized>(&self, resolver: &R) -> bool {
        self.equatable || self.bounds.iter().any(|bound| resolver.is_equatable(bound))
    }
}

///
/// GenericParamSpec
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct GenericParamSpec {
    pub name: String,
    pub owner: GenericOwner,

    #[serde(default)]
    pub constraints: Constraints,
}

impl GenericParamSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, owner: GenericOwner) -> Self {
        Self {
            name: name.into(),
            owner,
            constraints: Constraints::default(),
        }
    }

    #[must_use]
    pub fn factory(name: impl Into<String>, factory: impl Into<String>) -> Self {
        Self::new(name, GenericOwner::Factory(factory.into()))
    }

    #[must_use]
    pub fn definition(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self::new(name, GenericOwner::Definition(definition.into()))
    }

    #[must_use]
    pub const fn reference_constrained(mut self) -> Self {
        self.constraints.reference = true;
        self
    }

    #[must_use]
    pub const fn value_constrained(mut self) -> Self {
        self.constraints.value = true;
        self
    }

    #[must_use]
    pub const fn equatable(mut self) -> Self {
        self.constraints.equatable = true;
        self
    }

    #[must_use]
    pub fn with_bound(mut self, bound: TypeDescriptor) -> Self {
        self.constraints.bounds.push(bound);
        self
    }

    /// Clone with a new owner. Constraint bounds are left untouched; callers
    /// that need bounds rebound go through `substitute`.
    #[must_use]
    pub fn rebind(&self, owner: GenericOwner) -> Self {
        Self {
            name: self.name.clone(),
            owner,
            constraints: self.constraints.clone(),
        }
    }

    #[must_use]
    pub fn to_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::GenericParameter(self.clone())
    }
}

impl fmt::Display for GenericParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

///
/// TESTS
///
