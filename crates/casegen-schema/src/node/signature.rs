use crate::prelude::*;

///
/// FactorySignature
///
/// A constructor-like function that requests a synthesized record: its
/// name, its own generic parameters and its parameters in declaration order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FactorySignature {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_parameters: Vec<GenericParamSpec>,

    #[serde(default)]
    pub parameters: Vec<FieldSpecification>,
}

impl FactorySignature {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Declare a generic parameter owned by this factory.
    #[must_use]
    pub fn with_generic(mut self, name: impl Into<String>) -> Self {
        let param = GenericParamSpec::factory(name, self.name.clone());
        self.generic_parameters.push(param);
        self
    }

    #[must_use]
    pub fn with_generic_spec(mut self, param: GenericParamSpec) -> Self {
        self.generic_parameters.push(param);
        self
    }

    /// Append a parameter; its ordinal index is its position.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        let index = self.parameters.len();
        self.parameters.push(FieldSpecification::new(name, ty, index));
        self
    }

    /// Look up a declared generic parameter by name.
    #[must_use]
    pub fn generic(&self, name: &str) -> Option<&GenericParamSpec> {
        self.generic_parameters.iter().find(|p| p.name == name)
    }
}

///
/// FieldSpecification
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FieldSpecification {
    pub name: String,
    pub declared_type: TypeDescriptor,
    pub ordinal_index: usize,
}

impl FieldSpecification {
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: TypeDescriptor, ordinal_index: usize) -> Self {
        Self {
            name: name.into(),
            declared_type,
            ordinal_index,
        }
    }
}

///
/// ClassifiedField
/// A field a host has already classified, for `Synthesizer::synthesize_classified`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClassifiedField {
    pub spec: FieldSpecification,
    pub variety: TypeVariety,
}

impl ClassifiedField {
    #[must_use]
    pub const fn new(spec: FieldSpecification, variety: TypeVariety) -> Self {
        Self { spec, variety }
    }
}
