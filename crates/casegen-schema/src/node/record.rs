use crate::prelude::*;

///
/// SynthesizedField
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SynthesizedField {
    pub name: String,
    pub accessor: String,

    /// Record-bound storage type; factory parameters are already rebound.
    pub backing_storage_type: TypeDescriptor,
    pub variety: TypeVariety,
    pub ordinal_index: usize,
}

///
/// RecordTypeDefinition
///
/// One-shot build artifact handed to the host for materialization. Fields,
/// constructor parameters, equality, hash and rendering all follow
/// declaration order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RecordTypeDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_parameters: Vec<GenericParamSpec>,

    pub fields: Vec<SynthesizedField>,
    pub constructor: Vec<ConstructorParameter>,
    pub equality: Vec<FieldEquality>,
    pub hash: HashPlan,
    pub rendering: RenderPlan,
    pub rewrite: FactoryRewrite,
}

impl RecordTypeDefinition {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SynthesizedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }
}
