//! Record synthesis: from a factory signature to a `RecordTypeDefinition`.

mod plan;

#[cfg(test)]
mod tests;

use crate::{
    classify::ClassifyError,
    prelude::*,
    substitute::{SubstituteError, rebind_parameters},
    validate::{naming::accessor_name, validate_signature},
};
use convert_case::{Case, Casing};
use derive_more::{Display, FromStr};
use thiserror::Error as ThisError;

///
/// SynthesisError
/// Aborts synthesis of one signature only.
///

#[derive(Debug, ThisError)]
pub enum SynthesisError {
    #[error("invalid signature '{factory}': {errors}")]
    Validation { factory: String, errors: ErrorTree },

    #[error("generic parameters of '{factory}': {source}")]
    Generics {
        factory: String,
        source: SubstituteError,
    },

    #[error("field '{field}': {source}")]
    Substitute {
        field: String,
        source: SubstituteError,
    },

    #[error("field '{field}': {source}")]
    Classify {
        field: String,
        source: ClassifyError,
    },
}

///
/// RecordNaming
/// How the record type is named after its factory.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "snake_case")]
pub enum RecordNaming {
    #[default]
    Pascal,
    Verbatim,
}

impl RecordNaming {
    #[must_use]
    pub fn apply(self, factory: &str) -> String {
        match self {
            Self::Pascal => factory.to_case(Case::Pascal),
            Self::Verbatim => factory.to_string(),
        }
    }
}

///
/// SynthesisOptions
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SynthesisOptions {
    pub naming: RecordNaming,

    /// Reject Rust keywords as record, field and parameter names.
    pub check_reserved: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            naming: RecordNaming::default(),
            check_reserved: true,
        }
    }
}

///
/// Synthesizer
///
/// Holds the capability resolver and options; each call synthesizes one
/// signature independently and keeps no state between calls.
///

#[derive(Clone, Debug, Default)]
pub struct Synthesizer<R> {
    resolver: R,
    options: SynthesisOptions,
}

impl<R: CapabilityResolver> Synthesizer<R> {
    #[must_use]
    pub const fn new(resolver: R, options: SynthesisOptions) -> Self {
        Self { resolver, options }
    }

    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    pub const fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    #[must_use]
    pub fn record_name(&self, factory: &str) -> String {
        self.options.naming.apply(factory)
    }

    /// Validate, rebind generics, substitute and classify every field, then
    /// build the definition.
    pub fn synthesize(
        &self,
        signature: &FactorySignature,
    ) -> Result<RecordTypeDefinition, SynthesisError> {
        let record_name = self.prepare(signature)?;
        let record_params = rebind(signature, &record_name)?;

        let fields = signature
            .parameters
            .iter()
            .map(|spec| {
                let bound = bind_field(spec, signature, &record_params)?;
                let variety = classify(&bound.declared_type, &self.resolver).map_err(|source| {
                    SynthesisError::Classify {
                        field: spec.name.clone(),
                        source,
                    }
                })?;

                Ok(ClassifiedField::new(bound, variety))
            })
            .collect::<Result<Vec<_>, SynthesisError>>()?;

        self.assemble(signature, record_name, record_params, fields)
    }

    /// Synthesize from fields the host has already classified. Variety
    /// payloads are rebound to the record's parameters along with the
    /// declared types.
    pub fn synthesize_classified(
        &self,
        factory: &str,
        fields: &[ClassifiedField],
        factory_params: &[GenericParamSpec],
    ) -> Result<RecordTypeDefinition, SynthesisError> {
        let signature = FactorySignature {
            name: factory.to_string(),
            generic_parameters: factory_params.to_vec(),
            parameters: fields.iter().map(|f| f.spec.clone()).collect(),
        };
        let record_name = self.prepare(&signature)?;
        let record_params = rebind(&signature, &record_name)?;

        let fields = fields
            .iter()
            .map(|field| {
                let bound = bind_field(&field.spec, &signature, &record_params)?;
                let variety = field
                    .variety
                    .clone()
                    .try_map_types(|ty| substitute(ty, factory_params, &record_params))
                    .map_err(|source| SynthesisError::Substitute {
                        field: field.spec.name.clone(),
                        source,
                    })?;

                Ok(ClassifiedField::new(bound, variety))
            })
            .collect::<Result<Vec<_>, SynthesisError>>()?;

        self.assemble(&signature, record_name, record_params, fields)
    }

    fn prepare(&self, signature: &FactorySignature) -> Result<String, SynthesisError> {
        let record_name = self.record_name(&signature.name);
        validate_signature(signature, &record_name, self.options.check_reserved).map_err(
            |errors| SynthesisError::Validation {
                factory: signature.name.clone(),
                errors,
            },
        )?;

        Ok(record_name)
    }

    fn assemble(
        &self,
        signature: &FactorySignature,
        record_name: String,
        record_params: Vec<GenericParamSpec>,
        fields: Vec<ClassifiedField>,
    ) -> Result<RecordTypeDefinition, SynthesisError> {
        let equality = fields
            .iter()
            .map(|field| {
                plan::compile_comparison(&field.variety, &self.resolver)
                    .map(|comparison| FieldEquality {
                        field: field.spec.name.clone(),
                        comparison,
                    })
                    .map_err(|source| SynthesisError::Classify {
                        field: field.spec.name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let def = RecordTypeDefinition {
            hash: plan::hash_plan(&fields),
            rendering: plan::render_plan(&record_name, &fields),
            rewrite: plan::factory_rewrite(signature, &record_name),
            constructor: fields
                .iter()
                .map(|f| ConstructorParameter {
                    name: f.spec.name.clone(),
                    ty: f.spec.declared_type.clone(),
                })
                .collect(),
            fields: fields.into_iter().map(synthesized_field).collect(),
            equality,
            generic_parameters: record_params,
            name: record_name,
        };

        tracing::debug!(
            record = %def.name,
            factory = %signature.name,
            fields = def.fields.len(),
            generic = def.is_generic(),
            "synthesized record type"
        );

        Ok(def)
    }
}

fn rebind(
    signature: &FactorySignature,
    record_name: &str,
) -> Result<Vec<GenericParamSpec>, SynthesisError> {
    rebind_parameters(&signature.generic_parameters, record_name).map_err(|source| {
        SynthesisError::Generics {
            factory: signature.name.clone(),
            source,
        }
    })
}

// Rebind the field's declared type to the record's parameters.
fn bind_field(
    spec: &FieldSpecification,
    signature: &FactorySignature,
    record_params: &[GenericParamSpec],
) -> Result<FieldSpecification, SynthesisError> {
    let declared_type = substitute(
        &spec.declared_type,
        &signature.generic_parameters,
        record_params,
    )
    .map_err(|source| SynthesisError::Substitute {
        field: spec.name.clone(),
        source,
    })?;

    Ok(FieldSpecification {
        declared_type,
        ..spec.clone()
    })
}

fn synthesized_field(field: ClassifiedField) -> SynthesizedField {
    let ClassifiedField { spec, variety } = field;

    SynthesizedField {
        accessor: accessor_name(&spec.name),
        name: spec.name,
        backing_storage_type: spec.declared_type,
        variety,
        ordinal_index: spec.ordinal_index,
    }
}
