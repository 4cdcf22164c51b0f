use crate::{classify::ClassifyError, prelude::*};

// Derive the equality check for one variety. Typed collections classify
// their element so each element is compared by its own variety.
pub(super) fn compile_comparison<R: CapabilityResolver + ?Sized>(
    variety: &TypeVariety,
    resolver: &R,
) -> Result<Comparison, ClassifyError> {
    let nullable = variety.kind().is_nullable();

    Ok(match variety {
        TypeVariety::ReferenceEquatable(_)
        | TypeVariety::ValueEquatable(_)
        | TypeVariety::GenericEquatable(_) => Comparison::Equatable { nullable },

        TypeVariety::PlainReference(_) | TypeVariety::PlainValue(_) | TypeVariety::PlainGeneric(_) => {
            Comparison::Default { nullable }
        }

        TypeVariety::OptionalEquatable(_) => Comparison::Optional { equatable: true },
        TypeVariety::PlainOptional(_) => Comparison::Optional { equatable: false },

        TypeVariety::TypedCollection(element) => {
            let element_variety = classify(element, resolver)?;

            Comparison::Sequence {
                element: Box::new(compile_comparison(&element_variety, resolver)?),
            }
        }

        TypeVariety::UntypedCollection => Comparison::UntypedSequence,
    })
}

pub(super) fn hash_plan(fields: &[ClassifiedField]) -> HashPlan {
    let steps = fields
        .iter()
        .map(|field| HashStep {
            field: field.spec.name.clone(),
            contribution: if field.variety.kind().is_nullable() {
                HashContribution::Referenced
            } else {
                HashContribution::Intrinsic
            },
        })
        .collect();

    HashPlan::new(steps)
}

pub(super) fn render_plan(record_name: &str, fields: &[ClassifiedField]) -> RenderPlan {
    RenderPlan {
        type_name: record_name.to_string(),
        fields: fields.iter().map(|f| f.spec.name.clone()).collect(),
    }
}

pub(super) fn factory_rewrite(signature: &FactorySignature, record_name: &str) -> FactoryRewrite {
    FactoryRewrite {
        factory: signature.name.clone(),
        record: record_name.to_string(),
        type_arguments: signature
            .generic_parameters
            .iter()
            .map(|p| p.name.clone())
            .collect(),
        arguments: signature.parameters.iter().map(|p| p.name.clone()).collect(),
    }
}
