//! Generic substitution.
//!
//! Structural rewrites over `TypeDescriptor` that replace generic parameters
//! while leaving arrays, collection wrappers and concrete arguments intact.

use crate::prelude::*;
use thiserror::Error as ThisError;

///
/// SubstituteError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SubstituteError {
    #[error("generic parameter '{name}' is not declared (declared: [{declared}])")]
    UnknownGenericParameter { name: String, declared: String },

    #[error("generic parameter '{name}' has no counterpart among the record's parameters")]
    MissingRecordParameter { name: String },

    #[error("expected {expected} type arguments, found {found}")]
    ArityMismatch { expected: usize, found: usize },
}

impl SubstituteError {
    fn unknown(name: &str, declared: &[GenericParamSpec]) -> Self {
        Self::UnknownGenericParameter {
            name: name.to_string(),
            declared: declared
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Rebind every factory parameter occurring in `declared` to the record
/// parameter of the same name.
pub fn substitute(
    declared: &TypeDescriptor,
    factory_params: &[GenericParamSpec],
    record_params: &[GenericParamSpec],
) -> Result<TypeDescriptor, SubstituteError> {
    rewrite(declared, &mut |param| {
        if !factory_params.iter().any(|p| p.name == param.name) {
            return Err(SubstituteError::unknown(&param.name, factory_params));
        }

        record_params
            .iter()
            .find(|p| p.name == param.name)
            .map(GenericParamSpec::to_descriptor)
            .ok_or_else(|| SubstituteError::MissingRecordParameter {
                name: param.name.clone(),
            })
    })
}

/// Bind record parameters to concrete type arguments, positionally.
pub fn instantiate(
    declared: &TypeDescriptor,
    record_params: &[GenericParamSpec],
    arguments: &[TypeDescriptor],
) -> Result<TypeDescriptor, SubstituteError> {
    if record_params.len() != arguments.len() {
        return Err(SubstituteError::ArityMismatch {
            expected: record_params.len(),
            found: arguments.len(),
        });
    }

    rewrite(declared, &mut |param| {
        record_params
            .iter()
            .position(|p| p.name == param.name)
            .map(|index| arguments[index].clone())
            .ok_or_else(|| SubstituteError::unknown(&param.name, record_params))
    })
}

/// Clone the factory's parameters so the record owns them. Constraint bounds
/// that mention sibling parameters are rebound as well.
pub fn rebind_parameters(
    factory_params: &[GenericParamSpec],
    record_name: &str,
) -> Result<Vec<GenericParamSpec>, SubstituteError> {
    let owner = GenericOwner::Record(record_name.to_string());
    let shallow = factory_params
        .iter()
        .map(|p| p.rebind(owner.clone()))
        .collect::<Vec<_>>();

    shallow
        .iter()
        .map(|param| {
            let mut rebound = param.clone();
            rebound.constraints.bounds = param
                .constraints
                .bounds
                .iter()
                .map(|bound| substitute(bound, factory_params, &shallow))
                .collect::<Result<_, _>>()?;

            Ok(rebound)
        })
        .collect()
}

// Walk the descriptor, handing every parameter occurrence to `f`.
fn rewrite<E>(
    ty: &TypeDescriptor,
    f: &mut impl FnMut(&GenericParamSpec) -> Result<TypeDescriptor, E>,
) -> Result<TypeDescriptor, E> {
    Ok(match ty {
        TypeDescriptor::GenericParameter(param) => f(param)?,

        TypeDescriptor::Concrete(concrete) => {
            let arguments = concrete
                .arguments
                .iter()
                .map(|arg| {
                    Ok(TypeArgument {
                        parameter: arg.parameter.clone(),
                        ty: rewrite(&arg.ty, f)?,
                    })
                })
                .collect::<Result<Vec<_>, E>>()?;

            TypeDescriptor::Concrete(ConcreteType {
                arguments,
                ..concrete.clone()
            })
        }

        TypeDescriptor::Array { element } => TypeDescriptor::array(rewrite(element, f)?),

        TypeDescriptor::Collection(collection) => TypeDescriptor::Collection(CollectionType {
            name: collection.name.clone(),
            element: Box::new(rewrite(&collection.element, f)?),
            homogeneous: collection.homogeneous,
        }),
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn factory_p() -> GenericParamSpec {
        GenericParamSpec::factory("P", "wrap")
    }

    fn record_p() -> GenericParamSpec {
        factory_p().rebind(GenericOwner::Record("Wrap".into()))
    }

    #[test]
    fn array_of_factory_parameter_binds_to_record_parameter() {
        let declared = TypeDescriptor::array(factory_p().to_descriptor());
        let bound = substitute(&declared, &[factory_p()], &[record_p()]).expect("substitute");

        assert_eq!(bound, TypeDescriptor::array(record_p().to_descriptor()));
        assert_ne!(bound, declared);
    }

    #[test]
    fn deep_nesting_is_rewritten_everywhere() {
        let q = GenericParamSpec::factory("Q", "wrap");
        let record_q = q.rebind(GenericOwner::Record("Wrap".into()));
        let declared = TypeDescriptor::array(TypeDescriptor::collection(
            "Seq",
            TypeDescriptor::reference("Map")
                .with_argument("K", factory_p().to_descriptor())
                .with_argument("V", TypeDescriptor::array(q.to_descriptor())),
        ));

        let bound = substitute(&declared, &[factory_p(), q], &[record_p(), record_q.clone()])
            .expect("substitute");
        let owners = bound
            .generic_parameters()
            .into_iter()
            .map(|p| p.owner.clone())
            .collect::<Vec<_>>();

        assert_eq!(owners, vec![GenericOwner::Record("Wrap".into()); 2]);
        assert_eq!(bound.to_string(), declared.to_string());
    }

    #[test]
    fn concrete_structure_is_left_alone() {
        let declared = TypeDescriptor::reference("Vec").with_argument("T", TypeDescriptor::value("i32"));

        assert_eq!(substitute(&declared, &[], &[]), Ok(declared));
    }

    #[test]
    fn undeclared_parameter_fails_loudly() {
        let stray = GenericParamSpec::factory("X", "wrap").to_descriptor();
        let err = substitute(&TypeDescriptor::array(stray), &[factory_p()], &[record_p()])
            .expect_err("must fail");

        assert_eq!(
            err,
            SubstituteError::UnknownGenericParameter {
                name: "X".into(),
                declared: "P".into(),
            }
        );
    }

    #[test]
    fn missing_record_counterpart_fails() {
        let err = substitute(&factory_p().to_descriptor(), &[factory_p()], &[])
            .expect_err("must fail");

        assert!(matches!(err, SubstituteError::MissingRecordParameter { .. }));
    }

    #[test]
    fn instantiate_binds_positionally() {
        let declared = TypeDescriptor::array(record_p().to_descriptor());

        assert_eq!(
            instantiate(&declared, &[record_p()], &[TypeDescriptor::value("i32")]),
            Ok(TypeDescriptor::array(TypeDescriptor::value("i32")))
        );
        assert_eq!(
            instantiate(&declared, &[record_p()], &[]),
            Err(SubstituteError::ArityMismatch {
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn rebinding_clones_constraints_and_bounds() {
        let u = GenericParamSpec::factory("U", "f").equatable();
        let t = GenericParamSpec::factory("T", "f")
            .value_constrained()
            .with_bound(u.to_descriptor());

        let rebound = rebind_parameters(&[t, u], "F").expect("rebind");
        let owner = GenericOwner::Record("F".into());

        assert!(rebound.iter().all(|p| p.owner == owner));
        assert!(rebound[0].constraints.value);
        assert_eq!(
            rebound[0].constraints.bounds,
            vec![rebound[1].to_descriptor()]
        );
    }
}
