use casegen_schema::substitute::SubstituteError;
use thiserror::Error as ThisError;

///
/// RuntimeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RuntimeError {
    #[error("record '{record}' takes {expected} values, found {found}")]
    Arity {
        record: String,
        expected: usize,
        found: usize,
    },

    #[error("record '{record}' is generic; instantiate it before constructing values")]
    OpenType { record: String },

    #[error("record '{record}' has no open generic parameters to instantiate")]
    NotOpen { record: String },

    #[error("record '{record}' takes {expected} type arguments, found {found}")]
    TypeArity {
        record: String,
        expected: usize,
        found: usize,
    },

    #[error("type argument '{argument}' for '{parameter}' of record '{record}' {violation}")]
    Constraint {
        record: String,
        parameter: String,
        argument: String,
        violation: ConstraintViolation,
    },

    #[error("record '{record}' has no field '{field}'")]
    UnknownField { record: String, field: String },

    #[error(transparent)]
    Substitute(#[from] SubstituteError),
}

///
/// ConstraintViolation
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum ConstraintViolation {
    #[error("is still generic")]
    Generic,

    #[error("must be a reference type")]
    Reference,

    #[error("must be a non-optional value type")]
    Value,

    #[error("must be equatable")]
    Equatable,
}
