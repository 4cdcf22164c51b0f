use casegen_config::ConfigError;
use casegen_core::RuntimeError;
use casegen_schema::{
    Error as SchemaError, build::BuildError, classify::ClassifyError,
    substitute::SubstituteError, synthesize::SynthesisError,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(what: &str, name: &str) -> Self {
        Self::new(
            ErrorKind::NotFound,
            ErrorOrigin::Session,
            format!("no {what} named '{name}'"),
        )
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::Io { .. } => ConfigErrorKind::Unreadable,
            ConfigError::Parse(_) => ConfigErrorKind::Malformed,
            ConfigError::Invalid(_) => ConfigErrorKind::Invalid,
        };

        Self::new(ErrorKind::Config(kind), ErrorOrigin::Config, err.to_string())
    }
}

impl From<ClassifyError> for Error {
    fn from(err: ClassifyError) -> Self {
        Self::new(
            ErrorKind::Synthesis(SynthesisErrorKind::Malformed),
            ErrorOrigin::Classify,
            err.to_string(),
        )
    }
}

impl From<SubstituteError> for Error {
    fn from(err: SubstituteError) -> Self {
        Self::new(
            ErrorKind::Synthesis(SynthesisErrorKind::UnboundGeneric),
            ErrorOrigin::Substitute,
            err.to_string(),
        )
    }
}

impl From<SynthesisError> for Error {
    fn from(err: SynthesisError) -> Self {
        let (kind, origin) = match &err {
            SynthesisError::Validation { .. } => {
                (SynthesisErrorKind::Invalid, ErrorOrigin::Validate)
            }
            SynthesisError::Generics { .. } | SynthesisError::Substitute { .. } => {
                (SynthesisErrorKind::UnboundGeneric, ErrorOrigin::Substitute)
            }
            SynthesisError::Classify { .. } => (SynthesisErrorKind::Malformed, ErrorOrigin::Classify),
        };

        Self::new(ErrorKind::Synthesis(kind), origin, err.to_string())
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::DuplicateRecord { .. } => Self::new(
                ErrorKind::Conflict,
                ErrorOrigin::Build,
                err.to_string(),
            ),
            BuildError::Synthesis(err) => err.into(),
        }
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::BuildError(err) => err.into(),
            SchemaError::ClassifyError(err) => err.into(),
            SchemaError::SubstituteError(err) => err.into(),
            SchemaError::SynthesisError(err) => err.into(),
        }
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        let kind = match &err {
            RuntimeError::Arity { .. } | RuntimeError::TypeArity { .. } => RuntimeErrorKind::Arity,
            RuntimeError::OpenType { .. } | RuntimeError::NotOpen { .. } => {
                RuntimeErrorKind::Instantiation
            }
            RuntimeError::Constraint { .. } => RuntimeErrorKind::ConstraintViolation,
            RuntimeError::UnknownField { .. } => RuntimeErrorKind::UnknownField,
            RuntimeError::Substitute(_) => RuntimeErrorKind::Instantiation,
        };

        Self::new(ErrorKind::Runtime(kind), ErrorOrigin::Runtime, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and build scripts.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Config(ConfigErrorKind),
    Synthesis(SynthesisErrorKind),
    Runtime(RuntimeErrorKind),

    /// Two factories request the same record name.
    Conflict,

    /// No record type or factory by that name in the session.
    NotFound,
}

///
/// ConfigErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ConfigErrorKind {
    Unreadable,
    Malformed,
    Invalid,
}

///
/// SynthesisErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SynthesisErrorKind {
    /// Names, duplicates or ordinals in the signature are invalid.
    Invalid,

    /// A declared type has an impossible shape.
    Malformed,

    /// A generic parameter has no binding on the record.
    UnboundGeneric,
}

///
/// RuntimeErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RuntimeErrorKind {
    Arity,
    Instantiation,
    ConstraintViolation,
    UnknownField,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Build,
    Classify,
    Config,
    Runtime,
    Session,
    Substitute,
    Validate,
}

///
/// TESTS
///
