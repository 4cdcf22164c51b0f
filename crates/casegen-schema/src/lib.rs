pub mod build;
pub mod classify;
pub mod error;
pub mod node;
pub mod resolve;
pub mod substitute;
pub mod synthesize;
pub mod types;
pub mod validate;
pub mod variety;

/// Maximum length for record and factory identifiers.
pub const MAX_RECORD_NAME_LEN: usize = 64;

/// Maximum length for field and generic parameter identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

use crate::{
    build::BuildError, classify::ClassifyError, substitute::SubstituteError,
    synthesize::SynthesisError,
};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        classify::classify,
        err,
        error::ErrorTree,
        node::*,
        resolve::{BuiltinResolver, CapabilityResolver, CollectionShape, DescriptorResolver},
        substitute::{instantiate, substitute},
        synthesize::{RecordNaming, SynthesisOptions, Synthesizer},
        types::{
            CollectionType, ConcreteType, Constraints, GenericOwner, GenericParamSpec, TypeArgument,
            TypeDescriptor, TypeKind,
        },
        variety::{TypeVariety, VarietyKind},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    ClassifyError(#[from] ClassifyError),

    #[error(transparent)]
    SubstituteError(#[from] SubstituteError),

    #[error(transparent)]
    SynthesisError(#[from] SynthesisError),
}
