//! ## Crate layout
//! - `config`: TOML configuration and the capability table it declares.
//! - `core`: runtime record types, dynamic values, equality and hashing.
//! - `schema`: type descriptors, classification, substitution and synthesis.
//! - `error`: the public error taxonomy shared by all layers.
//!
//! `Casegen` ties them together: a session that synthesizes factory
//! signatures and materializes the resulting record types.

pub use casegen_config as config;
pub use casegen_core as core;
pub use casegen_schema as schema;

mod error;
mod session;

pub use error::{
    ConfigErrorKind, Error, ErrorKind, ErrorOrigin, RuntimeErrorKind, SynthesisErrorKind,
};
pub use session::Casegen;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Casegen, Error, ErrorKind,
        config::Config,
        core::{
            ops,
            record::{Record, RecordType},
            value::{Object, Value},
        },
        schema::{
            node::{FactorySignature, RecordTypeDefinition},
            types::{GenericParamSpec, TypeDescriptor},
            variety::VarietyKind,
        },
    };
}
