//! Runtime materialization of synthesized record types.

pub mod error;
pub mod ops;
pub mod record;
pub mod value;

pub use error::{ConstraintViolation, RuntimeError};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::RuntimeError,
        ops,
        record::{Record, RecordType},
        value::{Object, Value},
    };
}
