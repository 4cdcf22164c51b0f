mod plan;
mod record;
mod signature;

pub use plan::*;
pub use record::*;
pub use signature::*;

/// Additive seed of the combined record hash.
pub const HASH_SEED: u64 = 17;

/// Odd multiplier applied before each field contribution.
pub const HASH_MULTIPLIER: u64 = 31;
