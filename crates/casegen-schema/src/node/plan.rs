use crate::{node::{HASH_MULTIPLIER, HASH_SEED}, prelude::*};

///
/// Comparison
///
/// How one field is compared, derived exhaustively from its variety. Nullable
/// comparisons treat both-null as equal and one-null as unequal before any
/// delegation happens.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "compare", rename_all = "snake_case")]
pub enum Comparison {
    /// Delegate to the value's own equatable capability.
    Equatable { nullable: bool },

    /// Delegate to the platform's default equality.
    Default { nullable: bool },

    /// Optional value; both-absent is equal, one-absent unequal.
    Optional { equatable: bool },

    /// Typed collection, elementwise in iteration order with equal length.
    Sequence { element: Box<Self> },

    /// Untyped collection, elementwise through default equality.
    UntypedSequence,
}

impl Comparison {
    /// Whether null is handled before delegation.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        match self {
            Self::Equatable { nullable } | Self::Default { nullable } => *nullable,
            Self::Optional { .. } | Self::Sequence { .. } | Self::UntypedSequence => true,
        }
    }

    /// Whether the delegated equality is the value's own equatable one.
    #[must_use]
    pub const fn is_equatable(&self) -> bool {
        match self {
            Self::Equatable { .. } | Self::Optional { equatable: true } => true,
            Self::Default { .. } | Self::Optional { equatable: false } => false,
            Self::Sequence { .. } | Self::UntypedSequence => false,
        }
    }
}

///
/// FieldEquality
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldEquality {
    pub field: String,
    pub comparison: Comparison,
}

///
/// HashContribution
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashContribution {
    /// Hash of the referenced value, zero when null.
    Referenced,

    /// The value's own intrinsic hash.
    Intrinsic,
}

///
/// HashStep
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HashStep {
    pub field: String,
    pub contribution: HashContribution,
}

///
/// HashPlan
///
/// Left-to-right combination over fields:
/// `h = seed; for each field: h = h * multiplier + contribution`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HashPlan {
    pub seed: u64,
    pub multiplier: u64,
    pub steps: Vec<HashStep>,
}

impl HashPlan {
    #[must_use]
    pub const fn new(steps: Vec<HashStep>) -> Self {
        Self {
            seed: HASH_SEED,
            multiplier: HASH_MULTIPLIER,
            steps,
        }
    }

    /// Fold already-computed field contributions in step order.
    #[must_use]
    pub fn combine(&self, contributions: impl IntoIterator<Item = u64>) -> u64 {
        contributions.into_iter().fold(self.seed, |hash, contribution| {
            hash.wrapping_mul(self.multiplier).wrapping_add(contribution)
        })
    }
}

///
/// RenderPlan
/// `TypeName(field: value, ...)` in declaration order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RenderPlan {
    pub type_name: String,
    pub fields: Vec<String>,
}

///
/// ConstructorParameter
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConstructorParameter {
    pub name: String,
    pub ty: TypeDescriptor,
}

///
/// FactoryRewrite
///
/// Rewiring instruction for the host: replace the factory body with a direct
/// construction of the record, forwarding the factory's generic parameters
/// as type arguments and its parameters as arguments, both in order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FactoryRewrite {
    pub factory: String,
    pub record: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<String>,
}

impl std::fmt::Display for FactoryRewrite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} => {}", self.factory, self.record)?;
        if !self.type_arguments.is_empty() {
            write!(f, "<{}>", self.type_arguments.join(", "))?;
        }

        write!(f, "({})", self.arguments.join(", "))
    }
}

///
/// TESTS
///
