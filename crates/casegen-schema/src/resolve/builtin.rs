use crate::{
    prelude::*,
    resolve::{Capabilities, CapabilityTable},
};
use std::sync::LazyLock;

// scalar types that implement typed equality
const EQUATABLE: &[&str] = &[
    "String", "bool", "char", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "str",
    "u8", "u16", "u32", "u64", "u128", "usize",
];

// sequence and set types enumerable over their own `T`
const TYPED_COLLECTIONS: &[&str] = &[
    "BTreeSet",
    "BinaryHeap",
    "HashSet",
    "LinkedList",
    "Vec",
    "VecDeque",
];

///
/// BUILTINS
/// Platform built-ins, immutable after first use and safe to share.
///

static BUILTINS: LazyLock<CapabilityTable> = LazyLock::new(|| {
    let mut table = CapabilityTable::new();
    for name in EQUATABLE {
        table.insert(*name, Capabilities::equatable());
    }
    for name in TYPED_COLLECTIONS {
        table.insert(*name, Capabilities::typed_collection("T"));
    }

    table
});

///
/// BuiltinResolver
///

#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinResolver;

impl BuiltinResolver {
    /// The shared built-in table, for callers that extend it.
    #[must_use]
    pub fn table() -> &'static CapabilityTable {
        &BUILTINS
    }
}

impl CapabilityResolver for BuiltinResolver {
    fn is_equatable(&self, ty: &TypeDescriptor) -> bool {
        BUILTINS.is_equatable(ty)
    }

    fn collection_of(&self, ty: &ConcreteType) -> Option<CollectionShape> {
        BUILTINS.collection_of(ty)
    }
}

///
/// TESTS
///
