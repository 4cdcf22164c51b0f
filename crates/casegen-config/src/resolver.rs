use casegen_schema::{
    prelude::*,
    resolve::CapabilityTable,
};

///
/// TableResolver
/// Built-in capabilities extended with the types a config declares.
///

#[derive(Clone, Debug, Default)]
pub struct TableResolver {
    table: CapabilityTable,
}

impl TableResolver {
    #[must_use]
    pub const fn new(table: CapabilityTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub const fn table(&self) -> &CapabilityTable {
        &self.table
    }
}

impl CapabilityResolver for TableResolver {
    fn is_equatable(&self, ty: &TypeDescriptor) -> bool {
        self.table.is_equatable(ty)
    }

    fn collection_of(&self, ty: &ConcreteType) -> Option<CollectionShape> {
        self.table.collection_of(ty)
    }
}

///
/// TESTS
///
