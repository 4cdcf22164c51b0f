use crate::error::Error;
use casegen_config::{Config, TableResolver};
use casegen_core::prelude::*;
use casegen_schema::{
    build::{BuildError, BuildFailure, synthesize_batch},
    prelude::*,
};
use std::{collections::BTreeMap, path::Path, sync::Arc};

///
/// Casegen
///
/// A synthesis session: one config, one synthesizer, and the record types
/// materialized so far, keyed by record name.
///

#[derive(Debug)]
pub struct Casegen {
    config: Config,
    synthesizer: Synthesizer<TableResolver>,
    types: BTreeMap<String, Arc<RecordType>>,
}

impl Casegen {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let synthesizer = config.synthesizer();

        Self {
            config,
            synthesizer,
            types: BTreeMap::new(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        Ok(Self::new(Config::from_toml_str(source)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::new(Config::load(path)?))
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn synthesizer(&self) -> &Synthesizer<TableResolver> {
        &self.synthesizer
    }

    /// Synthesize a definition without registering it.
    pub fn synthesize(&self, signature: &FactorySignature) -> Result<RecordTypeDefinition, Error> {
        Ok(self.synthesizer.synthesize(signature)?)
    }

    /// Synthesize and materialize one signature.
    pub fn define(&mut self, signature: &FactorySignature) -> Result<Arc<RecordType>, Error> {
        let def = self.synthesizer.synthesize(signature)?;

        Ok(self.register(def)?)
    }

    /// Define every signature independently; failures are returned and the
    /// rest of the batch is still registered.
    pub fn define_all<'a>(
        &mut self,
        signatures: impl IntoIterator<Item = &'a FactorySignature>,
    ) -> Vec<BuildFailure> {
        let report = synthesize_batch(signatures, &self.synthesizer);
        let mut failures = report.failures;

        for def in report.records {
            let factory = def.rewrite.factory.clone();
            if let Err(error) = self.register(def) {
                failures.push(BuildFailure { factory, error });
            }
        }

        tracing::debug!(
            types = self.types.len(),
            failures = failures.len(),
            "defined factory batch"
        );

        failures
    }

    #[must_use]
    pub fn record_type(&self, name: &str) -> Option<&Arc<RecordType>> {
        self.types.get(name)
    }

    pub fn record_types(&self) -> impl Iterator<Item = &Arc<RecordType>> {
        self.types.values()
    }

    pub fn instantiate(
        &self,
        name: &str,
        type_arguments: Vec<TypeDescriptor>,
    ) -> Result<Arc<RecordType>, Error> {
        let ty = self.require(name)?;

        Ok(ty.instantiate(type_arguments, self.synthesizer.resolver())?)
    }

    /// Construct a record of a non-generic type.
    pub fn construct(&self, name: &str, values: Vec<Value>) -> Result<Record, Error> {
        Ok(self.require(name)?.construct(values)?)
    }

    /// Call a factory through its rewrite: type arguments close the record
    /// type first when it is generic, then the values are forwarded.
    pub fn invoke(
        &self,
        factory: &str,
        type_arguments: Vec<TypeDescriptor>,
        values: Vec<Value>,
    ) -> Result<Record, Error> {
        let ty = self
            .types
            .values()
            .find(|ty| ty.definition().rewrite.factory == factory)
            .ok_or_else(|| Error::not_found("factory", factory))?;

        let ty = if ty.is_open() {
            ty.instantiate(type_arguments, self.synthesizer.resolver())?
        } else if type_arguments.is_empty() {
            Arc::clone(ty)
        } else {
            return Err(RuntimeError::NotOpen {
                record: ty.to_string(),
            }
            .into());
        };

        Ok(ty.construct(values)?)
    }

    fn require(&self, name: &str) -> Result<&Arc<RecordType>, Error> {
        self.types
            .get(name)
            .ok_or_else(|| Error::not_found("record type", name))
    }

    fn register(&mut self, def: RecordTypeDefinition) -> Result<Arc<RecordType>, BuildError> {
        if let Some(existing) = self.types.get(&def.name) {
            let previous = existing.definition().rewrite.factory.clone();
            tracing::warn!(
                record = %def.name,
                factory = %def.rewrite.factory,
                %previous,
                "record type is already defined"
            );

            return Err(BuildError::DuplicateRecord {
                record: def.name,
                previous,
            });
        }

        let ty = RecordType::materialize(def);
        self.types.insert(ty.name().to_string(), Arc::clone(&ty));
        tracing::debug!(record = %ty, "registered record type");

        Ok(ty)
    }
}

impl Default for Casegen {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
