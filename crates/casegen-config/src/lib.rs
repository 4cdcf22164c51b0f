//! TOML configuration: naming policy and host-declared type capabilities.
//!
//! ```toml
//! [record]
//! naming = "pascal"
//! check_reserved = true
//!
//! [[types]]
//! name = "Money"
//! equatable = true
//!
//! [[types]]
//! name = "Stack"
//! element = "T"
//! ```

mod resolver;

pub use resolver::TableResolver;

use casegen_schema::{
    prelude::*,
    resolve::{Capabilities, CapabilityTable},
};
use serde::Deserialize;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(ErrorTree),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub record: SynthesisOptions,
    pub types: Vec<TypeEntry>,
}

impl Config {
    /// Parse and validate a TOML document; missing sections take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate().map_err(ConfigError::Invalid)?;

        tracing::debug!(
            types = config.types.len(),
            naming = %config.record.naming,
            "loaded casegen config"
        );

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();
        let mut seen = BTreeSet::new();

        for (index, entry) in self.types.iter().enumerate() {
            let route = format!("types[{index}]");

            if entry.name.trim().is_empty() {
                errs.add_for(&route, "type name is empty");
            } else if !seen.insert(entry.name.as_str()) {
                errs.add_for(&route, format!("duplicate type '{}'", entry.name));
            }
            if entry.element.is_some() && entry.untyped_collection {
                errs.add_for(
                    &route,
                    format!(
                        "type '{}' cannot be both a typed and an untyped collection",
                        entry.name
                    ),
                );
            }
            if entry.element.as_deref().is_some_and(|e| e.trim().is_empty()) {
                errs.add_for(
                    &route,
                    format!("type '{}' declares an empty element parameter", entry.name),
                );
            }
        }

        errs.result()
    }

    /// Built-ins extended with the declared types; declarations win.
    #[must_use]
    pub fn resolver(&self) -> TableResolver {
        let mut table = BuiltinResolver::table().clone();
        for entry in &self.types {
            table.insert(entry.name.clone(), entry.capabilities());
        }

        TableResolver::new(table)
    }

    #[must_use]
    pub fn synthesis_options(&self) -> SynthesisOptions {
        self.record.clone()
    }

    #[must_use]
    pub fn synthesizer(&self) -> Synthesizer<TableResolver> {
        Synthesizer::new(self.resolver(), self.synthesis_options())
    }

    /// Declared types only, without the built-ins.
    #[must_use]
    pub fn declared_table(&self) -> CapabilityTable {
        self.types
            .iter()
            .fold(CapabilityTable::new(), |table, entry| {
                table.with(entry.name.clone(), entry.capabilities())
            })
    }
}

///
/// TypeEntry
///
/// A host type and the capabilities classification may rely on.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub name: String,

    #[serde(default)]
    pub equatable: bool,

    /// Definition parameter a typed collection enumerates over.
    #[serde(default)]
    pub element: Option<String>,

    #[serde(default)]
    pub untyped_collection: bool,
}

impl TypeEntry {
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        let base = match (&self.element, self.untyped_collection) {
            (Some(parameter), _) => Capabilities::typed_collection(parameter.clone()),
            (None, true) => Capabilities::untyped_collection(),
            (None, false) => Capabilities::default(),
        };

        Capabilities {
            equatable: self.equatable,
            ..base
        }
    }
}

///
/// TESTS
///
