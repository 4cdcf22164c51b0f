//! Batch synthesis over many factory signatures.

use crate::{prelude::*, synthesize::SynthesisError};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("record '{record}' is already synthesized from factory '{previous}'")]
    DuplicateRecord { record: String, previous: String },

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

///
/// BuildFailure
///

#[derive(Debug)]
pub struct BuildFailure {
    pub factory: String,
    pub error: BuildError,
}

///
/// BatchReport
///

#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<RecordTypeDefinition>,
    pub failures: Vec<BuildFailure>,
}

impl BatchReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn record(&self, name: &str) -> Option<&RecordTypeDefinition> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Fail with the first failure, if any.
    pub fn into_result(mut self) -> Result<Vec<RecordTypeDefinition>, BuildError> {
        if self.failures.is_empty() {
            Ok(self.records)
        } else {
            Err(self.failures.swap_remove(0).error)
        }
    }
}

/// Synthesize every signature independently; a failing signature is
/// recorded and never stops the rest of the batch.
pub fn synthesize_batch<'a, R: CapabilityResolver>(
    signatures: impl IntoIterator<Item = &'a FactorySignature>,
    synthesizer: &Synthesizer<R>,
) -> BatchReport {
    let mut report = BatchReport::default();
    let mut seen: BTreeMap<String, String> = BTreeMap::new();

    for signature in signatures {
        let result = synthesizer
            .synthesize(signature)
            .map_err(BuildError::from)
            .and_then(|def| match seen.get(&def.name) {
                Some(previous) => Err(BuildError::DuplicateRecord {
                    record: def.name,
                    previous: previous.clone(),
                }),
                None => Ok(def),
            });

        match result {
            Ok(def) => {
                seen.insert(def.name.clone(), signature.name.clone());
                report.records.push(def);
            }
            Err(error) => {
                tracing::warn!(factory = %signature.name, %error, "skipping factory signature");
                report.failures.push(BuildFailure {
                    factory: signature.name.clone(),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        records = report.records.len(),
        failures = report.failures.len(),
        "batch synthesis finished"
    );

    report
}

///
/// TESTS
///
