//! Folds an entry sequence into [`DirectoryProperties`].

use std::path::Path;
use std::time::Instant;

use dirprops_core::{
    DirectoryProperties, EnumerationOptions, PropertiesAccumulator, PropertiesError,
};

use crate::enumerator::EntryEnumerator;
use crate::scanner::JwalkEnumerator;

/// Aggregates the properties of a directory tree.
///
/// The walk is single-threaded; entries are consumed one at a time in the
/// order the enumerator yields them. Failures on individual entries are
/// counted and skipped, only a root that cannot be resolved fails the call.
#[derive(Debug, Clone, Default)]
pub struct PropertiesAggregator<E = JwalkEnumerator> {
    enumerator: E,
}

impl PropertiesAggregator {
    /// Create an aggregator over the real filesystem.
    pub fn new() -> Self {
        Self::with_enumerator(JwalkEnumerator::new())
    }
}

impl<E: EntryEnumerator> PropertiesAggregator<E> {
    /// Create an aggregator over a custom enumerator.
    pub fn with_enumerator(enumerator: E) -> Self {
        Self { enumerator }
    }

    /// Walk `root` and return its aggregated properties.
    pub fn aggregate(
        &self,
        root: &Path,
        options: &EnumerationOptions,
    ) -> Result<DirectoryProperties, PropertiesError> {
        let start = Instant::now();
        let _span = tracing::debug_span!("aggregate", root = %root.display()).entered();

        let entries = self.enumerator.enumerate(root, options)?;
        let mut accumulator = PropertiesAccumulator::new(options.tally);

        for item in entries {
            match item {
                Ok(entry) => accumulator.record(&entry),
                Err(err) => {
                    tracing::debug!(path = ?err.path, kind = ?err.kind, "skipping entry: {err}");
                    accumulator.record_error();
                }
            }
        }

        let properties = accumulator.finish();
        tracing::info!(
            total = properties.total(),
            files = properties.file_count(),
            size = properties.total_size(),
            errors = properties.error_count(),
            elapsed = ?start.elapsed(),
            "aggregated directory properties"
        );

        Ok(properties)
    }
}

/// Aggregate `root` with default options, files and folders, fully recursive.
pub fn get_properties(root: impl AsRef<Path>) -> Result<DirectoryProperties, PropertiesError> {
    PropertiesAggregator::new().aggregate(root.as_ref(), &EnumerationOptions::default())
}
