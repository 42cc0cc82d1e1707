//! Aggregated directory properties.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::attributes::{ATTRIBUTE_FLAGS, AttributeFlag};
use crate::config::AttributeTally;
use crate::entry::Entry;

/// Key for the regular file count.
pub const FILE_KEY: &str = "File";
/// Key for the total number of entries.
pub const TOTAL_KEY: &str = "Total";
/// Key for the cumulative byte size of non-directory entries.
pub const SIZE_KEY: &str = "Size";

/// Running tally for one aggregation. Counts only ever increase.
#[derive(Debug, Clone)]
pub struct PropertiesAccumulator {
    counts: IndexMap<AttributeFlag, u64>,
    total: u64,
    total_size: u64,
    error_count: u64,
    tally: AttributeTally,
}

impl PropertiesAccumulator {
    /// Create an empty tally with every known flag at zero.
    pub fn new(tally: AttributeTally) -> Self {
        Self {
            counts: ATTRIBUTE_FLAGS.iter().map(|flag| (*flag, 0)).collect(),
            total: 0,
            total_size: 0,
            error_count: 0,
            tally,
        }
    }

    /// Fold one successfully enumerated entry into the tally.
    pub fn record(&mut self, entry: &Entry) {
        self.total += 1;

        let is_directory = entry.is_directory();
        if !is_directory {
            self.total_size = self.total_size.saturating_add(entry.size);
        }

        for flag in entry.attributes.iter() {
            let target = match self.tally {
                AttributeTally::AbsorbIntoDirectory if is_directory => AttributeFlag::Directory,
                _ => flag,
            };
            *self.counts.entry(target).or_insert(0) += 1;
        }
    }

    /// Count an entry that could not be enumerated.
    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    /// Compute the derived counts and freeze the result.
    pub fn finish(self) -> DirectoryProperties {
        let directories = self.counts[&AttributeFlag::Directory];
        let reparse_points = self.counts[&AttributeFlag::ReparsePoint];
        // Literal subtraction: under directory absorption this can go negative.
        let file_count = to_i64(self.total) - to_i64(directories) - to_i64(reparse_points);

        DirectoryProperties {
            counts: self.counts,
            total: self.total,
            file_count,
            total_size: self.total_size,
            error_count: self.error_count,
        }
    }
}

/// Finished aggregate for one directory tree.
///
/// Serializes as the ordered key/value map returned by [`to_map`]:
/// every attribute name in table order, then `File`, `Total` and `Size`.
/// The error count is not part of that map and is only available through
/// [`error_count`].
///
/// [`to_map`]: DirectoryProperties::to_map
/// [`error_count`]: DirectoryProperties::error_count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryProperties {
    counts: IndexMap<AttributeFlag, u64>,
    total: u64,
    file_count: i64,
    total_size: u64,
    error_count: u64,
}

impl DirectoryProperties {
    /// Counter for a single attribute flag.
    pub fn count(&self, flag: AttributeFlag) -> u64 {
        self.counts.get(&flag).copied().unwrap_or(0)
    }

    /// Number of entries observed, excluding failed ones.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Entries that are neither directories nor reparse points.
    pub fn file_count(&self) -> i64 {
        self.file_count
    }

    /// Sum of sizes of all non-directory entries.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Number of entries that failed during enumeration.
    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    /// Check if any entry failed, meaning the counts are partial.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Look up a value by its output key.
    pub fn get(&self, key: &str) -> Option<i64> {
        match key {
            FILE_KEY => Some(self.file_count),
            TOTAL_KEY => Some(to_i64(self.total)),
            SIZE_KEY => Some(to_i64(self.total_size)),
            other => other
                .parse::<AttributeFlag>()
                .ok()
                .map(|flag| to_i64(self.count(flag))),
        }
    }

    /// Iterate over the attribute counters in table order.
    pub fn attribute_counts(&self) -> impl Iterator<Item = (AttributeFlag, u64)> + '_ {
        self.counts.iter().map(|(flag, count)| (*flag, *count))
    }

    /// The full output map.
    pub fn to_map(&self) -> IndexMap<&'static str, i64> {
        let mut map: IndexMap<&'static str, i64> = self
            .attribute_counts()
            .map(|(flag, count)| (flag.name(), to_i64(count)))
            .collect();
        map.insert(FILE_KEY, self.file_count);
        map.insert(TOTAL_KEY, to_i64(self.total));
        map.insert(SIZE_KEY, to_i64(self.total_size));
        map
    }
}

impl Serialize for DirectoryProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.to_map())
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
