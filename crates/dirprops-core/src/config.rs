//! Enumeration options.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::PropertiesError;

/// Which kinds of entries an enumeration yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryFilter {
    /// Files and folders.
    #[default]
    FilesAndFolders,
    /// Everything that is not a directory.
    FilesOnly,
    /// Directories only.
    FoldersOnly,
}

impl EntryFilter {
    /// Check if `entry` passes the filter.
    pub fn includes(self, entry: &Entry) -> bool {
        match self {
            Self::FilesAndFolders => true,
            Self::FilesOnly => !entry.is_directory(),
            Self::FoldersOnly => entry.is_directory(),
        }
    }
}

/// How attribute bits of one entry are folded into the per-attribute counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeTally {
    /// Every flag present on a directory entry is counted under `Directory`.
    ///
    /// A hidden directory therefore advances `Directory` twice and `Hidden`
    /// not at all.
    #[default]
    AbsorbIntoDirectory,
    /// Every flag present is counted under itself.
    PerAttribute,
}

/// Options controlling how a directory tree is enumerated and tallied.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct EnumerationOptions {
    /// Entry kinds to yield. Folders are descended into regardless.
    #[builder(default)]
    #[serde(default)]
    pub filter: EntryFilter,

    /// Descend below the immediate children of the root.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Maximum depth to enumerate (None = unlimited, 1 = root children only).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Do not yield symlinks, junctions or mount points at all.
    #[builder(default = "false")]
    #[serde(default)]
    pub skip_reparse_points: bool,

    /// Counting rule for attribute bits.
    #[builder(default)]
    #[serde(default)]
    pub tally: AttributeTally,
}

fn default_true() -> bool {
    true
}

fn check_max_depth(max_depth: Option<u32>) -> Result<(), String> {
    if max_depth == Some(0) {
        return Err("max_depth must be at least 1; the root itself is never enumerated".to_string());
    }
    Ok(())
}

impl EnumerationOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        check_max_depth(self.max_depth.flatten())
    }
}

impl EnumerationOptions {
    /// Create a new options builder.
    pub fn builder() -> EnumerationOptionsBuilder {
        EnumerationOptionsBuilder::default()
    }

    /// Validate options that did not go through the builder.
    pub fn validate(&self) -> Result<(), PropertiesError> {
        check_max_depth(self.max_depth).map_err(|message| PropertiesError::InvalidOptions { message })
    }

    /// Deepest level to enumerate, folding `recursive` and `max_depth` together.
    pub fn effective_max_depth(&self) -> usize {
        if !self.recursive {
            return 1;
        }
        self.max_depth.map(|d| d as usize).unwrap_or(usize::MAX)
    }
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            filter: EntryFilter::FilesAndFolders,
            recursive: true,
            max_depth: None,
            skip_reparse_points: false,
            tally: AttributeTally::AbsorbIntoDirectory,
        }
    }
}
