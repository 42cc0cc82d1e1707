//! Entry descriptors produced by an enumerator.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeFlag, AttributeSet};
use crate::error::EntryError;

/// One filesystem object below the enumeration root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Full path of the object.
    pub path: PathBuf,
    /// Attribute bits reported for the object itself (links are not followed).
    pub attributes: AttributeSet,
    /// Size in bytes. Only meaningful when the entry is not a directory.
    pub size: u64,
    /// Depth below the root (root children are at depth 1).
    pub depth: u32,
}

impl Entry {
    /// Create a new entry.
    pub fn new(path: impl Into<PathBuf>, attributes: AttributeSet, size: u64, depth: u32) -> Self {
        Self {
            path: path.into(),
            attributes,
            size,
            depth,
        }
    }

    /// Check if the object carries the directory attribute.
    pub fn is_directory(&self) -> bool {
        self.attributes.contains(AttributeFlag::Directory)
    }

    /// Check if the object is a symlink, junction or mount point.
    pub fn is_reparse_point(&self) -> bool {
        self.attributes.contains(AttributeFlag::ReparsePoint)
    }
}

/// Item yielded by an enumerator: an entry, or the failure to produce one.
pub type EnumeratedEntry = Result<Entry, EntryError>;
