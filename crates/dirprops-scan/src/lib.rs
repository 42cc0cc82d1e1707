//! Directory enumeration and property aggregation for dirprops.
//!
//! # Overview
//!
//! `dirprops-scan` walks a directory tree and folds every object below the
//! root into one [`DirectoryProperties`] summary:
//!
//! - **Per-attribute counters** for every known [`AttributeFlag`]
//! - **Total**, **File** and **Size** derived counts
//! - **Error count** for entries that could not be read
//!
//! Symbolic links and mount points are counted as leaves and never entered.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use dirprops_scan::{EnumerationOptions, PropertiesAggregator};
//!
//! let aggregator = PropertiesAggregator::new();
//! let props = aggregator
//!     .aggregate(Path::new("/path/to/dir"), &EnumerationOptions::default())
//!     .unwrap();
//!
//! for (key, value) in props.to_map() {
//!     println!("{key}: {value}");
//! }
//! ```
//!
//! # Custom enumerators
//!
//! [`PropertiesAggregator`] is generic over [`EntryEnumerator`], so entries can
//! come from somewhere other than the local filesystem.

mod aggregator;
mod classify;
mod enumerator;
mod scanner;

pub use aggregator::{PropertiesAggregator, get_properties};
pub use enumerator::EntryEnumerator;
pub use scanner::{JwalkEntries, JwalkEnumerator};

// Re-export core types for convenience
pub use dirprops_core::{
    ATTRIBUTE_FLAGS, AttributeFlag, AttributeSet, AttributeTally, DirectoryProperties,
    EntryError, EntryErrorKind, EntryFilter, EnumeratedEntry, EnumerationOptions, Entry,
    FILE_KEY, PropertiesError, SIZE_KEY, TOTAL_KEY,
};
