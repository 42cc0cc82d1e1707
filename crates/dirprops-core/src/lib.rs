//! Core types for dirprops.
//!
//! This crate provides the data model shared by the enumerator and the
//! aggregator: the attribute-flag table, entry descriptors, enumeration
//! options and the aggregated [`DirectoryProperties`].

mod attributes;
mod config;
mod entry;
mod error;
mod properties;

pub use attributes::{ATTRIBUTE_FLAGS, AttributeFlag, AttributeSet};
pub use config::{AttributeTally, EntryFilter, EnumerationOptions, EnumerationOptionsBuilder};
pub use entry::{EnumeratedEntry, Entry};
pub use error::{EntryError, EntryErrorKind, PropertiesError};
pub use properties::{
    DirectoryProperties, FILE_KEY, PropertiesAccumulator, SIZE_KEY, TOTAL_KEY,
};
