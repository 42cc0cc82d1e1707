//! The entry enumeration seam.

use std::path::Path;

use dirprops_core::{EnumeratedEntry, EnumerationOptions, PropertiesError};

/// Produces the entries below a root directory.
///
/// Implementations must:
///
/// - resolve `root` up front and fail with [`PropertiesError`] if it is not an
///   accessible directory;
/// - never yield the root itself;
/// - never descend into symlinks, junctions or mount points, yielding them as
///   leaves instead;
/// - keep going after a failure on a single entry, yielding an `Err` item for
///   it;
/// - honor the filter and depth settings in `options`.
///
/// The returned sequence is lazy and consumed once, in order.
pub trait EntryEnumerator {
    /// Iterator over the entries of one enumeration.
    type Entries: Iterator<Item = EnumeratedEntry>;

    /// Start enumerating `root`.
    fn enumerate(
        &self,
        root: &Path,
        options: &EnumerationOptions,
    ) -> Result<Self::Entries, PropertiesError>;
}

impl<E: EntryEnumerator + ?Sized> EntryEnumerator for &E {
    type Entries = E::Entries;

    fn enumerate(
        &self,
        root: &Path,
        options: &EnumerationOptions,
    ) -> Result<Self::Entries, PropertiesError> {
        (**self).enumerate(root, options)
    }
}
