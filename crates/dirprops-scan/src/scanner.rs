//! JWalk-based entry enumerator.

use std::path::{Path, PathBuf};

use jwalk::{DirEntry, DirEntryIter, Parallelism, WalkDirGeneric};

use dirprops_core::{
    EntryError, EntryFilter, EnumeratedEntry, EnumerationOptions, Entry,
    PropertiesError,
};

use crate::classify;
use crate::enumerator::EntryEnumerator;

/// Per-entry client state: `true` marks a directory surfaced as a leaf.
type WalkState = ((), bool);

/// Enumerator walking the real filesystem with jwalk.
///
/// The walk is serial and sorted by file name, so two enumerations of an
/// unchanged tree yield the same sequence. Symbolic links are never followed
/// and mount points are yielded without being entered.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwalkEnumerator;

impl JwalkEnumerator {
    /// Create a new enumerator.
    pub fn new() -> Self {
        Self
    }
}

impl EntryEnumerator for JwalkEnumerator {
    type Entries = JwalkEntries;

    fn enumerate(
        &self,
        root: &Path,
        options: &EnumerationOptions,
    ) -> Result<JwalkEntries, PropertiesError> {
        options.validate()?;
        let root_path = resolve_root(root)?;

        let walker = WalkDirGeneric::<WalkState>::new(&root_path)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .min_depth(1)
            .max_depth(options.effective_max_depth())
            .process_read_dir(mark_reparse_directories);

        Ok(JwalkEntries {
            inner: walker.into_iter(),
            filter: options.filter,
            skip_reparse_points: options.skip_reparse_points,
            pending: None,
        })
    }
}

/// Lazy sequence of entries produced by [`JwalkEnumerator`].
pub struct JwalkEntries {
    inner: DirEntryIter<WalkState>,
    filter: EntryFilter,
    skip_reparse_points: bool,
    /// Listing failure of the previous directory, yielded after the directory itself.
    pending: Option<EntryError>,
}

impl Iterator for JwalkEntries {
    type Item = EnumeratedEntry;

    fn next(&mut self) -> Option<EnumeratedEntry> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }

        loop {
            let mut dir_entry = match self.inner.next()? {
                Ok(e) => e,
                Err(err) => return Some(Err(walk_error(&err))),
            };

            // jwalk reports an unlistable directory on the directory entry itself.
            if let Some(err) = dir_entry.read_children_error.take() {
                self.pending = Some(walk_error(&err));
            }

            let path = dir_entry.path();
            let metadata = match std::fs::symlink_metadata(&path) {
                Ok(m) => m,
                Err(err) => return Some(Err(EntryError::io(path, &err))),
            };

            let attributes =
                classify::attributes_of(dir_entry.file_name(), &metadata, dir_entry.client_state);
            let depth = u32::try_from(dir_entry.depth).unwrap_or(u32::MAX);
            let entry = Entry::new(path, attributes, classify::size_of(&metadata), depth);

            let skipped = (self.skip_reparse_points && entry.is_reparse_point())
                || !self.filter.includes(&entry);
            if skipped {
                if let Some(err) = self.pending.take() {
                    return Some(Err(err));
                }
                continue;
            }
            return Some(Ok(entry));
        }
    }
}

/// Resolve the root to an existing, readable directory.
fn resolve_root(root: &Path) -> Result<PathBuf, PropertiesError> {
    let root_path = root
        .canonicalize()
        .map_err(|e| PropertiesError::io(root, e))?;

    if !root_path.is_dir() {
        return Err(PropertiesError::NotADirectory { path: root_path });
    }

    // Surface an unreadable root now instead of as the first entry error.
    std::fs::read_dir(&root_path).map_err(|e| PropertiesError::io(&root_path, e))?;

    Ok(root_path)
}

/// Stop jwalk from descending into mount points and reparse directories.
fn mark_reparse_directories(
    depth: Option<usize>,
    path: &Path,
    _state: &mut (),
    children: &mut Vec<Result<DirEntry<WalkState>, jwalk::Error>>,
) {
    // The root is handed over once with no depth; it is always entered.
    if depth.is_none() {
        return;
    }

    let parent_device = std::fs::symlink_metadata(path)
        .ok()
        .and_then(|m| classify::device_of(&m));

    for dir_entry in children.iter_mut().flatten() {
        if !dir_entry.file_type().is_dir() {
            continue;
        }
        let Ok(metadata) = std::fs::symlink_metadata(dir_entry.path()) else {
            continue;
        };
        if classify::is_reparse_directory(&metadata, parent_device) {
            tracing::debug!(path = %dir_entry.path().display(), "not descending into reparse directory");
            dir_entry.read_children_path = None;
            dir_entry.client_state = true;
        }
    }
}

fn walk_error(err: &jwalk::Error) -> EntryError {
    EntryError::read_error(err.path().map(Path::to_path_buf), err.to_string())
}
