//! Platform attribute classification.
//!
//! Turns `lstat`-style metadata into the attribute bits of [`AttributeFlag`].
//! Windows reports the bits directly; Unix synthesizes the subset that has a
//! meaning there.

use std::ffi::OsStr;
use std::fs::Metadata;

use dirprops_core::{AttributeFlag, AttributeSet};

/// Files at or below this length are never reported as sparse.
#[cfg(unix)]
const SPARSE_MIN_LEN: u64 = 4096;

/// Classify an object from its own (not followed) metadata.
///
/// `mount_point` marks a directory that lives on a different device than its
/// parent; it is reported as a reparse point.
pub fn attributes_of(name: &OsStr, metadata: &Metadata, mount_point: bool) -> AttributeSet {
    let mut attributes = platform_attributes(name, metadata);
    if mount_point {
        attributes.insert(AttributeFlag::ReparsePoint);
    }
    attributes
}

/// Byte size of an object. Directories and links carry no data of their own.
pub fn size_of(metadata: &Metadata) -> u64 {
    let file_type = metadata.file_type();
    if file_type.is_dir() || file_type.is_symlink() {
        0
    } else {
        metadata.len()
    }
}

/// Device id of the object, where the platform has one.
#[cfg(unix)]
pub fn device_of(metadata: &Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.dev())
}

#[cfg(not(unix))]
pub fn device_of(_metadata: &Metadata) -> Option<u64> {
    None
}

/// Check whether a directory must be surfaced as a leaf instead of entered.
pub fn is_reparse_directory(metadata: &Metadata, parent_device: Option<u64>) -> bool {
    if !metadata.is_dir() {
        return false;
    }
    if has_reparse_bit(metadata) {
        return true;
    }
    matches!((parent_device, device_of(metadata)), (Some(parent), Some(own)) if parent != own)
}

#[cfg(windows)]
fn has_reparse_bit(metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    metadata.file_attributes() & AttributeFlag::ReparsePoint.bit() != 0
}

#[cfg(not(windows))]
fn has_reparse_bit(_metadata: &Metadata) -> bool {
    false
}

#[cfg(windows)]
fn platform_attributes(_name: &OsStr, metadata: &Metadata) -> AttributeSet {
    use std::os::windows::fs::MetadataExt;
    AttributeSet::from_bits(metadata.file_attributes())
}

#[cfg(unix)]
fn platform_attributes(name: &OsStr, metadata: &Metadata) -> AttributeSet {
    use std::os::unix::fs::{FileTypeExt, MetadataExt, PermissionsExt};

    let file_type = metadata.file_type();
    let mut attributes = AttributeSet::EMPTY;

    if file_type.is_dir() {
        attributes.insert(AttributeFlag::Directory);
    }
    if file_type.is_symlink() {
        attributes.insert(AttributeFlag::ReparsePoint);
    } else if metadata.permissions().mode() & 0o222 == 0 {
        attributes.insert(AttributeFlag::ReadOnly);
    }
    if is_hidden(name) {
        attributes.insert(AttributeFlag::Hidden);
    }
    if file_type.is_block_device()
        || file_type.is_char_device()
        || file_type.is_fifo()
        || file_type.is_socket()
    {
        attributes.insert(AttributeFlag::Device);
    }
    if file_type.is_file() {
        let len = metadata.len();
        if len > SPARSE_MIN_LEN && metadata.blocks().saturating_mul(512) < len {
            attributes.insert(AttributeFlag::SparseFile);
        }
        if attributes.is_empty() {
            attributes.insert(AttributeFlag::Normal);
        }
    }

    attributes
}

#[cfg(not(any(unix, windows)))]
fn platform_attributes(name: &OsStr, metadata: &Metadata) -> AttributeSet {
    let file_type = metadata.file_type();
    let mut attributes = AttributeSet::EMPTY;

    if file_type.is_dir() {
        attributes.insert(AttributeFlag::Directory);
    }
    if file_type.is_symlink() {
        attributes.insert(AttributeFlag::ReparsePoint);
    } else if metadata.permissions().readonly() {
        attributes.insert(AttributeFlag::ReadOnly);
    }
    if is_hidden(name) {
        attributes.insert(AttributeFlag::Hidden);
    }
    if file_type.is_file() && attributes.is_empty() {
        attributes.insert(AttributeFlag::Normal);
    }

    attributes
}

#[cfg(not(windows))]
fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn classify(path: &std::path::Path) -> AttributeSet {
        let metadata = fs::symlink_metadata(path).unwrap();
        attributes_of(path.file_name().unwrap(), &metadata, false)
    }

    #[test]
    fn test_plain_file_is_normal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plain.txt");
        fs::write(&path, "hello").unwrap();

        let attributes = classify(&path);
        assert_eq!(attributes.iter().collect::<Vec<_>>(), vec![AttributeFlag::Normal]);
        assert_eq!(size_of(&fs::symlink_metadata(&path).unwrap()), 5);
    }

    #[test]
    fn test_hidden_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".cache");
        fs::create_dir(&path).unwrap();

        let attributes = classify(&path);
        assert!(attributes.contains(AttributeFlag::Directory));
        assert!(attributes.contains(AttributeFlag::Hidden));
        assert!(!attributes.contains(AttributeFlag::Normal));
        assert_eq!(size_of(&fs::symlink_metadata(&path).unwrap()), 0);
    }

    #[test]
    fn test_symlink_is_reparse_leaf() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        fs::create_dir(&target).unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let metadata = fs::symlink_metadata(&link).unwrap();
        let attributes = classify(&link);
        assert!(attributes.contains(AttributeFlag::ReparsePoint));
        assert!(!attributes.contains(AttributeFlag::Directory));
        assert_eq!(size_of(&metadata), 0);
        assert!(!is_reparse_directory(&metadata, device_of(&metadata)));
    }

    #[test]
    fn test_mount_point_flag() {
        let temp = TempDir::new().unwrap();
        let metadata = fs::symlink_metadata(temp.path()).unwrap();
        let attributes = attributes_of(OsStr::new("mnt"), &metadata, true);

        assert!(attributes.contains(AttributeFlag::Directory));
        assert!(attributes.contains(AttributeFlag::ReparsePoint));

        let own = device_of(&metadata).unwrap();
        assert!(!is_reparse_directory(&metadata, Some(own)));
        assert!(is_reparse_directory(&metadata, Some(own.wrapping_add(1))));
    }
}
