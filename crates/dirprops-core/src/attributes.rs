//! Filesystem attribute flags and the process-wide flag table.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// A single filesystem attribute bit.
///
/// Bit values match the Windows `FILE_ATTRIBUTE_*` constants so that the raw
/// attribute word reported on Windows can be used as-is. Other platforms
/// synthesize the subset that has a meaning there.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[repr(u32)]
pub enum AttributeFlag {
    ReadOnly = 0x1,
    Hidden = 0x2,
    System = 0x4,
    Directory = 0x10,
    Archive = 0x20,
    Device = 0x40,
    Normal = 0x80,
    Temporary = 0x100,
    SparseFile = 0x200,
    /// Symbolic link, junction or mount point.
    ReparsePoint = 0x400,
    Compressed = 0x800,
    Offline = 0x1000,
    NotContentIndexed = 0x2000,
    Encrypted = 0x4000,
    IntegrityStream = 0x8000,
    NoScrubData = 0x20000,
}

impl AttributeFlag {
    /// The raw bit for this flag.
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// The flag name, as used for keys in the aggregated output.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Every known attribute flag, ordered by name.
///
/// This order is the key order of the aggregated property map.
pub static ATTRIBUTE_FLAGS: [AttributeFlag; 16] = [
    AttributeFlag::Archive,
    AttributeFlag::Compressed,
    AttributeFlag::Device,
    AttributeFlag::Directory,
    AttributeFlag::Encrypted,
    AttributeFlag::Hidden,
    AttributeFlag::IntegrityStream,
    AttributeFlag::NoScrubData,
    AttributeFlag::Normal,
    AttributeFlag::NotContentIndexed,
    AttributeFlag::Offline,
    AttributeFlag::ReadOnly,
    AttributeFlag::ReparsePoint,
    AttributeFlag::SparseFile,
    AttributeFlag::System,
    AttributeFlag::Temporary,
];

/// Set of attribute flags carried by one filesystem object.
///
/// Bits outside the known table are kept but never reported by [`iter`].
///
/// [`iter`]: AttributeSet::iter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(u32);

impl AttributeSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Build a set from a raw attribute word.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw attribute word.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether `flag` is present.
    pub const fn contains(self, flag: AttributeFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Add `flag` to the set.
    pub fn insert(&mut self, flag: AttributeFlag) {
        self.0 |= flag.bit();
    }

    /// Return a copy of the set with `flag` added.
    pub fn with(mut self, flag: AttributeFlag) -> Self {
        self.insert(flag);
        self
    }

    /// Check if no known flag is present.
    pub fn is_empty(self) -> bool {
        self.iter().next().is_none()
    }

    /// Iterate over the known flags present in the set, in table order.
    pub fn iter(self) -> impl Iterator<Item = AttributeFlag> {
        ATTRIBUTE_FLAGS
            .iter()
            .copied()
            .filter(move |flag| self.contains(*flag))
    }
}

impl From<AttributeFlag> for AttributeSet {
    fn from(flag: AttributeFlag) -> Self {
        Self(flag.bit())
    }
}

impl FromIterator<AttributeFlag> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = AttributeFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sorted_by_name() {
        let names: Vec<_> = ATTRIBUTE_FLAGS.iter().map(|f| f.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_table_bits_unique() {
        let all = ATTRIBUTE_FLAGS.iter().fold(0u32, |acc, f| {
            assert_eq!(acc & f.bit(), 0, "duplicate bit for {f}");
            acc | f.bit()
        });
        assert_eq!(all.count_ones() as usize, ATTRIBUTE_FLAGS.len());
    }

    #[test]
    fn test_flag_names() {
        assert_eq!(AttributeFlag::ReparsePoint.name(), "ReparsePoint");
        assert_eq!(AttributeFlag::Directory.to_string(), "Directory");
        assert_eq!("Hidden".parse::<AttributeFlag>().unwrap(), AttributeFlag::Hidden);
        assert!("File".parse::<AttributeFlag>().is_err());
    }

    #[test]
    fn test_set_iter_in_table_order() {
        let set: AttributeSet = [
            AttributeFlag::ReadOnly,
            AttributeFlag::Directory,
            AttributeFlag::Hidden,
        ]
        .into_iter()
        .collect();

        let flags: Vec<_> = set.iter().collect();
        assert_eq!(
            flags,
            vec![
                AttributeFlag::Directory,
                AttributeFlag::Hidden,
                AttributeFlag::ReadOnly
            ]
        );
    }

    #[test]
    fn test_unknown_bits_ignored() {
        // 0x8 is the old volume-label bit, not part of the table.
        let set = AttributeSet::from_bits(0x8);
        assert!(set.is_empty());
        assert_eq!(set.bits(), 0x8);

        let set = AttributeSet::from_bits(0x8 | 0x10);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![AttributeFlag::Directory]);
    }
}
