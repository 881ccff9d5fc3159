//! Generic range index: one binary search over two storage substrates.
//!
//! The memory-mapped [`Database`](crate::Database) stores its labels in a
//! file-embedded string table; [`MemoryIndex`] owns its records outright.
//! Both expose the same sorted, non-overlapping entry array through
//! [`RangeTable`], so the search logic lives here exactly once.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::converter::csv::parse_records;
use crate::ip::parse_ipv4;
use crate::record::{sort_and_merge, RangeRecord};
use crate::Result;

/// A sorted table of non-overlapping inclusive ranges with labels.
///
/// Implementors guarantee entries are sorted ascending by start and pairwise
/// non-overlapping; `lookup_in` relies on that and does not re-check it.
pub trait RangeTable {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the table has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inclusive bounds of entry `idx`, or `None` out of range.
    fn bounds(&self, idx: usize) -> Option<(u32, u32)>;

    /// Label of entry `idx`, or `None` out of range or unreadable.
    fn label(&self, idx: usize) -> Option<&str>;
}

/// Binary search for the unique entry covering `ip`.
///
/// Maintains `[left, right)` over entry indices; narrows right when `ip`
/// falls before the midpoint range, left when past it, and returns the
/// midpoint label on a hit. `None` when no range covers `ip`.
pub fn lookup_in<T: RangeTable + ?Sized>(table: &T, ip: u32) -> Option<&str> {
    let mut left = 0usize;
    let mut right = table.len();

    while left < right {
        let middle = left + (right - left) / 2;
        let (start, end) = table.bounds(middle)?;

        if ip < start {
            right = middle;
        } else if ip > end {
            left = middle + 1;
        } else {
            return table.label(middle);
        }
    }

    None
}

/// Pure in-memory range index backed by an owned record vector.
///
/// This is the substrate used when serving directly from CSV without a
/// serialized database file. Records are sorted and merged on construction.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    records: Vec<RangeRecord>,
}

impl MemoryIndex {
    /// Build an index from raw records, sorting and merging them.
    pub fn from_records(records: Vec<RangeRecord>) -> Self {
        Self {
            records: sort_and_merge(records),
        }
    }

    /// Load, sort, and merge ranges from a CSV file.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_records(parse_records(file)?))
    }

    /// Load ranges from any CSV reader.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_records(parse_records(reader)?))
    }

    /// Number of merged ranges.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The merged, sorted records.
    pub fn records(&self) -> &[RangeRecord] {
        &self.records
    }

    /// Look up the label covering a numeric address.
    pub fn lookup(&self, ip: u32) -> Option<&str> {
        lookup_in(self, ip)
    }

    /// Look up the label covering a dotted-quad address.
    ///
    /// Malformed text is a miss, not an error.
    pub fn lookup_str(&self, ip: &str) -> Option<&str> {
        self.lookup(parse_ipv4(ip).ok()?)
    }
}

impl RangeTable for MemoryIndex {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn bounds(&self, idx: usize) -> Option<(u32, u32)> {
        self.records.get(idx).map(|r| (r.start, r.end))
    }

    fn label(&self, idx: usize) -> Option<&str> {
        self.records.get(idx).map(|r| r.label.as_str())
    }
}
