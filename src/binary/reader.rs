//! Binary database reader with memory-mapping support.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use super::format::{Entry, Header, ENTRY_SIZE, HEADER_SIZE};
use crate::index::{lookup_in, RangeTable};
use crate::ip::parse_ipv4;
use crate::Result;

/// An open, validated range database backed by a memory-mapped file.
///
/// The handle owns the mapping for its whole lifetime; labels returned by
/// `lookup` borrow from it. Lookups take `&self` and the mapping is never
/// mutated, so a handle can be shared across threads freely. Dropping the
/// handle releases the mapping, on the failure paths of `open` included.
pub struct Database {
    mmap: Mmap,
    count: usize,
    string_base: usize,
    str_bytes: usize,
}

impl Database {
    /// Open and validate a database file.
    ///
    /// No entry or string byte is touched before the header's size check
    /// passes; a file failing validation never yields a handle.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_mmap(mmap)
    }

    /// Open a database from an in-memory image.
    ///
    /// Writes the data to a temp file and memory-maps it, so the handle
    /// behaves identically to a file-backed one.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        use std::io::Write;

        let mut temp_file = tempfile::tempfile()?;
        temp_file.write_all(&data)?;

        let mmap = unsafe { Mmap::map(&temp_file)? };
        Self::from_mmap(mmap)
    }

    fn from_mmap(mmap: Mmap) -> Result<Self> {
        let header = Header::parse(&mmap)?;
        header.validate(mmap.len() as u64)?;

        let count = header.count as usize;
        Ok(Self {
            mmap,
            count,
            string_base: HEADER_SIZE + count * ENTRY_SIZE,
            str_bytes: header.str_bytes as usize,
        })
    }

    /// Number of range entries.
    pub fn entry_count(&self) -> usize {
        self.count
    }

    /// Decode entry `idx`, or `None` past the end of the array.
    fn entry(&self, idx: usize) -> Option<Entry> {
        if idx >= self.count {
            return None;
        }
        let offset = HEADER_SIZE + idx * ENTRY_SIZE;
        let bytes = self.mmap.get(offset..offset + ENTRY_SIZE)?;
        Some(Entry::parse(bytes))
    }

    /// Read the NUL-terminated label at a string-table offset.
    ///
    /// The scan never leaves the string-table region: an offset at or past
    /// `str_bytes`, a missing terminator, or invalid UTF-8 all yield `None`.
    pub fn label_at(&self, offset: u32) -> Option<&str> {
        let offset = offset as usize;
        if offset >= self.str_bytes {
            return None;
        }

        let region = self
            .mmap
            .get(self.string_base + offset..self.string_base + self.str_bytes)?;
        let nul = region.iter().position(|&b| b == 0)?;
        std::str::from_utf8(&region[..nul]).ok()
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

impl RangeTable for Database {
    fn len(&self) -> usize {
        self.count
    }

    fn bounds(&self, idx: usize) -> Option<(u32, u32)> {
        self.entry(idx).map(|e| (e.start, e.end))
    }

    fn label(&self, idx: usize) -> Option<&str> {
        self.label_at(self.entry(idx)?.label_offset)
    }
}
