//! Binary format constants and structures.

use crate::{Error, Result};

/// Magic bytes identifying a georange database file.
pub const MAGIC: [u8; 4] = *b"NORD";

/// Header size in bytes.
pub const HEADER_SIZE: usize = 12;

/// Entry size in bytes.
pub const ENTRY_SIZE: usize = 12;

/// File header: magic, entry count, string table length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of entries following the header.
    pub count: u32,
    /// Byte length of the trailing string table, terminators included.
    pub str_bytes: u32,
}

impl Header {
    /// Decode a header from the start of a buffer.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::InvalidHeaderSize {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }
        if bytes[0..4] != MAGIC {
            return Err(Error::InvalidMagic);
        }
        Ok(Self {
            count: read_u32(bytes, 4),
            str_bytes: read_u32(bytes, 8),
        })
    }

    /// Check the declared sections against the actual file size.
    ///
    /// The arithmetic is done in u64 so an adversarial `count` or
    /// `str_bytes` cannot wrap before the comparison. Strictly less-than:
    /// at least one byte must remain past the last declared offset.
    pub fn validate(&self, file_size: u64) -> Result<()> {
        let declared = HEADER_SIZE as u64
            + self.count as u64 * ENTRY_SIZE as u64
            + self.str_bytes as u64;

        if declared >= file_size {
            return Err(Error::Truncated {
                declared,
                actual: file_size,
            });
        }
        Ok(())
    }

    /// Encode the header into its on-disk form.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&MAGIC);
        bytes[4..8].copy_from_slice(&self.count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.str_bytes.to_le_bytes());
        bytes
    }
}

/// One range entry: inclusive bounds plus a string-table offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub start: u32,
    pub end: u32,
    pub label_offset: u32,
}

impl Entry {
    /// Decode an entry from 12 bytes.
    ///
    /// Callers hand in a slice of at least `ENTRY_SIZE` bytes; the reader
    /// guarantees that via its validated bounds.
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            start: read_u32(bytes, 0),
            end: read_u32(bytes, 4),
            label_offset: read_u32(bytes, 8),
        }
    }

    /// Encode the entry into its on-disk form.
    pub fn encode(&self) -> [u8; ENTRY_SIZE] {
        let mut bytes = [0u8; ENTRY_SIZE];
        bytes[0..4].copy_from_slice(&self.start.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.end.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.label_offset.to_le_bytes());
        bytes
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(buf)
}
