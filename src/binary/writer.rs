//! Binary database writer.

use std::fs;
use std::fs::File;
use std::path::Path;

use log::info;

use super::format::{Entry, Header, ENTRY_SIZE, HEADER_SIZE};
use crate::converter::csv::parse_records;
use crate::record::{sort_and_merge, RangeRecord};
use crate::{Error, Result};

/// Serializes a sorted, merged record table into the binary layout.
pub struct DatabaseWriter {
    buffer: Vec<u8>,
}

impl DatabaseWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(1024 * 1024), // 1MB initial
        }
    }

    /// Serialize records into a complete database image.
    ///
    /// Records must already be sorted and merged; each label is appended to
    /// the string table NUL-terminated, and its entry carries the cumulative
    /// offset at which it landed.
    pub fn write(&mut self, records: Vec<RangeRecord>) -> Result<Vec<u8>> {
        let count =
            u32::try_from(records.len()).map_err(|_| Error::TooLarge("entry count"))?;

        self.buffer.clear();
        self.buffer.resize(HEADER_SIZE, 0);

        let mut string_table: Vec<u8> =
            Vec::with_capacity(records.len() * 16 + records.len());

        for record in records {
            let label_offset = u32::try_from(string_table.len())
                .map_err(|_| Error::TooLarge("string table"))?;

            let entry = Entry {
                start: record.start,
                end: record.end,
                label_offset,
            };
            self.buffer.extend_from_slice(&entry.encode());

            string_table.extend_from_slice(record.label.as_bytes());
            string_table.push(0);
        }

        let str_bytes =
            u32::try_from(string_table.len()).map_err(|_| Error::TooLarge("string table"))?;
        self.buffer.extend_from_slice(&string_table);

        // The size check on load is strict: the declared sections must leave
        // at least one byte of slack. Pad so our own output passes it.
        self.buffer.push(0);

        let header = Header { count, str_bytes };
        self.buffer[..HEADER_SIZE].copy_from_slice(&header.encode());

        debug_assert_eq!(
            self.buffer.len(),
            HEADER_SIZE + count as usize * ENTRY_SIZE + str_bytes as usize + 1
        );

        Ok(std::mem::take(&mut self.buffer))
    }
}

impl Default for DatabaseWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a binary database file from a geolocation CSV file.
///
/// Parses the CSV, sorts and merges the ranges, and writes the serialized
/// image to `out_path`. Fails if the CSV yields no usable rows or the
/// output cannot be written.
pub fn build(csv_path: &Path, out_path: &Path) -> Result<()> {
    let file = File::open(csv_path)?;
    let records = parse_records(file)?;
    info!("loaded {} rows from {}", records.len(), csv_path.display());

    let merged = sort_and_merge(records);
    info!("{} ranges after merge", merged.len());

    let data = DatabaseWriter::new().write(merged)?;
    fs::write(out_path, &data)?;
    info!("wrote {} bytes to {}", data.len(), out_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::format::MAGIC;

    #[test]
    fn test_write_empty_table() {
        let data = DatabaseWriter::new().write(Vec::new()).unwrap();
        assert_eq!(data.len(), HEADER_SIZE + 1);
        assert_eq!(&data[0..4], &MAGIC);
        assert_eq!(&data[4..8], &0u32.to_le_bytes());
        assert_eq!(&data[8..12], &0u32.to_le_bytes());
    }

    #[test]
    fn test_write_layout_and_offsets() {
        let data = DatabaseWriter::new()
            .write(vec![
                RangeRecord::new(10, 20, "US,X"),
                RangeRecord::new(30, 40, "FR,Paris"),
            ])
            .unwrap();

        let header = Header::parse(&data).unwrap();
        assert_eq!(header.count, 2);
        // "US,X\0" + "FR,Paris\0"
        assert_eq!(header.str_bytes, 5 + 9);
        assert_eq!(
            data.len(),
            HEADER_SIZE + 2 * ENTRY_SIZE + header.str_bytes as usize + 1
        );

        let first = Entry::parse(&data[HEADER_SIZE..]);
        assert_eq!((first.start, first.end, first.label_offset), (10, 20, 0));

        let second = Entry::parse(&data[HEADER_SIZE + ENTRY_SIZE..]);
        assert_eq!((second.start, second.end, second.label_offset), (30, 40, 5));

        let strings = &data[HEADER_SIZE + 2 * ENTRY_SIZE..][..header.str_bytes as usize];
        assert_eq!(strings, b"US,X\0FR,Paris\0");
    }
}
