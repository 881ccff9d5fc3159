//! Binary file format for the range database.
//!
//! The format is a fixed header, a sorted array of fixed-size entries, and
//! an offset-addressed string table, laid out for memory-mapped O(log n)
//! lookup with zero-copy label access.
//!
//! # File Structure
//!
//! ```text
//! offset 0:            magic[4]       literal "NORD"
//! offset 4:            count          u32 LE, number of entries
//! offset 8:            str_bytes      u32 LE, string table length
//! offset 12:           entry[count]   12 bytes each: start, end, label_offset
//! offset 12+12*count:  string table   NUL-terminated UTF-8 labels
//! ```
//!
//! Entries are sorted ascending by start and pairwise non-overlapping; each
//! `label_offset` points into the string table. A file is accepted only if
//! the declared sections fit strictly inside the actual file size.

mod format;
mod reader;
pub mod writer;

#[cfg(test)]
mod tests;

pub use format::{Entry, Header, ENTRY_SIZE, HEADER_SIZE, MAGIC};
pub use reader::Database;
pub use writer::{build, DatabaseWriter};
