//! GeoRange - IPv4 range to geographic label lookup.
//!
//! This crate maps IPv4 addresses to `"<countryCode>,<cityName>"` labels by
//! consulting a table of non-overlapping inclusive address ranges, loaded
//! from a compact memory-mapped binary file or held directly in memory.
//!
//! # Features
//!
//! - **Compact binary format**: fixed header, sorted fixed-size entries, and
//!   an offset-addressed string table, validated against untrusted input
//!   before any byte is dereferenced
//! - **Builder**: geolocation CSV ingestion with quote-aware splitting, range
//!   validation, and adjacent-range merging
//! - **O(log n) lookup**: one binary search shared by the memory-mapped and
//!   in-memory substrates, with zero-copy label access
//! - **Hot reload**: atomic replace-then-reopen via [`GeoManager`]
//!
//! # Quick Start
//!
//! ```ignore
//! use georange::{binary, Database};
//! use std::path::Path;
//!
//! // Build a binary database from a geolocation CSV dump
//! binary::build(Path::new("ranges.csv"), Path::new("ranges.bin"))?;
//!
//! // Open it and answer queries
//! let db = Database::open(Path::new("ranges.bin"))?;
//! if let Some(label) = db.lookup_str("1.2.3.4") {
//!     println!("{}", label); // e.g. "US,Los Angeles"
//! }
//! ```
//!
//! For serving straight from CSV without a serialized file, use
//! [`MemoryIndex`]; both substrates run the same search through the
//! [`index::RangeTable`] abstraction.

mod error;
mod manager;
mod record;

pub mod binary;
pub mod converter;
pub mod index;
pub mod ip;

// Re-export core types
pub use error::{Error, Result};
pub use record::{sort_and_merge, RangeRecord};

// Re-export lookup surfaces
pub use binary::{build, Database, DatabaseWriter};
pub use index::MemoryIndex;
pub use ip::parse_ipv4;

// Re-export hot-reload manager
pub use manager::GeoManager;
