//! Converters from external data formats into range records.

pub mod csv;

pub use csv::parse_records;
