//! Error types for georange.

use thiserror::Error;

/// Error type for georange operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid binary file magic bytes
    #[error("invalid magic bytes: expected NORD header")]
    InvalidMagic,

    /// File too small to hold a header
    #[error("invalid header size: expected {expected}, got {actual}")]
    InvalidHeaderSize { expected: usize, actual: usize },

    /// Declared sections exceed the actual file size
    #[error("truncated or inconsistent file: declared {declared} bytes, file is {actual}")]
    Truncated { declared: u64, actual: u64 },

    /// Invalid dotted-quad IPv4 address
    #[error("invalid IPv4 address: {0}")]
    InvalidIp(String),

    /// CSV input produced no usable ranges
    #[error("no valid rows parsed from CSV input")]
    NoValidRows,

    /// A format field exceeded its u32 capacity during serialization
    #[error("table too large for format: {0}")]
    TooLarge(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for georange operations.
pub type Result<T> = std::result::Result<T, Error>;
