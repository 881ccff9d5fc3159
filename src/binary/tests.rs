//! Round-trip and adversarial-input tests for the binary format.

use super::format::{Header, ENTRY_SIZE, HEADER_SIZE, MAGIC};
use super::reader::Database;
use super::writer::DatabaseWriter;
use crate::record::{sort_and_merge, RangeRecord};
use crate::Error;

/// Helper: serialize records and reopen them through the reader.
fn write_and_read(records: Vec<RangeRecord>) -> Database {
    let data = DatabaseWriter::new()
        .write(sort_and_merge(records))
        .expect("failed to serialize records");
    Database::from_bytes(data).expect("failed to open serialized database")
}

// ============================================================================
// Round-trip
// ============================================================================

#[test]
fn test_round_trip_preserves_labels() {
    let db = write_and_read(vec![
        RangeRecord::new(10, 20, "US,Los Angeles"),
        RangeRecord::new(30, 40, "FR,Paris"),
        RangeRecord::new(100, 200, "JP,Tokyo"),
    ]);

    assert_eq!(db.entry_count(), 3);
    for ip in [10, 15, 20] {
        assert_eq!(db.lookup(ip), Some("US,Los Angeles"));
    }
    assert_eq!(db.lookup(35), Some("FR,Paris"));
    assert_eq!(db.lookup(150), Some("JP,Tokyo"));
}

#[test]
fn test_round_trip_misses() {
    let db = write_and_read(vec![
        RangeRecord::new(10, 20, "US,X"),
        RangeRecord::new(30, 40, "FR,Y"),
    ]);

    assert_eq!(db.lookup(9), None);
    assert_eq!(db.lookup(25), None);
    assert_eq!(db.lookup(41), None);
    assert_eq!(db.lookup(u32::MAX), None);
}

#[test]
fn test_round_trip_merges_before_serialization() {
    let db = write_and_read(vec![
        RangeRecord::new(10, 20, "US,X"),
        RangeRecord::new(21, 30, "US,X"),
    ]);

    assert_eq!(db.entry_count(), 1);
    assert_eq!(db.lookup(25), Some("US,X"));
}

#[test]
fn test_round_trip_boundary_addresses() {
    let db = write_and_read(vec![RangeRecord::new(0, u32::MAX, "XX,Everywhere")]);

    assert_eq!(db.lookup(0), Some("XX,Everywhere"));
    assert_eq!(db.lookup(u32::MAX), Some("XX,Everywhere"));
}

#[test]
fn test_lookup_str_composes_codec() {
    let db = write_and_read(vec![RangeRecord::new(0x01020304, 0x01020310, "GB,London")]);

    assert_eq!(db.lookup_str("1.2.3.4"), Some("GB,London"));
    assert_eq!(db.lookup_str("1.2.3.20"), None);
    assert_eq!(db.lookup_str("not an ip"), None);
}

#[test]
fn test_single_entry_database() {
    let db = write_and_read(vec![RangeRecord::new(5, 5, "SG,Singapore")]);

    assert_eq!(db.lookup(4), None);
    assert_eq!(db.lookup(5), Some("SG,Singapore"));
    assert_eq!(db.lookup(6), None);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_rejects_bad_magic() {
    let mut data = DatabaseWriter::new()
        .write(vec![RangeRecord::new(1, 2, "US,X")])
        .unwrap();
    data[0] = b'X';

    assert!(matches!(
        Database::from_bytes(data),
        Err(Error::InvalidMagic)
    ));
}

#[test]
fn test_rejects_file_shorter_than_header() {
    let mut data = Vec::from(MAGIC);
    data.extend_from_slice(&[0, 0, 0]);

    assert!(matches!(
        Database::from_bytes(data),
        Err(Error::InvalidHeaderSize { .. })
    ));
}

#[test]
fn test_rejects_truncated_entry_array() {
    let mut data = DatabaseWriter::new()
        .write(vec![
            RangeRecord::new(1, 2, "US,X"),
            RangeRecord::new(10, 20, "FR,Y"),
        ])
        .unwrap();
    data.truncate(HEADER_SIZE + ENTRY_SIZE);

    assert!(matches!(
        Database::from_bytes(data),
        Err(Error::Truncated { .. })
    ));
}

#[test]
fn test_rejects_exact_size_no_slack() {
    // Declared sections exactly equal to the file size must be rejected:
    // the check is strictly less-than.
    let header = Header {
        count: 1,
        str_bytes: 5,
    };
    let mut data = Vec::from(header.encode());
    data.resize(HEADER_SIZE + ENTRY_SIZE + 5, 0);

    assert!(matches!(
        Database::from_bytes(data),
        Err(Error::Truncated { .. })
    ));
}

#[test]
fn test_rejects_adversarial_count() {
    // count * ENTRY_SIZE would wrap 32-bit arithmetic; the validator must
    // still see the file as far too small.
    let header = Header {
        count: u32::MAX,
        str_bytes: u32::MAX,
    };
    let mut data = Vec::from(header.encode());
    data.resize(4096, 0);

    assert!(matches!(
        Database::from_bytes(data),
        Err(Error::Truncated { .. })
    ));
}

#[test]
fn test_header_validate_wide_arithmetic() {
    let header = Header {
        count: 0x4000_0000, // * 12 overflows u32
        str_bytes: 16,
    };
    assert!(header.validate(1 << 20).is_err());

    let ok = Header {
        count: 2,
        str_bytes: 10,
    };
    assert!(ok.validate((HEADER_SIZE + 2 * ENTRY_SIZE + 10 + 1) as u64).is_ok());
    assert!(ok.validate((HEADER_SIZE + 2 * ENTRY_SIZE + 10) as u64).is_err());
}

// ============================================================================
// String table bounds
// ============================================================================

#[test]
fn test_label_at_rejects_out_of_table_offset() {
    let db = write_and_read(vec![RangeRecord::new(1, 2, "US,X")]);

    assert_eq!(db.label_at(0), Some("US,X"));
    // "US,X\0" is 5 bytes; anything at or past that is outside the table.
    assert_eq!(db.label_at(5), None);
    assert_eq!(db.label_at(u32::MAX), None);
}

#[test]
fn test_label_scan_stops_at_table_end() {
    // Hand-build a file whose label has no terminator inside the table.
    let header = Header {
        count: 1,
        str_bytes: 4,
    };
    let mut data = Vec::from(header.encode());
    data.extend_from_slice(
        &super::format::Entry {
            start: 1,
            end: 2,
            label_offset: 0,
        }
        .encode(),
    );
    data.extend_from_slice(b"US,X"); // no NUL within str_bytes
    data.push(0); // slack byte, outside the declared table

    let db = Database::from_bytes(data).unwrap();
    assert_eq!(db.lookup(1), None);
}
