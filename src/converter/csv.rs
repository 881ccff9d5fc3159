//! Geolocation CSV parser.
//!
//! Rows look like:
//!
//! ```text
//! "16777216","16777471","US","United States","California","Los Angeles",...
//! ```
//!
//! Fields may or may not be double-quote wrapped; commas inside quotes are
//! not separators. Only the first, second, third, and sixth fields are used:
//! numeric start, numeric end, country code, and city name. Extra fields are
//! ignored.

use std::io::{BufRead, BufReader, Read};

use log::debug;

use crate::record::RangeRecord;
use crate::{Error, Result};

/// Parse range records from a CSV stream.
///
/// A row is accepted iff it has at least 6 fields, its first two fields
/// parse as u32, and `end >= start`. Rejected rows are skipped; an input
/// yielding zero accepted rows is an error.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<RangeRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in BufReader::new(reader).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(&line) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                debug!("skipping malformed CSV row: {}", line);
            }
        }
    }

    if records.is_empty() {
        return Err(Error::NoValidRows);
    }

    if skipped > 0 {
        debug!("skipped {} malformed rows", skipped);
    }

    Ok(records)
}

/// Parse one CSV row into a record, or `None` if the row is unusable.
fn parse_row(line: &str) -> Option<RangeRecord> {
    let fields = split_fields(line);
    if fields.len() < 6 {
        return None;
    }

    let start: u32 = fields[0].parse().ok()?;
    let end: u32 = fields[1].parse().ok()?;
    if end < start {
        return None;
    }

    let label = format!("{},{}", fields[2], fields[5]);
    Some(RangeRecord { start, end, label })
}

/// Split a row on commas, honoring double-quoted fields.
///
/// Quote state is tracked per character: a comma inside quotes is part of
/// the field, and the quotes themselves are stripped from the value.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}
