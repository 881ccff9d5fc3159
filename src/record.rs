//! In-memory range records and the sort/merge pass.

/// One inclusive IPv4 range mapped to a geographic label.
///
/// The label is the already-composed `"<countryCode>,<cityName>"` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRecord {
    pub start: u32,
    pub end: u32,
    pub label: String,
}

impl RangeRecord {
    pub fn new(start: u32, end: u32, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Whether `ip` falls inside this range.
    pub fn contains(&self, ip: u32) -> bool {
        self.start <= ip && ip <= self.end
    }
}

/// Sort records by start and merge numerically adjacent, label-identical runs.
///
/// The sort is stable, so records with equal `start` keep their input order
/// and the merge pass resolves them last-wins style. Two records merge only
/// when `next.start` is exactly `current.end + 1` and the labels are
/// byte-equal; a one-address gap or a differing label never merges.
/// `checked_add` keeps a range ending at `u32::MAX` from wrapping into a
/// bogus merge with a range starting at 0.
pub fn sort_and_merge(mut records: Vec<RangeRecord>) -> Vec<RangeRecord> {
    records.sort_by_key(|r| r.start);

    let mut merged: Vec<RangeRecord> = Vec::with_capacity(records.len());
    for next in records {
        if let Some(current) = merged.last_mut() {
            if current.end.checked_add(1) == Some(next.start) && current.label == next.label {
                current.end = next.end;
                continue;
            }
        }
        merged.push(next);
    }
    merged
}
