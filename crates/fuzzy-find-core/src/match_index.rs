//! Flat, ordered list of highlighted matches with a cyclic cursor.

use crate::repository::RegionId;

/// A match whose character positions have been replaced by their highlight regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    regions: Vec<RegionId>,
}

impl MatchRecord {
    /// Create a record from regions in query order.
    pub fn new(regions: Vec<RegionId>) -> Self {
        Self { regions }
    }

    /// Regions in query order.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// First region; the scroll target when this match is selected.
    pub fn first_region(&self) -> Option<RegionId> {
        self.regions.first().copied()
    }
}

/// All matches of the current pass, in document order, plus the selected one.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    records: Vec<MatchRecord>,
    current: Option<usize>,
}

impl MatchIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the end of the order.
    pub fn push(&mut self, record: MatchRecord) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&MatchRecord> {
        self.records.get(index)
    }

    /// All records in order.
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Index of the selected record, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The selected record, if any.
    pub fn current(&self) -> Option<&MatchRecord> {
        self.current.and_then(|i| self.records.get(i))
    }

    /// Select `index`. Returns `false` (and leaves the selection alone) if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// Drop all records and the selection.
    pub fn clear(&mut self) {
        self.records.clear();
        self.current = None;
    }

    /// Advance the selection, wrapping to the first record. No-op when empty.
    ///
    /// With no selection, selects the first record.
    pub fn select_next(&mut self) -> Option<usize> {
        let count = self.records.len();
        if count == 0 {
            return None;
        }
        let next = match self.current {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.current = Some(next);
        self.current
    }

    /// Move the selection back, wrapping to the last record. No-op when empty.
    ///
    /// With no selection, selects the last record.
    pub fn select_previous(&mut self) -> Option<usize> {
        let count = self.records.len();
        if count == 0 {
            return None;
        }
        let previous = match self.current {
            Some(i) => (i + count - 1) % count,
            None => count - 1,
        };
        self.current = Some(previous);
        self.current
    }
}
