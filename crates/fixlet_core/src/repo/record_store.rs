//! In-memory record store.
//!
//! # Responsibility
//! - Hold every record of the session in insertion order.
//! - Provide append and remove-by-key mutations.
//!
//! # Invariants
//! - Order only changes through append, removal or an explicit stable sort.
//! - Removal keeps the relative order of the remaining records.

use crate::model::record::FixletRecord;
use log::debug;
use std::cmp::Ordering;

/// Ordered, session-scoped collection of fixlet records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<FixletRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-decoded records, keeping their order.
    pub fn from_records(records: Vec<FixletRecord>) -> Self {
        Self { records }
    }

    /// Adds a record to the end of the store.
    pub fn append(&mut self, record: FixletRecord) {
        self.records.push(record);
        debug!(
            "event=store_append module=repo status=ok records={}",
            self.records.len()
        );
    }

    /// Removes every record whose `fixlet_id` equals `fixlet_id`.
    ///
    /// Returns the number of removed records; `0` is not an error.
    pub fn remove_by_key(&mut self, fixlet_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.fixlet_id != fixlet_id);
        let removed = before - self.records.len();
        debug!(
            "event=store_remove module=repo status=ok removed={} records={}",
            removed,
            self.records.len()
        );
        removed
    }

    /// Read-only view in current order.
    pub fn all(&self) -> &[FixletRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reorders records in place with a stable sort.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&FixletRecord, &FixletRecord) -> Ordering,
    {
        self.records.sort_by(compare);
    }
}
