//! Listing and ordering operations over the record store.
//!
//! # Responsibility
//! - Produce numbered listings without copying records.
//! - Reorder the store by fixlet key.
//!
//! # Invariants
//! - Listing indexes are 1-based and follow current store order.
//! - Sorting is stable; equal keys keep their relative order.

use crate::model::record::FixletRecord;
use crate::repo::record_store::RecordStore;
use log::info;

/// Lazily yields `(1-based index, record)` pairs in current store order.
///
/// Each call starts a fresh pass, so a later call reflects any mutations made
/// in between.
pub fn list(store: &RecordStore) -> impl Iterator<Item = (usize, &FixletRecord)> + '_ {
    store
        .all()
        .iter()
        .enumerate()
        .map(|(offset, record)| (offset + 1, record))
}

/// Sorts the store ascending by `fixlet_id` using byte-wise string order.
pub fn sort_by_fixlet_id(store: &mut RecordStore) {
    store.sort_by(|left, right| left.fixlet_id.cmp(&right.fixlet_id));
    info!(
        "event=store_sort module=service status=ok key=fixlet_id records={}",
        store.len()
    );
}
