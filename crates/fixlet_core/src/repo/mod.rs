//! Record storage for the running session.
//!
//! # Responsibility
//! - Own the in-memory record sequence and its mutations.
//! - Stay independent of file format and terminal I/O.
//!
//! # Invariants
//! - The store is an explicitly owned value; there is no process-wide store.

pub mod record_store;
