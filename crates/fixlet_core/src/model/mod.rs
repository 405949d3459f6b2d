//! Domain model for the fixlet dataset.
//!
//! # Responsibility
//! - Define the record shape shared by every layer.
//!
//! # Invariants
//! - Records are plain values; the store owns every record it holds.

pub mod record;
