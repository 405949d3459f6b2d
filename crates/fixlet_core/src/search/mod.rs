//! Record lookup by field value.
//!
//! # Responsibility
//! - Expose linear-scan filtering over the session store.

pub mod field_query;
