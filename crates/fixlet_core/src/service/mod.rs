//! Use-case operations over the session store.
//!
//! # Responsibility
//! - Provide list and sort entry points for the session loop.
//! - Keep terminal rendering out of store logic.

pub mod record_ops;
