//! Interactive record-management session.
//!
//! # Responsibility
//! - Drive the numbered menu over an owned store.
//! - Keep terminal I/O generic so sessions can be scripted in tests.
//!
//! # Invariants
//! - The store is lent to the session; the caller keeps ownership.
//! - Save failure on exit is non-fatal; load failure never reaches here.

pub mod menu;
mod runner;

pub use menu::MenuChoice;
pub use runner::{run_session, Session, SessionOutcome, SessionState};
