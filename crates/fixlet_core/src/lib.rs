//! Core logic for the fixlet record manager.
//! Loads a CSV dataset into memory, serves an interactive menu over it and
//! writes it back on exit.

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod session;

pub use codec::{
    decode, encode, load_records, save_records, CodecDirection, CodecError, CodecResult,
};
pub use config::{AppConfig, DATA_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{parse_count_or_zero, FixletRecord, RECORD_HEADER};
pub use repo::record_store::RecordStore;
pub use search::field_query::{parse_query_field, query, QueryField};
pub use service::record_ops::{list, sort_by_fixlet_id};
pub use session::{run_session, MenuChoice, Session, SessionOutcome, SessionState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
