//! Interactive fixlet record manager.
//!
//! # Responsibility
//! - Load `file.csv`, run the menu session on stdin/stdout, save on exit.
//! - Always exit with status 0, including after a load failure.

use fixlet_core::{core_version, init_logging, load_records, run_session, AppConfig, RecordStore};
use log::{error, info};
use std::io;

fn main() {
    let config = match std::env::current_dir() {
        Ok(working_dir) => Some(AppConfig::from_working_dir(working_dir)),
        Err(err) => {
            eprintln!("logging disabled: cannot resolve working directory: {err}");
            None
        }
    };

    if let Some(config) = &config {
        if let Err(err) = init_logging(config.log_level, &config.log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }
    let data_path = config.map_or_else(
        || fixlet_core::DATA_FILE_NAME.into(),
        |config| config.data_path,
    );

    info!(
        "event=app_start module=cli status=ok platform={} version={}",
        std::env::consts::OS,
        core_version()
    );

    let mut store = match load_records(&data_path) {
        Ok(records) => RecordStore::from_records(records),
        Err(err) => {
            println!("Error loading file: {err}");
            return;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = run_session(&mut store, &data_path, stdin.lock(), stdout.lock()) {
        error!("event=app_exit module=cli status=error error_code=terminal_io error={err}");
        eprintln!("terminal error: {err}");
    }
}
