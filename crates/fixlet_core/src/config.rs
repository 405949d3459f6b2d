//! Process configuration for the fixlet record manager.
//!
//! # Responsibility
//! - Resolve the backing data file and logging settings in one place.
//!
//! # Invariants
//! - The data file path is fixed; arguments and environment are never read.
//! - `log_dir` is always absolute, as `init_logging` requires.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

/// Backing file, relative to the working directory.
pub const DATA_FILE_NAME: &str = "file.csv";
const LOG_DIR_NAME: &str = "logs";

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Builds the configuration for a process running in `working_dir`.
    pub fn from_working_dir(working_dir: impl AsRef<Path>) -> Self {
        Self {
            data_path: PathBuf::from(DATA_FILE_NAME),
            log_level: default_log_level(),
            log_dir: working_dir.as_ref().join(LOG_DIR_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DATA_FILE_NAME};
    use crate::logging::default_log_level;
    use std::path::{Path, PathBuf};

    #[test]
    fn from_working_dir_uses_fixed_data_file() {
        let config = AppConfig::from_working_dir("/srv/fixlets");

        assert_eq!(config.data_path, PathBuf::from(DATA_FILE_NAME));
        assert_eq!(config.log_dir, Path::new("/srv/fixlets").join("logs"));
        assert_eq!(config.log_level, default_log_level());
    }
}
