//! Persisted CSV format for fixlet records.
//!
//! # Responsibility
//! - Convert between the comma-delimited file and in-memory records.
//! - Classify failures into read-side and write-side errors.
//!
//! # Invariants
//! - The header line is always written, even for an empty dataset.
//! - The header and every data row have exactly five positional fields.
//! - Quoting follows RFC 4180 strictly; stray quotes fail the load.
//! - The count column goes through `parse_count_or_zero`, never a hard parse.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

mod csv_file;

pub use csv_file::{decode, encode, load_records, save_records};

pub type CodecResult<T> = Result<T, CodecError>;

/// Which side of persistence a codec failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecDirection {
    /// Fatal at startup; the session never begins.
    Read,
    /// Reported at exit; the session still ends.
    Write,
}

/// Codec error for loading and saving the fixlet file.
#[derive(Debug)]
pub enum CodecError {
    /// Source could not be opened or its CSV structure could not be parsed.
    Read {
        path: Option<PathBuf>,
        source: csv::Error,
    },
    /// Source had no header line at all.
    MissingHeader { path: Option<PathBuf> },
    /// A quote appeared inside an unquoted field, text followed a closing
    /// quote, or a quoted field was never closed.
    MalformedQuoting { path: Option<PathBuf>, line: u64 },
    /// The header or a data row did not carry exactly five fields.
    MalformedRow {
        path: Option<PathBuf>,
        line: u64,
        found: usize,
    },
    /// Destination could not be created, written or flushed.
    Write {
        path: Option<PathBuf>,
        source: csv::Error,
    },
}

impl CodecError {
    pub fn direction(&self) -> CodecDirection {
        match self {
            Self::Read { .. }
            | Self::MissingHeader { .. }
            | Self::MalformedQuoting { .. }
            | Self::MalformedRow { .. } => CodecDirection::Read,
            Self::Write { .. } => CodecDirection::Write,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. }
            | Self::MissingHeader { path }
            | Self::MalformedQuoting { path, .. }
            | Self::MalformedRow { path, .. }
            | Self::Write { path, .. } => path.as_deref(),
        }
    }

    /// Attaches the file path to an error raised by stream-level codec calls.
    pub(crate) fn at(mut self, file: &Path) -> Self {
        match &mut self {
            Self::Read { path, .. }
            | Self::MissingHeader { path }
            | Self::MalformedQuoting { path, .. }
            | Self::MalformedRow { path, .. }
            | Self::Write { path, .. } => *path = Some(file.to_path_buf()),
        }
        self
    }
}

fn describe(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!(" `{}`", path.display()),
        None => String::new(),
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read fixlet data{}: {source}", describe(path.as_deref()))
            }
            Self::MissingHeader { path } => {
                write!(f, "fixlet data{} has no header line", describe(path.as_deref()))
            }
            Self::MalformedQuoting { path, line } => write!(
                f,
                "fixlet data{} line {line}: malformed quoting",
                describe(path.as_deref())
            ),
            Self::MalformedRow { path, line, found } => write!(
                f,
                "fixlet data{} line {line}: expected 5 fields, found {found}",
                describe(path.as_deref())
            ),
            Self::Write { path, source } => {
                write!(f, "failed to write fixlet data{}: {source}", describe(path.as_deref()))
            }
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::MissingHeader { .. }
            | Self::MalformedQuoting { .. }
            | Self::MalformedRow { .. } => None,
        }
    }
}
