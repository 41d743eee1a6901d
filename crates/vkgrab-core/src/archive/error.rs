//! Error types for archive parsing.

use std::path::PathBuf;

/// A message date that could not be turned into a timestamp. The caller skips
/// the enclosing message.
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error("no message date in {0:?}")]
    NoDate(String),
    #[error("unknown month {0:?}")]
    UnknownMonth(String),
    #[error("invalid date {input:?}: {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Parse(#[from] ParseFailure),
    #[error("chat directory does not exist: {}", path.display())]
    MissingDirectory { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
