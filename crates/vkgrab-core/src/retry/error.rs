//! Fetch error type for retry classification.

use std::fmt;

/// Error returned by a single fetch attempt.
/// Kept concrete (not anyhow) so it can be classified before deciding on a retry.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Not an absolute http(s) URL; no request is made.
    InvalidUrl(String),
    /// Body ended before the advertised `Content-Length`.
    PartialTransfer { expected: u64, received: u64 },
    /// Payload is above the size ceiling. Not an error for the run; never retried.
    TooLarge { length: u64 },
    /// Disk/storage failure (e.g. disk full, permission denied). Not retried.
    Storage(std::io::Error),
    /// Stop requested while the fetch was in progress.
    Aborted,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::InvalidUrl(url) => write!(f, "not an http(s) URL: {}", url),
            FetchError::PartialTransfer { expected, received } => {
                write!(f, "partial transfer: expected {} bytes, got {}", expected, received)
            }
            FetchError::TooLarge { length } => write!(f, "too large: {} bytes", length),
            FetchError::Storage(e) => write!(f, "storage: {}", e),
            FetchError::Aborted => write!(f, "aborted"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Storage(e) => Some(e),
            FetchError::Http(_)
            | FetchError::InvalidUrl(_)
            | FetchError::PartialTransfer { .. }
            | FetchError::TooLarge { .. }
            | FetchError::Aborted => None,
        }
    }
}
