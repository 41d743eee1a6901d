//! Single-attachment downloader.
//!
//! Each attempt waits the politeness delay, streams the body into a `.part`
//! file and, on success, stamps the message time onto the file and renames it
//! into place. Transport failures are retried with a fixed delay; oversized
//! payloads, storage errors and stop requests end the download immediately.
//! Nothing here panics or propagates: every result is a [`DownloadOutcome`].

mod sink;

use chrono::{Local, NaiveDateTime, TimeZone};
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::control::StopToken;
use crate::retry::{run_with_retry, FetchError, RetryError, RetryPolicy};
use crate::storage::{self, StorageWriter};
use crate::transport::Transport;
use sink::FileSink;

/// Largest payload that is fetched (100 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Pacing, retry and size limits for downloads.
#[derive(Debug, Clone, Copy)]
pub struct DownloadPolicy {
    pub retry: RetryPolicy,
    /// Wait before every request, retries included.
    pub request_delay: Duration,
    pub max_file_size: u64,
}

impl Default for DownloadPolicy {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            request_delay: Duration::from_secs(1),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { bytes: u64, attempts: u32 },
    /// Skipped by the size ceiling; nothing was written.
    TooLarge { length: u64 },
    Failed { attempts: u32, reason: String },
    Cancelled,
}

/// Message time (archive local time) as a file timestamp.
pub fn local_system_time(ts: NaiveDateTime) -> SystemTime {
    match Local.from_local_datetime(&ts).earliest() {
        Some(dt) => dt.into(),
        // Local time that does not exist (DST gap): fall back to UTC.
        None => ts.and_utc().into(),
    }
}

/// Downloads `url` to `dest` and sets its access/modification time to `timestamp`.
pub fn download_file(
    transport: &mut dyn Transport,
    url: &str,
    dest: &Path,
    timestamp: NaiveDateTime,
    policy: &DownloadPolicy,
    stop: &StopToken,
) -> DownloadOutcome {
    let temp = storage::temp_path(dest);
    let result = run_with_retry(&policy.retry, stop, |attempt| {
        check_url(url)?;
        if !stop.sleep(policy.request_delay) {
            return Err(FetchError::Aborted);
        }
        tracing::debug!(url, attempt, "fetching");
        fetch_once(transport, url, &temp, policy.max_file_size).map(|w| (w, attempt))
    });

    match result {
        Ok((writer, attempts)) => {
            let bytes = writer.written();
            match writer.finalize(dest, local_system_time(timestamp)) {
                Ok(()) => {
                    tracing::info!(url, path = %dest.display(), bytes, attempts, "downloaded");
                    DownloadOutcome::Downloaded { bytes, attempts }
                }
                Err(e) => {
                    remove_leftover(&temp);
                    tracing::warn!(url, path = %dest.display(), "could not store download: {:#}", e);
                    DownloadOutcome::Failed {
                        attempts,
                        reason: format!("{:#}", e),
                    }
                }
            }
        }
        Err(RetryError {
            error: FetchError::TooLarge { length },
            ..
        }) => {
            tracing::warn!(url, length, limit = policy.max_file_size, "file too large, skipping");
            DownloadOutcome::TooLarge { length }
        }
        Err(RetryError {
            error: FetchError::Aborted,
            ..
        }) => {
            tracing::info!(url, "download cancelled");
            DownloadOutcome::Cancelled
        }
        Err(RetryError { attempts, error }) => {
            tracing::warn!(url, attempts, "download failed: {}", error);
            DownloadOutcome::Failed {
                attempts,
                reason: error.to_string(),
            }
        }
    }
}

/// Only absolute http(s) URLs reach the transport.
fn check_url(url: &str) -> Result<(), FetchError> {
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(FetchError::InvalidUrl(url.to_string())),
    }
}

/// One attempt: fresh temp file, one GET. The temp file is removed on failure.
fn fetch_once(
    transport: &mut dyn Transport,
    url: &str,
    temp: &Path,
    max_file_size: u64,
) -> Result<StorageWriter, FetchError> {
    let writer = StorageWriter::create(temp).map_err(FetchError::Storage)?;
    let mut sink = FileSink::new(writer, max_file_size);
    match transport.get(url, &mut sink) {
        Ok(_) => sink.finish(),
        Err(e) => {
            sink.discard();
            Err(e)
        }
    }
}

fn remove_leftover(temp: &Path) {
    if let Err(e) = std::fs::remove_file(temp) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %temp.display(), "could not remove temp file: {}", e);
        }
    }
}
