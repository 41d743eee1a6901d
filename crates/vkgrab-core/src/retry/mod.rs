//! Retry policy for attachment fetches.
//!
//! Transport failures (timeouts, connection errors, non-success statuses) are
//! retried with a fixed delay up to a fixed number of attempts; storage
//! failures, oversized payloads and stop requests end the download at once.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, RetryError};
