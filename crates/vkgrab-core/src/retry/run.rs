//! Retry loop: run a closure until success or policy says stop.

use std::fmt;

use super::classify;
use super::error::FetchError;
use super::policy::{RetryDecision, RetryPolicy};
use crate::control::StopToken;

/// Final error of a retried operation, with the number of attempts made.
#[derive(Debug)]
pub struct RetryError {
    pub attempts: u32,
    pub error: FetchError,
}

impl fmt::Display for RetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after {} attempt(s))", self.error, self.attempts)
    }
}

impl std::error::Error for RetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Runs `f` until it succeeds or the retry policy says to stop.
/// `f` receives the 1-based attempt number. On retryable failure, sleeps for
/// the policy delay (cut short by `stop`) then tries again.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, stop: &StopToken, mut f: F) -> Result<T, RetryError>
where
    F: FnMut(u32) -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(error) => {
                let kind = classify::classify(&error);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(RetryError { attempts: attempt, error }),
                    RetryDecision::RetryAfter(d) => {
                        tracing::debug!(attempt, error = %error, "attempt failed, retrying in {:?}", d);
                        if !stop.sleep(d) {
                            return Err(RetryError {
                                attempts: attempt,
                                error: FetchError::Aborted,
                            });
                        }
                        attempt += 1;
                    }
                }
            }
        }
    }
}
