//! Classify fetch errors into retry policy error kinds.

use crate::retry::error::FetchError;
use crate::retry::policy::ErrorKind;

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return ErrorKind::Connection;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return ErrorKind::Fatal;
    }
    ErrorKind::Transport
}

/// Classify a fetch error into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Http(code) => ErrorKind::HttpStatus(*code as u16),
        FetchError::PartialTransfer { .. } => ErrorKind::Connection,
        FetchError::InvalidUrl(_)
        | FetchError::TooLarge { .. }
        | FetchError::Storage(_)
        | FetchError::Aborted => ErrorKind::Fatal,
    }
}
