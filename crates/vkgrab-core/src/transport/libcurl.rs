//! libcurl-backed transport.
//!
//! One `Easy` handle is reused for every request of a run, so connections to
//! the same host are kept alive between attachments. Dropping the transport
//! closes the session.

use std::cell::RefCell;
use std::str;
use std::time::Duration;

use super::{parse_response_head, BodySink, ResponseHead, Transport};
use crate::control::StopToken;
use crate::retry::FetchError;

/// Connection settings for [`CurlTransport`].
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Connect timeout, and the longest the transfer may stall without
    /// receiving a byte.
    pub timeout: Duration,
    pub max_redirects: u32,
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            user_agent: concat!("vkgrab/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Per-request state shared by the header and write callbacks.
#[derive(Default)]
struct ResponseState {
    headers: Vec<String>,
    head: Option<ResponseHead>,
    error: Option<FetchError>,
}

pub struct CurlTransport {
    easy: curl::easy::Easy,
    stop: StopToken,
}

impl CurlTransport {
    pub fn new(opts: &TransportOptions, stop: StopToken) -> Result<Self, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.follow_location(true)?;
        easy.max_redirections(opts.max_redirects)?;
        easy.connect_timeout(opts.timeout)?;
        // No hard wall-clock limit: abort only when the transfer stalls
        // (below 1 byte/s for `timeout`).
        easy.low_speed_limit(1)?;
        easy.low_speed_time(opts.timeout)?;
        easy.useragent(&opts.user_agent)?;
        easy.progress(true)?;
        Ok(Self { easy, stop })
    }
}

impl Transport for CurlTransport {
    fn get(&mut self, url: &str, sink: &mut dyn BodySink) -> Result<ResponseHead, FetchError> {
        self.easy.url(url).map_err(FetchError::Curl)?;
        self.easy.get(true).map_err(FetchError::Curl)?;

        let state = RefCell::new(ResponseState::default());
        let stop = &self.stop;
        let perform_result = {
            let mut transfer = self.easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(line) = str::from_utf8(data) {
                        let line = line.trim_end();
                        let mut st = state.borrow_mut();
                        // A new status line starts a new response (after a redirect).
                        if line.starts_with("HTTP/") {
                            st.headers.clear();
                        }
                        st.headers.push(line.to_string());
                    }
                    true
                })
                .map_err(FetchError::Curl)?;
            transfer
                .write_function(|data| {
                    let mut st = state.borrow_mut();
                    if st.head.is_none() {
                        let head = parse_response_head(&st.headers);
                        st.head = Some(head);
                        if !(200..300).contains(&head.status) {
                            st.error = Some(FetchError::Http(head.status));
                            return Ok(0);
                        }
                        if let Err(e) = sink.on_head(&head) {
                            st.error = Some(e);
                            return Ok(0);
                        }
                    }
                    if stop.is_stopped() {
                        st.error = Some(FetchError::Aborted);
                        return Ok(0);
                    }
                    match sink.on_chunk(data) {
                        Ok(()) => Ok(data.len()),
                        Err(e) => {
                            st.error = Some(e);
                            Ok(0)
                        }
                    }
                })
                .map_err(FetchError::Curl)?;
            transfer
                .progress_function(|_, _, _, _| !stop.is_stopped())
                .map_err(FetchError::Curl)?;
            transfer.perform()
        };

        let mut st = state.into_inner();
        if let Err(e) = perform_result {
            if let Some(err) = st.error.take() {
                return Err(err);
            }
            if e.is_aborted_by_callback() {
                return Err(FetchError::Aborted);
            }
            return Err(FetchError::Curl(e));
        }

        let code = self.easy.response_code().map_err(FetchError::Curl)?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }

        match st.head {
            Some(head) => Ok(head),
            None => {
                // Empty body: the write callback never ran.
                let mut head = parse_response_head(&st.headers);
                head.status = code;
                sink.on_head(&head)?;
                Ok(head)
            }
        }
    }
}
