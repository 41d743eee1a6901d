//! HTTP transport seam.
//!
//! The downloader talks to the network through [`Transport`] so tests can
//! script responses; [`CurlTransport`] is the libcurl implementation used by
//! the CLI.

mod libcurl;
mod head;

pub use libcurl::{CurlTransport, TransportOptions};
pub use head::{parse_response_head, ResponseHead};

use crate::retry::FetchError;

/// Receives a streamed response body.
pub trait BodySink {
    /// Called once per successful (2xx) response, after the final headers and
    /// before the first body byte. Returning an error aborts the transfer.
    fn on_head(&mut self, head: &ResponseHead) -> Result<(), FetchError>;

    /// Called for every body chunk, in order.
    fn on_chunk(&mut self, chunk: &[u8]) -> Result<(), FetchError>;
}

/// A blocking HTTP GET client. Implementations keep their connection state
/// between calls; one handle is the "network session" of a run.
pub trait Transport {
    /// Fetches `url` into `sink`. Non-2xx statuses are reported as
    /// `FetchError::Http` without calling the sink.
    fn get(&mut self, url: &str, sink: &mut dyn BodySink) -> Result<ResponseHead, FetchError>;
}
