//! In-memory transport: serves fixed bodies by URL and records every request.

use std::collections::HashMap;

use vkgrab_core::retry::FetchError;
use vkgrab_core::transport::{BodySink, ResponseHead, Transport};

#[derive(Default)]
pub struct FakeTransport {
    bodies: HashMap<String, Vec<u8>>,
    pub requests: Vec<String>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&mut self, url: &str, body: &[u8]) -> &mut Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.requests.iter().filter(|u| u.as_str() == url).count()
    }
}

impl Transport for FakeTransport {
    fn get(&mut self, url: &str, sink: &mut dyn BodySink) -> Result<ResponseHead, FetchError> {
        self.requests.push(url.to_string());
        let body = self.bodies.get(url).ok_or(FetchError::Http(404))?;
        let head = ResponseHead {
            status: 200,
            content_length: Some(body.len() as u64),
        };
        sink.on_head(&head)?;
        for chunk in body.chunks(8) {
            sink.on_chunk(chunk)?;
        }
        Ok(head)
    }
}
