//! Body sink that streams into the temp file and enforces the size ceiling.

use crate::retry::FetchError;
use crate::storage::StorageWriter;
use crate::transport::{BodySink, ResponseHead};

pub(super) struct FileSink {
    writer: StorageWriter,
    max_file_size: u64,
    expected: Option<u64>,
}

impl FileSink {
    pub(super) fn new(writer: StorageWriter, max_file_size: u64) -> Self {
        Self {
            writer,
            max_file_size,
            expected: None,
        }
    }

    /// Checks the body against the advertised length and hands back the writer.
    pub(super) fn finish(self) -> Result<StorageWriter, FetchError> {
        let received = self.writer.written();
        match self.expected {
            Some(expected) if expected != received => {
                self.writer.discard();
                Err(FetchError::PartialTransfer { expected, received })
            }
            _ => Ok(self.writer),
        }
    }

    pub(super) fn discard(self) {
        self.writer.discard();
    }
}

impl BodySink for FileSink {
    fn on_head(&mut self, head: &ResponseHead) -> Result<(), FetchError> {
        if let Some(length) = head.content_length {
            if length > self.max_file_size {
                return Err(FetchError::TooLarge { length });
            }
            self.expected = Some(length);
            if length > 0 {
                self.writer.preallocate(length).map_err(FetchError::Storage)?;
            }
        }
        Ok(())
    }

    fn on_chunk(&mut self, chunk: &[u8]) -> Result<(), FetchError> {
        let total = self.writer.written() + chunk.len() as u64;
        if total > self.max_file_size {
            return Err(FetchError::TooLarge { length: total });
        }
        self.writer.append(chunk).map_err(FetchError::Storage)
    }
}
