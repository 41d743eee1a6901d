//! Sequential writer for temp download files.

use anyhow::{Context, Result};
use std::fs::{File, FileTimes};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
#[cfg(unix)]
use std::os::unix::io::AsRawFd;

/// Writer for one temp download file. The body is appended chunk by chunk.
pub struct StorageWriter {
    file: File,
    temp_path: PathBuf,
    written: u64,
}

impl StorageWriter {
    /// Create a new temp file at `temp_path` (e.g. `destination.part`).
    /// Truncates if the path already exists (leftover from an earlier attempt).
    pub fn create(temp_path: &Path) -> std::io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;
        Ok(StorageWriter {
            file,
            temp_path: temp_path.to_path_buf(),
            written: 0,
        })
    }

    /// Preallocate `size` bytes. On Unix tries `posix_fallocate` for real block
    /// allocation; falls back to `set_len` on failure or non-Unix.
    pub fn preallocate(&mut self, size: u64) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            let fd = self.file.as_raw_fd();
            let r = unsafe { libc::posix_fallocate(fd, 0, size as libc::off_t) };
            if r == 0 {
                return Ok(());
            }
            tracing::debug!(errno = r, "posix_fallocate failed, falling back to set_len");
        }
        self.file.set_len(size)
    }

    pub fn append(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Bytes appended so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Trim preallocated space, sync, stamp access/modification times and
    /// rename the temp file onto `final_path`. Consumes the writer.
    pub fn finalize(self, final_path: &Path, mtime: SystemTime) -> Result<()> {
        self.file
            .set_len(self.written)
            .context("failed to trim temp file")?;
        self.file.sync_all().context("storage sync failed")?;
        self.file
            .set_times(FileTimes::new().set_accessed(mtime).set_modified(mtime))
            .with_context(|| format!("failed to set times on {}", self.temp_path.display()))?;
        let temp_path = self.temp_path.clone();
        drop(self.file);

        std::fs::rename(&temp_path, final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                temp_path.display(),
                final_path.display()
            )
        })?;
        Ok(())
    }

    /// Close and delete the temp file.
    pub fn discard(self) {
        drop(self.file);
        if let Err(e) = std::fs::remove_file(&self.temp_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.temp_path.display(), "could not remove temp file: {}", e);
            }
        }
    }
}
