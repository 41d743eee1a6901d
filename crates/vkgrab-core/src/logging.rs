//! Tracing setup for the `vkgrab` binary.
//!
//! Events go to `$XDG_STATE_HOME/vkgrab/vkgrab.log`. The CLI calls
//! [`init_logging_stderr`] instead when the log file cannot be set up.

use anyhow::Result;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "vkgrab.log";
const DEFAULT_FILTER: &str = "info,vkgrab=debug,vkgrab_core=debug";

/// Shared handle to the run log. Each event gets its own duplicate of the
/// descriptor; if duplicating fails that one event is written to stderr.
struct RunLog(File);

enum EventSink {
    Log(File),
    Stderr,
}

impl Write for EventSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            EventSink::Log(f) => f.write(buf),
            EventSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            EventSink::Log(f) => f.flush(),
            EventSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for RunLog {
    type Writer = EventSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => EventSink::Log(f),
            Err(_) => EventSink::Stderr,
        }
    }
}

/// `RUST_LOG` if set and valid, otherwise debug for vkgrab and info elsewhere.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_run_log() -> Result<(PathBuf, File)> {
    let path = xdg::BaseDirectories::with_prefix("vkgrab")?.place_state_file(LOG_FILE)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Installs the global subscriber writing to the run log and returns the log's path.
/// Fails if the state directory is unusable or a subscriber is already set.
pub fn init_logging() -> Result<PathBuf> {
    let (path, file) = open_run_log()?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(RunLog(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    tracing::info!(path = %path.display(), "vkgrab logging initialized");
    Ok(path)
}

/// Installs a stderr-only subscriber. A no-op if one is already installed.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
