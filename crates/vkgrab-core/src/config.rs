use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::downloader::{DownloadPolicy, DEFAULT_MAX_FILE_SIZE};
use crate::retry::RetryPolicy;
use crate::transport::TransportOptions;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per file (including the first).
    pub max_attempts: u32,
    /// Fixed delay in seconds between attempts.
    pub retry_delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_secs: 5.0,
        }
    }
}

/// Global configuration loaded from `~/.config/vkgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VkgrabConfig {
    /// Pause in seconds before every request (retries included).
    pub request_delay_secs: f64,
    /// Connect timeout and stall timeout in seconds.
    pub timeout_secs: u64,
    /// Files whose advertised or streamed size exceeds this many bytes are skipped.
    pub max_file_size: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for VkgrabConfig {
    fn default() -> Self {
        Self {
            request_delay_secs: 1.0,
            timeout_secs: 30,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            retry: None,
        }
    }
}

/// Negative or non-finite values count as zero.
fn secs(v: f64) -> Duration {
    Duration::try_from_secs_f64(v).unwrap_or(Duration::ZERO)
}

impl VkgrabConfig {
    pub fn download_policy(&self) -> DownloadPolicy {
        let retry = self.retry.clone().unwrap_or_default();
        DownloadPolicy {
            retry: RetryPolicy {
                max_attempts: retry.max_attempts.max(1),
                retry_delay: secs(retry.retry_delay_secs),
            },
            request_delay: secs(self.request_delay_secs),
            max_file_size: self.max_file_size,
        }
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            ..TransportOptions::default()
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vkgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VkgrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VkgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VkgrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}
