//! CLI for vkgrab.

mod run;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vkgrab_core::config;
use vkgrab_core::scheduler::{RunSettings, RunSummary};

/// Download the attachments referenced by a VK data archive.
#[derive(Debug, Parser)]
#[command(name = "vkgrab", version)]
#[command(about = "Download attachments referenced by a VK data archive", long_about = None)]
pub struct Cli {
    /// Path to the archive's `messages` directory (the one holding index-messages.html).
    pub archive_path: PathBuf,

    /// Also download attachments from bot chats.
    #[arg(long)]
    pub download_bots: bool,

    /// Also download voice messages (.ogg).
    #[arg(long)]
    pub download_voice: bool,
}

impl Cli {
    pub async fn run_from_args() -> Result<RunSummary> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let settings = RunSettings {
            download_bots: cli.download_bots,
            download_voice: cli.download_voice,
            policy: cfg.download_policy(),
        };
        run::run_archive(cli.archive_path, settings, cfg.transport_options()).await
    }
}
