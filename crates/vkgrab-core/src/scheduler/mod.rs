//! Archive run orchestration.
//!
//! Walks the chat index in order and, per chat: enumerate pages → extract
//! attachments → filter → download. A chat that fails is reported and the
//! run moves on to the next one; only an unreadable index or an unwritable
//! attachments root fails the whole run.

mod chat;
mod report;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::mpsc;

use crate::archive;
use crate::control::StopToken;
use crate::downloader::DownloadPolicy;
use crate::transport::Transport;
use crate::url_model::{self, UrlFilter};

pub use report::{ChatReport, ChatStatus, RunSummary};

/// What to fetch and how.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    /// Also fetch attachments of bot chats.
    pub download_bots: bool,
    /// Also fetch voice messages.
    pub download_voice: bool,
    pub policy: DownloadPolicy,
}

/// Processes every chat of the archive at `archive_root`.
///
/// Attachments go to the `attachments/` directory next to the archive.
/// If `progress_tx` is `Some`, each chat's report is sent when the chat ends.
pub fn run_archive(
    archive_root: &Path,
    transport: &mut dyn Transport,
    settings: &RunSettings,
    stop: &StopToken,
    progress_tx: Option<&mpsc::Sender<ChatReport>>,
) -> Result<RunSummary> {
    let chats = archive::load_chat_index(archive_root)
        .with_context(|| format!("failed to load chat index of {}", archive_root.display()))?;
    let attachments_root = url_model::attachments_root(archive_root);
    std::fs::create_dir_all(&attachments_root)
        .with_context(|| format!("failed to create {}", attachments_root.display()))?;
    tracing::info!(
        chats = chats.len(),
        output = %attachments_root.display(),
        "processing archive"
    );

    let mut ctx = chat::ChatContext {
        archive_root,
        attachments_root: &attachments_root,
        transport,
        settings,
        filter: UrlFilter::new(settings.download_voice),
        stop,
    };

    let mut summary = RunSummary::default();
    for descriptor in &chats {
        if stop.is_stopped() {
            summary.interrupted = true;
            break;
        }
        let report = chat::process_chat(&mut ctx, descriptor);
        if report.status == ChatStatus::Interrupted {
            summary.interrupted = true;
        }
        if let Some(tx) = progress_tx {
            let _ = tx.send(report.clone());
        }
        summary.chats.push(report);
    }

    tracing::info!(
        downloaded = summary.downloaded(),
        failed = summary.failed_downloads(),
        failed_chats = summary.failed_chats(),
        interrupted = summary.interrupted,
        "archive run finished"
    );
    Ok(summary)
}
