//! Processing of a single chat.

use std::io;
use std::path::{Path, PathBuf};

use super::report::{ChatReport, ChatStatus};
use super::RunSettings;
use crate::archive::{self, ArchiveError, ChatDescriptor, ChatKind};
use crate::control::StopToken;
use crate::downloader::{self, DownloadOutcome};
use crate::transport::Transport;
use crate::url_model::{self, UrlFilter};

pub(super) struct ChatContext<'a> {
    pub(super) archive_root: &'a Path,
    pub(super) attachments_root: &'a Path,
    pub(super) transport: &'a mut dyn Transport,
    pub(super) settings: &'a RunSettings,
    pub(super) filter: UrlFilter,
    pub(super) stop: &'a StopToken,
}

/// `<kind>/<chat>` directories, created on first use.
struct ChatDirs {
    kind_dir: PathBuf,
    chat_dir: PathBuf,
    ready: bool,
}

impl ChatDirs {
    fn new(attachments_root: &Path, chat: &ChatDescriptor) -> Self {
        Self {
            kind_dir: attachments_root.join(chat.kind.dir_name()),
            chat_dir: url_model::chat_dir(attachments_root, chat.kind, &chat.name),
            ready: false,
        }
    }

    fn ensure(&mut self) -> Result<(), ArchiveError> {
        if self.ready {
            return Ok(());
        }
        create_dir_once(&self.kind_dir)?;
        create_dir_once(&self.chat_dir)?;
        self.ready = true;
        Ok(())
    }
}

fn create_dir_once(path: &Path) -> Result<(), ArchiveError> {
    match std::fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Runs one chat to completion. Errors end this chat only and are recorded in
/// the returned report.
pub(super) fn process_chat(ctx: &mut ChatContext<'_>, chat: &ChatDescriptor) -> ChatReport {
    let mut report = ChatReport::new(&chat.name, chat.kind);
    if chat.kind == ChatKind::Bot && !ctx.settings.download_bots {
        tracing::debug!(chat = %chat.name, "bot chat skipped");
        report.status = ChatStatus::SkippedBot;
        return report;
    }

    tracing::info!(chat = %chat.name, kind = %chat.kind, "processing chat");
    if let Err(e) = download_chat(ctx, chat, &mut report) {
        tracing::warn!(chat = %chat.name, "chat failed: {}", e);
        report.status = ChatStatus::Failed(e.to_string());
    }
    report
}

fn download_chat(
    ctx: &mut ChatContext<'_>,
    chat: &ChatDescriptor,
    report: &mut ChatReport,
) -> Result<(), ArchiveError> {
    let pages = archive::list_chat_pages(ctx.archive_root, &chat.path)?;
    report.pages = pages.len();
    let mut dirs = ChatDirs::new(ctx.attachments_root, chat);

    for page in pages {
        if ctx.stop.is_stopped() {
            report.status = ChatStatus::Interrupted;
            return Ok(());
        }
        let html = match archive::read_page(&ctx.archive_root.join(&page)) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(chat = %chat.name, page = %page.display(), "page skipped: {}", e);
                report.pages_failed += 1;
                continue;
            }
        };

        for attachment in archive::extract_attachments(&html) {
            if ctx.stop.is_stopped() {
                report.status = ChatStatus::Interrupted;
                return Ok(());
            }
            report.attachments += 1;

            if let Some(reason) = ctx.filter.check(&attachment.url) {
                tracing::trace!(url = %attachment.url, ?reason, "filtered");
                report.record_skip(reason);
                continue;
            }
            let Some(file_name) = url_model::destination_file_name(&attachment.url) else {
                tracing::debug!(url = %attachment.url, kind = %attachment.kind, "no file extension, skipped");
                report.no_extension += 1;
                continue;
            };
            let dest = dirs.chat_dir.join(file_name);
            if dest.exists() {
                report.already_present += 1;
                continue;
            }

            dirs.ensure()?;
            let outcome = downloader::download_file(
                &mut *ctx.transport,
                &attachment.url,
                &dest,
                attachment.timestamp,
                &ctx.settings.policy,
                ctx.stop,
            );
            if let DownloadOutcome::Failed { attempts, reason } = &outcome {
                tracing::warn!(
                    chat = %chat.name,
                    url = %attachment.url,
                    attempts,
                    "attachment not downloaded: {}",
                    reason
                );
            }
            report.record_download(&outcome);
            if outcome == DownloadOutcome::Cancelled {
                return Ok(());
            }
        }
    }
    Ok(())
}
