//! Per-chat and per-run results reported to the CLI.

use crate::archive::ChatKind;
use crate::downloader::DownloadOutcome;
use crate::url_model::SkipReason;

/// How processing of one chat ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatStatus {
    Done,
    /// Bot chat while bot downloads are off.
    SkippedBot,
    /// The chat could not be processed; the message is the cause.
    Failed(String),
    /// Stop requested while the chat was in progress.
    Interrupted,
}

/// Counters for one chat.
#[derive(Debug, Clone)]
pub struct ChatReport {
    pub name: String,
    pub kind: ChatKind,
    pub status: ChatStatus,
    pub pages: usize,
    /// Pages that could not be read and were skipped.
    pub pages_failed: usize,
    pub attachments: usize,
    pub downloaded: usize,
    pub bytes: u64,
    pub already_present: usize,
    pub voice_skipped: usize,
    pub denied_host: usize,
    pub no_extension: usize,
    pub too_large: usize,
    pub failed: usize,
}

impl ChatReport {
    pub fn new(name: &str, kind: ChatKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            status: ChatStatus::Done,
            pages: 0,
            pages_failed: 0,
            attachments: 0,
            downloaded: 0,
            bytes: 0,
            already_present: 0,
            voice_skipped: 0,
            denied_host: 0,
            no_extension: 0,
            too_large: 0,
            failed: 0,
        }
    }

    /// Attachments dropped by the URL filter.
    pub fn filtered(&self) -> usize {
        self.voice_skipped + self.denied_host
    }

    pub(crate) fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::VoiceMessage => self.voice_skipped += 1,
            SkipReason::DeniedHost => self.denied_host += 1,
        }
    }

    pub(crate) fn record_download(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded { bytes, .. } => {
                self.downloaded += 1;
                self.bytes += bytes;
            }
            DownloadOutcome::TooLarge { .. } => self.too_large += 1,
            DownloadOutcome::Failed { .. } => self.failed += 1,
            DownloadOutcome::Cancelled => self.status = ChatStatus::Interrupted,
        }
    }
}

/// Result of a whole archive run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub chats: Vec<ChatReport>,
    /// True when the run stopped early on request.
    pub interrupted: bool,
}

impl RunSummary {
    pub fn downloaded(&self) -> usize {
        self.chats.iter().map(|c| c.downloaded).sum()
    }

    pub fn failed_downloads(&self) -> usize {
        self.chats.iter().map(|c| c.failed).sum()
    }

    pub fn failed_chats(&self) -> usize {
        self.chats
            .iter()
            .filter(|c| matches!(c.status, ChatStatus::Failed(_)))
            .count()
    }

    pub fn bytes(&self) -> u64 {
        self.chats.iter().map(|c| c.bytes).sum()
    }
}
