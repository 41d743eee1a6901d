//! `vkgrab <ARCHIVE_PATH>` – walk the archive and download attachments.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::mpsc;
use vkgrab_core::control::StopToken;
use vkgrab_core::scheduler::{self, ChatReport, ChatStatus, RunSettings, RunSummary};
use vkgrab_core::transport::{CurlTransport, TransportOptions};

pub async fn run_archive(
    archive_path: PathBuf,
    settings: RunSettings,
    transport_opts: TransportOptions,
) -> Result<RunSummary> {
    let stop = StopToken::new();

    let signal_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\ninterrupt received, stopping");
            signal_stop.request_stop();
        }
    });

    let (progress_tx, progress_rx) = mpsc::channel::<ChatReport>();
    let progress_handle = tokio::task::spawn_blocking(move || {
        for report in progress_rx {
            println!("{}", format_report(&report));
        }
    });

    let summary = tokio::task::spawn_blocking(move || -> Result<RunSummary> {
        let mut transport = CurlTransport::new(&transport_opts, stop.clone())
            .context("failed to set up HTTP session")?;
        scheduler::run_archive(
            &archive_path,
            &mut transport,
            &settings,
            &stop,
            Some(&progress_tx),
        )
    })
    .await
    .context("archive run panicked")??;

    let _ = progress_handle.await;

    println!(
        "{} chat(s): {} file(s) downloaded ({:.1} MiB), {} failed, {} chat(s) failed",
        summary.chats.len(),
        summary.downloaded(),
        summary.bytes() as f64 / 1_048_576.0,
        summary.failed_downloads(),
        summary.failed_chats(),
    );
    if summary.interrupted {
        println!("interrupted; rerun to pick up where it stopped");
    }
    Ok(summary)
}

pub(crate) fn format_report(report: &ChatReport) -> String {
    let head = format!("[{}] {}", report.kind, report.name);
    match &report.status {
        ChatStatus::SkippedBot => format!("{}: skipped (bot chat)", head),
        ChatStatus::Failed(reason) => format!("{}: failed: {}", head, reason),
        status => {
            let mut line = format!(
                "{}: {} page(s), {} attachment(s), {} downloaded, {} already present, {} filtered, {} without extension, {} too large, {} failed",
                head,
                report.pages,
                report.attachments,
                report.downloaded,
                report.already_present,
                report.filtered(),
                report.no_extension,
                report.too_large,
                report.failed,
            );
            if report.pages_failed > 0 {
                line.push_str(&format!(", {} unreadable page(s)", report.pages_failed));
            }
            if *status == ChatStatus::Interrupted {
                line.push_str(" (interrupted)");
            }
            line
        }
    }
}
