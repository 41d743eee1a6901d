//! Enumerates the paginated `messagesN.html` files of one chat.

use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::ArchiveError;

const PAGE_PREFIX: &str = "messages";
const PAGE_SUFFIX: &str = ".html";

/// Page number embedded in a page file name (`messages12.html` → 12).
pub fn page_number(file_name: &str) -> Option<u64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^messages(\d+)\.html$").expect("page name regex is valid"));
    re.captures(file_name).and_then(|c| c[1].parse().ok())
}

/// Lists all pages that live next to `first_page`, sorted by page number.
///
/// Paths are relative to `archive_root`, like `first_page` itself.
pub fn list_chat_pages(archive_root: &Path, first_page: &str) -> Result<Vec<PathBuf>, ArchiveError> {
    let chat_dir = Path::new(first_page)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let full_dir = archive_root.join(&chat_dir);

    let entries = std::fs::read_dir(&full_dir).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ArchiveError::MissingDirectory { path: full_dir.clone() }
        } else {
            ArchiveError::Io { path: full_dir.clone(), source }
        }
    })?;

    let mut pages: Vec<(u64, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ArchiveError::Io { path: full_dir.clone(), source })?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !name.starts_with(PAGE_PREFIX) || !name.ends_with(PAGE_SUFFIX) {
            continue;
        }
        match page_number(name) {
            Some(n) => pages.push((n, chat_dir.join(name))),
            None => tracing::warn!(dir = %full_dir.display(), file = name, "page without a number skipped"),
        }
    }

    pages.sort_by_key(|(n, _)| *n);
    Ok(pages.into_iter().map(|(_, p)| p).collect())
}
