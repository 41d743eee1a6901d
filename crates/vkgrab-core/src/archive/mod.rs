//! Reading the exported archive: chat index, per-chat pages and the
//! attachment references on each page.
//!
//! All pages of the export are windows-1251 HTML following one fixed markup
//! convention; the selectors live next to the parser that uses them.

mod attachments;
mod error;
mod index;
mod pages;
mod timestamp;

pub use attachments::{extract_attachments, AttachmentRecord};
pub use error::{ArchiveError, ParseFailure};
pub use index::{load_chat_index, parse_chat_index, ChatDescriptor, ChatKind};
pub use pages::{list_chat_pages, page_number};
pub use timestamp::parse_message_timestamp;

use scraper::Selector;
use std::path::Path;

/// Root listing page of the export.
pub const INDEX_FILE: &str = "index-messages.html";

/// Reads an archive page and decodes it from the export's windows-1251 encoding.
pub fn read_page(path: &Path) -> Result<String, ArchiveError> {
    let bytes = std::fs::read(path).map_err(|source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (text, _, had_errors) = encoding_rs::WINDOWS_1251.decode(&bytes);
    if had_errors {
        tracing::debug!(path = %path.display(), "page contains bytes outside windows-1251");
    }
    Ok(text.into_owned())
}

pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("archive selector is valid")
}
