//! URL modeling and destination naming.
//!
//! Every attachment is stored as `<kind>/<chat>/<hash8><ext>` below the
//! attachments root, where `hash8` is a short digest of the URL. The same URL
//! in the same chat always lands on the same path, so re-runs can skip files
//! that already exist.

mod filter;
mod path;
mod sanitize;

pub use filter::{SkipReason, UrlFilter, SKIP_DOMAINS};
pub use path::{url_extension, url_path};
pub use sanitize::sanitize_chat_name;

use crate::archive::ChatKind;
use crate::checksum;
use std::path::{Path, PathBuf};

/// Directory created next to the archive that receives all attachments.
pub const ATTACHMENTS_DIR: &str = "attachments";

/// Attachments root for an archive directory: a sibling `attachments/` folder.
pub fn attachments_root(archive_root: &Path) -> PathBuf {
    archive_root
        .parent()
        .unwrap_or(archive_root)
        .join(ATTACHMENTS_DIR)
}

/// File name for a downloaded attachment (`<hash8><ext>`), or `None` when the
/// URL path carries no usable extension.
pub fn destination_file_name(url: &str) -> Option<String> {
    let ext = url_extension(url)?;
    Some(format!("{}{}", checksum::short_digest(url.as_bytes()), ext))
}

/// Directory holding the attachments of one chat.
pub fn chat_dir(attachments_root: &Path, kind: ChatKind, chat_name: &str) -> PathBuf {
    attachments_root
        .join(kind.dir_name())
        .join(sanitize_chat_name(chat_name))
}
