//! Chat index (`index-messages.html`) parsing and chat classification.

use regex::Regex;
use scraper::Html;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use super::{read_page, selector, ArchiveError, INDEX_FILE};

/// Peer ids above this value are group conversations.
const GROUP_PEER_ID_BASE: i64 = 2_000_000_000;

/// Kind of conversation, derived from the peer id in the chat path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatKind {
    Group,
    Bot,
    Personal,
    Other,
}

impl ChatKind {
    pub fn from_peer_id(id: i64) -> Self {
        if id > GROUP_PEER_ID_BASE {
            ChatKind::Group
        } else if id < 0 {
            ChatKind::Bot
        } else {
            ChatKind::Personal
        }
    }

    /// Classifies a chat by the signed id right before `/messages` in its path.
    pub fn from_chat_path(path: &str) -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"(-?\d+)/messages").expect("peer id regex is valid"));
        re.captures(path)
            .and_then(|c| c[1].parse::<i64>().ok())
            .map(Self::from_peer_id)
            .unwrap_or(ChatKind::Other)
    }

    /// Directory name under the attachments root.
    pub fn dir_name(self) -> &'static str {
        match self {
            ChatKind::Group => "group",
            ChatKind::Bot => "bot",
            ChatKind::Personal => "personal",
            ChatKind::Other => "other",
        }
    }
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One chat listed in the archive index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDescriptor {
    /// Display name as shown in the index.
    pub name: String,
    /// Archive-relative path to the chat's first page.
    pub path: String,
    pub kind: ChatKind,
}

/// Parses the index document into chats, in document order.
/// List items without a peer link are not chats and are skipped.
pub fn parse_chat_index(html: &str) -> Vec<ChatDescriptor> {
    let document = Html::parse_document(html);
    let item_sel = selector(".item");
    let link_sel = selector(".message-peer--id a");

    let mut chats = Vec::new();
    for item in document.select(&item_sel) {
        let Some(link) = item.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            tracing::debug!("chat link without href skipped");
            continue;
        };
        let name = link.text().collect::<String>().trim().to_string();
        chats.push(ChatDescriptor {
            kind: ChatKind::from_chat_path(href),
            name,
            path: href.to_string(),
        });
    }
    chats
}

/// Reads and parses `index-messages.html` under `archive_root`.
pub fn load_chat_index(archive_root: &Path) -> Result<Vec<ChatDescriptor>, ArchiveError> {
    let html = read_page(&archive_root.join(INDEX_FILE))?;
    Ok(parse_chat_index(&html))
}
