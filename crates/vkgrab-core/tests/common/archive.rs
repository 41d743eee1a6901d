//! Builds a small archive export on disk (windows-1251, export markup).

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One message: header date text and attachment (description, url) pairs.
pub struct Msg<'a> {
    pub date: &'a str,
    pub attachments: &'a [(&'a str, &'a str)],
}

pub struct TestArchive {
    _dir: TempDir,
    /// Directory holding `index-messages.html`.
    pub root: PathBuf,
    index_items: Vec<String>,
}

fn write_1251(path: &Path, html: &str) {
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(html);
    fs::write(path, bytes).unwrap();
}

pub fn render_page(messages: &[Msg<'_>]) -> String {
    let mut html = String::from("<html><body><div class=\"history\">");
    for m in messages {
        html.push_str("<div class=\"message\">");
        html.push_str(&format!("<div class=\"message__header\">{}</div>", m.date));
        html.push_str("<div>текст сообщения</div><div class=\"kludges\">");
        for (desc, url) in m.attachments {
            html.push_str(&format!(
                "<div class=\"attachment\"><div class=\"attachment__description\">{}</div>\
                 <a class=\"attachment__link\" href=\"{}\">{}</a></div>",
                desc, url, url
            ));
        }
        html.push_str("</div></div>");
    }
    html.push_str("</div></body></html>");
    html
}

impl TestArchive {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Archive").join("messages");
        fs::create_dir_all(&root).unwrap();
        Self {
            _dir: dir,
            root,
            index_items: Vec::new(),
        }
    }

    /// Lists a chat in the index and writes its pages as `messages0.html`, `messages1.html`, ...
    pub fn chat(&mut self, peer_id: &str, name: &str, pages: &[Vec<Msg<'_>>]) -> &mut Self {
        self.list_chat(peer_id, name);
        let chat_dir = self.root.join(peer_id);
        fs::create_dir_all(&chat_dir).unwrap();
        for (i, page) in pages.iter().enumerate() {
            write_1251(&chat_dir.join(format!("messages{}.html", i)), &render_page(page));
        }
        self
    }

    /// Lists a chat in the index without creating its directory.
    pub fn list_chat(&mut self, peer_id: &str, name: &str) -> &mut Self {
        self.index_items.push(format!(
            "<div class=\"item\"><div class=\"item__main\"><div class=\"message-peer--id\">\
             <a href=\"{}/messages0.html\">{}</a></div></div></div>",
            peer_id, name
        ));
        self
    }

    pub fn write_index(&self) {
        let html = format!(
            "<html><body><div class=\"page_block\">{}</div></body></html>",
            self.index_items.join("")
        );
        write_1251(&self.root.join("index-messages.html"), &html);
    }

    /// `attachments/` directory the run writes to.
    pub fn attachments_root(&self) -> PathBuf {
        self.root.parent().unwrap().join("attachments")
    }
}
