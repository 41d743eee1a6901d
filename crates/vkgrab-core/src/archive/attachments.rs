//! Attachment references on a single chat page.

use chrono::NaiveDateTime;
use scraper::Html;

use super::{parse_message_timestamp, selector};

/// One attachment link found in a dated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRecord {
    pub url: String,
    /// Description label (`Фотография`, `Документ`, ...); empty when absent.
    pub kind: String,
    /// When the containing message was sent (archive local time).
    pub timestamp: NaiveDateTime,
}

/// Extracts attachments from one page in document order.
///
/// Messages whose header carries no parseable date are dropped entirely;
/// attachments without a link are dropped individually.
pub fn extract_attachments(html: &str) -> Vec<AttachmentRecord> {
    let document = Html::parse_document(html);
    let message_sel = selector(".message");
    let header_sel = selector(".message__header");
    let attachment_sel = selector(".attachment");
    let link_sel = selector(".attachment__link");
    let description_sel = selector(".attachment__description");

    let mut out = Vec::new();
    for message in document.select(&message_sel) {
        let Some(header) = message.select(&header_sel).next() else {
            continue;
        };
        let header_text = header.text().collect::<String>();
        let timestamp = match parse_message_timestamp(&header_text) {
            Ok(ts) => ts,
            Err(e) => {
                tracing::debug!(error = %e, "message skipped");
                continue;
            }
        };

        for attachment in message.select(&attachment_sel) {
            let Some(url) = attachment
                .select(&link_sel)
                .next()
                .and_then(|link| link.value().attr("href"))
            else {
                continue;
            };
            let kind = attachment
                .select(&description_sel)
                .next()
                .map(|d| d.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            out.push(AttachmentRecord {
                url: url.to_string(),
                kind,
                timestamp,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn message(header: &str, attachments: &str) -> String {
        format!(
            r#"<div class="message"><div class="message__header">{}</div><div>текст</div>{}</div>"#,
            header, attachments
        )
    }

    fn attachment(description: Option<&str>, href: Option<&str>) -> String {
        let desc = description
            .map(|d| format!(r#"<div class="attachment__description">{}</div>"#, d))
            .unwrap_or_default();
        let link = href
            .map(|h| format!(r#"<a class="attachment__link" href="{}">{}</a>"#, h, h))
            .unwrap_or_default();
        format!(r#"<div class="attachment">{}{}</div>"#, desc, link)
    }

    #[test]
    fn extracts_in_document_order() {
        let html = format!(
            "<div class=\"wrap\">{}{}</div>",
            message(
                "Иван, 3 мар 2021 в 14:00:01",
                &(attachment(Some("Фотография"), Some("https://sun9-1.userapi.com/a.jpg"))
                    + &attachment(Some("Документ"), Some("https://vk.com/doc1_2.pdf")))
            ),
            message(
                "Вы, 4 мар 2021 в 08:15:00",
                &attachment(None, Some("https://example.com/b.png"))
            ),
        );
        let records = extract_attachments(&html);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].url, "https://sun9-1.userapi.com/a.jpg");
        assert_eq!(records[0].kind, "Фотография");
        assert_eq!(
            records[0].timestamp,
            NaiveDate::from_ymd_opt(2021, 3, 3).unwrap().and_hms_opt(14, 0, 1).unwrap()
        );
        assert_eq!(records[1].kind, "Документ");
        assert_eq!(records[2].kind, "");
        assert_eq!(
            records[2].timestamp,
            NaiveDate::from_ymd_opt(2021, 3, 4).unwrap().and_hms_opt(8, 15, 0).unwrap()
        );
    }

    #[test]
    fn undated_message_is_dropped() {
        let html = message("Иван, вчера", &attachment(Some("Фотография"), Some("https://x.org/a.jpg")))
            + &message("1 апр 2020 в 10:00:00", &attachment(Some("Видео"), Some("https://x.org/b.mp4")));
        let records = extract_attachments(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://x.org/b.mp4");
    }

    #[test]
    fn attachment_without_link_is_dropped() {
        let html = message(
            "1 апр 2020 в 10:00:00",
            &(attachment(Some("Стикер"), None) + &attachment(Some("Файл"), Some("https://x.org/c.zip"))),
        );
        let records = extract_attachments(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, "Файл");
    }
}
