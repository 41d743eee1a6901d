//! Message date parsing (`5 янв 2020 в 9:05:07`).

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

use super::ParseFailure;

/// Month tokens as they appear in message headers.
const MONTHS: [(&str, &str); 12] = [
    ("янв", "01"),
    ("фев", "02"),
    ("мар", "03"),
    ("апр", "04"),
    ("май", "05"),
    ("июн", "06"),
    ("июл", "07"),
    ("авг", "08"),
    ("сен", "09"),
    ("окт", "10"),
    ("ноя", "11"),
    ("дек", "12"),
];

const NUMERIC_FORMAT: &str = "%d %m %Y в %H:%M:%S";

fn date_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,2})\s+([а-я]+)\s+(\d{4})\s+в\s+(\d{1,2}:\d{2}:\d{2})")
            .expect("message date regex is valid")
    })
}

fn month_number(token: &str) -> Option<&'static str> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, number)| *number)
}

/// Finds the message date inside `text` and parses it as naive local time.
pub fn parse_message_timestamp(text: &str) -> Result<NaiveDateTime, ParseFailure> {
    let caps = date_pattern()
        .captures(text)
        .ok_or_else(|| ParseFailure::NoDate(text.trim().to_string()))?;
    let month = month_number(&caps[2]).ok_or_else(|| ParseFailure::UnknownMonth(caps[2].to_string()))?;
    let numeric = format!("{} {} {} в {}", &caps[1], month, &caps[3], &caps[4]);
    NaiveDateTime::parse_from_str(&numeric, NUMERIC_FORMAT)
        .map_err(|source| ParseFailure::InvalidDate { input: numeric, source })
}
