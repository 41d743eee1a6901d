//! Decides which attachment URLs are worth fetching.

use super::url_path;

/// External hosts that are never fetched. Matched as substrings of the
/// lowercased host, so subdomains are covered too.
pub const SKIP_DOMAINS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "avito.ru",
    "aliexpress.com",
    "aliexpress.ru",
    "pastebin.com",
    "coderoad.ru",
    "github.com",
    "play.google.com",
];

const VOICE_EXTENSION: &str = ".ogg";

/// Why a URL was not fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Voice message while voice downloads are off.
    VoiceMessage,
    /// Host is on the denylist.
    DeniedHost,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UrlFilter {
    pub download_voice: bool,
}

impl UrlFilter {
    pub fn new(download_voice: bool) -> Self {
        Self { download_voice }
    }

    /// Returns the reason to skip `url`, or `None` if it should be fetched.
    pub fn check(&self, url: &str) -> Option<SkipReason> {
        if !self.download_voice && url_path(url).to_ascii_lowercase().ends_with(VOICE_EXTENSION) {
            return Some(SkipReason::VoiceMessage);
        }
        let host = url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))?;
        SKIP_DOMAINS
            .iter()
            .any(|d| host.contains(d))
            .then_some(SkipReason::DeniedHost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_host_regardless_of_path() {
        let f = UrlFilter::new(true);
        assert_eq!(f.check("https://www.youtube.com/watch?v=abc"), Some(SkipReason::DeniedHost));
        assert_eq!(f.check("https://www.youtube.com/photo.jpg"), Some(SkipReason::DeniedHost));
        assert_eq!(f.check("https://YOUTU.BE/abc"), Some(SkipReason::DeniedHost));
        assert_eq!(f.check("https://m.avito.ru/item.png"), Some(SkipReason::DeniedHost));
        assert_eq!(f.check("https://play.google.com/store/apps"), Some(SkipReason::DeniedHost));
    }

    #[test]
    fn denylist_looks_at_host_only() {
        let f = UrlFilter::new(true);
        assert_eq!(None, f.check("https://sun9-1.userapi.com/github.com/a.jpg"));
        assert_eq!(None, f.check("https://example.com/?ref=youtube.com"));
    }

    #[test]
    fn voice_messages_follow_flag() {
        let url = "https://psv4.userapi.com/c1/audiomsg/d1/voice.ogg";
        assert_eq!(UrlFilter::new(false).check(url), Some(SkipReason::VoiceMessage));
        assert_eq!(UrlFilter::new(true).check(url), None);
    }

    #[test]
    fn voice_flag_ignores_query_string() {
        let url = "https://psv4.userapi.com/voice.ogg?extra=1";
        assert_eq!(UrlFilter::new(false).check(url), Some(SkipReason::VoiceMessage));
    }

    #[test]
    fn ordinary_urls_pass() {
        let f = UrlFilter::default();
        assert_eq!(None, f.check("https://sun9-1.userapi.com/a.jpg"));
        assert_eq!(None, f.check("relative/a.jpg"));
    }
}
