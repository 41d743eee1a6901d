//! Parse HTTP response header lines into a ResponseHead.

/// Status and length of the final response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u32,
    /// `Content-Length`, if the server sent one.
    pub content_length: Option<u64>,
}

/// Parse the header lines of one response (status line first).
/// Lines of earlier responses (redirects) must already be dropped.
pub fn parse_response_head(lines: &[String]) -> ResponseHead {
    let mut status = 0;
    let mut content_length = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            status = line
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse().ok())
                .unwrap_or(0);
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<u64>().ok();
            }
        }
    }

    ResponseHead {
        status,
        content_length,
    }
}
