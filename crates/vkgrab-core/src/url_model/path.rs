//! Path and extension extraction from attachment URLs.

/// Path component of `url`. Relative references (which `url::Url` cannot
/// parse on their own) are cut at the first `?` or `#`.
pub fn url_path(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Extension of the last path segment, including the leading dot
/// (`.../photo.jpg?size=1` → `.jpg`).
///
/// Returns `None` when the segment has no extension or the extension is not
/// plain ASCII alphanumerics.
pub fn url_extension(url: &str) -> Option<String> {
    let path = url_path(url);
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!(".{}", ext))
}
