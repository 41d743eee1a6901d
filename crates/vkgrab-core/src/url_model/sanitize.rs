//! Chat name → directory name sanitization.

/// Fallback directory name when nothing printable is left.
const UNNAMED: &str = "unnamed";

fn is_forbidden(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control()
}

/// Turns a chat display name into a single safe path component.
///
/// - Replaces `< > : " / \ | ? *` and control characters with `_`
/// - Collapses consecutive underscores
/// - Limits length to 255 bytes (Linux NAME_MAX)
/// - Trims leading underscores, and trailing underscores, dots and spaces
pub fn sanitize_chat_name(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for c in name.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        if c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let mut take = out.len().min(NAME_MAX);
    while take > 0 && !out.is_char_boundary(take) {
        take -= 1;
    }
    // Trim after the cut so it cannot expose a trailing dot, space or `_`.
    let result = out[..take]
        .trim_start_matches('_')
        .trim_end_matches(|c: char| c == '_' || c == '.' || c == ' ');

    if result.is_empty() || result == "." || result == ".." {
        UNNAMED.to_string()
    } else {
        result.to_string()
    }
}
