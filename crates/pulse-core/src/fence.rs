//! Markdown code-fence removal for model replies.

const FENCE: &str = "```";

/// Return the content enclosed by the first code fence in `text`, trimmed.
///
/// The opening marker may carry a language tag (```` ```json ````); the tag and
/// any spaces before it are skipped. Content stops at the next fence marker,
/// or at the end of the text when the fence is never closed. Text outside the
/// fence is discarded. Only one fence is considered. Text without any fence
/// is returned trimmed.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let Some(open) = text.find(FENCE) else {
        return text.trim();
    };

    let after_marker = &text[open + FENCE.len()..];
    let body = skip_language_tag(after_marker);
    let inner = match body.find(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };
    inner.trim()
}

fn skip_language_tag(after_marker: &str) -> &str {
    let after_marker = after_marker.trim_start_matches([' ', '\t']);
    let tag_len = after_marker
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
        .unwrap_or(after_marker.len());
    &after_marker[tag_len..]
}
