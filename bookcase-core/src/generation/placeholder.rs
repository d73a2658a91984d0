//! Deterministic stand-ins used when generation is unavailable

/// Characters of content kept in a placeholder summary
pub const SUMMARY_PREVIEW_CHARS: usize = 100;

/// Characters of summary printed on a placeholder cover
pub const COVER_TEXT_CHARS: usize = 10;

const PLACEHOLDER_COVER_BASE: &str = "https://via.placeholder.com/300x400.png";

/// Summary made from the opening of the content
pub fn placeholder_summary(content: &str) -> String {
    let content = content.trim();
    let mut chars = content.chars();
    let preview: String = chars.by_ref().take(SUMMARY_PREVIEW_CHARS).collect();

    if chars.next().is_some() {
        format!("{}…", preview.trim_end())
    } else {
        preview
    }
}

/// Cover image URL carrying the first words of the summary
pub fn placeholder_cover_url(summary: &str) -> String {
    let text: String = summary.chars().take(COVER_TEXT_CHARS).collect();
    if text.trim().is_empty() {
        return PLACEHOLDER_COVER_BASE.to_string();
    }
    format!("{}?text={}", PLACEHOLDER_COVER_BASE, urlencoding::encode(&text))
}
