//! Summary and cover generation
//!
//! Generation is always optional: every entry point used by the views falls
//! back to a deterministic placeholder instead of failing.

mod openai;
mod placeholder;

pub use openai::OpenAiGenerator;
pub use placeholder::{
    placeholder_cover_url, placeholder_summary, COVER_TEXT_CHARS, SUMMARY_PREVIEW_CHARS,
};

use crate::error::Result;
use async_trait::async_trait;

/// A text/image generation service
#[async_trait]
pub trait Generator: Send + Sync {
    /// Summarize a book's content
    async fn summarize(&self, content: &str) -> Result<String>;

    /// Produce a cover image URL from a book's summary
    async fn cover(&self, summary: &str) -> Result<String>;
}

/// Generated summary, or the placeholder if generation fails
pub async fn summary_or_placeholder(generator: &dyn Generator, content: &str) -> String {
    match generator.summarize(content).await {
        Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
        Ok(_) => {
            tracing::warn!("generator returned an empty summary, using placeholder");
            placeholder_summary(content)
        }
        Err(e) => {
            tracing::warn!("summary generation failed, using placeholder: {}", e);
            placeholder_summary(content)
        }
    }
}

/// Generated cover URL, or the placeholder if generation fails
pub async fn cover_or_placeholder(generator: &dyn Generator, summary: &str) -> String {
    match generator.cover(summary).await {
        Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
        Ok(_) => {
            tracing::warn!("generator returned an empty cover URL, using placeholder");
            placeholder_cover_url(summary)
        }
        Err(e) => {
            tracing::warn!("cover generation failed, using placeholder: {}", e);
            placeholder_cover_url(summary)
        }
    }
}
