//! Editable book fields, as sent on create and update

use super::Book;
use crate::error::{Field, ValidationError};
use serde::{Deserialize, Serialize};

/// Longest title the storage service accepts
pub const MAX_TITLE_LEN: usize = 255;
/// Longest author name the storage service accepts
pub const MAX_AUTHOR_LEN: usize = 255;
/// Longest summary the storage service accepts
pub const MAX_SUMMARY_LEN: usize = 1000;
/// Longest cover URL the storage service accepts
pub const MAX_COVER_URL_LEN: usize = 2083;

/// An in-progress book, without server-assigned fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub content: String,
}

impl BookDraft {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            summary: String::new(),
            content: content.into(),
        }
    }

    /// Set summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Check the draft before it is submitted
    ///
    /// Title, author and content must hold something other than whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(Field::Title, &self.title)?;
        require(Field::Author, &self.author)?;
        require(Field::Content, &self.content)?;

        limit(Field::Title, &self.title, MAX_TITLE_LEN)?;
        limit(Field::Author, &self.author, MAX_AUTHOR_LEN)?;
        limit(Field::Summary, &self.summary, MAX_SUMMARY_LEN)?;
        Ok(())
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            summary: book.summary.clone(),
            content: book.content.clone(),
        }
    }
}

/// Check a cover URL against the storage service's column limit
pub fn validate_cover_url(url: &str) -> Result<(), ValidationError> {
    limit(Field::CoverImageUrl, url, MAX_COVER_URL_LEN)
}

fn require(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn limit(field: Field, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_draft() {
        let draft = BookDraft::new("Dune", "Frank Herbert", "Arrakis...").with_summary("Spice");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_summary_is_optional() {
        let draft = BookDraft::new("Dune", "Frank Herbert", "Arrakis...");
        assert!(draft.summary.is_empty());
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let draft = BookDraft::new("", "", "");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Required(Field::Title))
        );

        let draft = BookDraft::new("Dune", " ", "");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Required(Field::Author))
        );
    }

    #[test]
    fn test_length_limits_count_characters() {
        let draft = BookDraft::new("가".repeat(MAX_TITLE_LEN), "a", "c");
        assert_eq!(draft.validate(), Ok(()));

        let draft = BookDraft::new("t".repeat(MAX_TITLE_LEN + 1), "a", "c");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::TooLong {
                field: Field::Title,
                max: MAX_TITLE_LEN
            })
        );

        let draft = BookDraft::new("t", "a", "c").with_summary("s".repeat(MAX_SUMMARY_LEN + 1));
        assert_eq!(draft.validate().unwrap_err().field(), Field::Summary);
    }

    #[test]
    fn test_cover_url_limit() {
        assert!(validate_cover_url("https://img.example/a.png").is_ok());
        assert!(validate_cover_url(&"u".repeat(MAX_COVER_URL_LEN + 1)).is_err());
    }

    #[test]
    fn test_serializes_without_id() {
        let draft = BookDraft::new("A", "B", "C").with_summary("D");
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "title": "A", "author": "B", "summary": "D", "content": "C" })
        );
    }

    proptest! {
        #[test]
        fn prop_blank_required_field_is_rejected(
            blank in "[ \t\n]{0,8}",
            text in "[a-zA-Z][a-zA-Z ]{0,30}",
            which in 0usize..3,
        ) {
            let mut draft = BookDraft::new(text.clone(), text.clone(), text);
            let field = match which {
                0 => { draft.title = blank; Field::Title }
                1 => { draft.author = blank; Field::Author }
                _ => { draft.content = blank; Field::Content }
            };
            prop_assert_eq!(draft.validate(), Err(ValidationError::Required(field)));
        }

        #[test]
        fn prop_non_blank_fields_pass(
            title in "[a-zA-Z][a-zA-Z ]{0,40}",
            author in "[a-zA-Z][a-zA-Z ]{0,40}",
            content in "[a-zA-Z][a-zA-Z .]{0,200}",
        ) {
            prop_assert!(BookDraft::new(title, author, content).validate().is_ok());
        }
    }
}
