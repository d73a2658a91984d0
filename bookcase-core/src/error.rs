//! Error types for Bookcase Core

use crate::types::BookId;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Result type alias using BookcaseError
pub type Result<T> = std::result::Result<T, BookcaseError>;

/// Top-level error type for all Bookcase operations
#[derive(Debug, Error)]
pub enum BookcaseError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(ApiFailure),

    #[error("Book not found: {0}")]
    NotFound(BookId),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Missing credential: {0} is not configured")]
    MissingCredential(&'static str),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BookcaseError {
    /// Whether this error means the addressed record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, BookcaseError::NotFound(_))
    }
}

/// A non-success answer from the book-storage service
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    /// HTTP status, when the failure came with a non-2xx response
    pub status: Option<u16>,

    /// Machine-readable error code (e.g. `INVALID_INPUT_VALUE`)
    pub code: Option<String>,

    /// Human-readable message
    pub message: String,

    /// Per-field rejections reported by the service
    pub errors: Vec<FieldError>,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "[{}] ", status)?;
        }
        f.write_str(&self.message)?;
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        for error in &self.errors {
            write!(f, "; {}: {}", error.field, error.reason)?;
        }
        Ok(())
    }
}

/// A field rejected by the storage service's own validation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldError {
    pub field: String,

    #[serde(default)]
    pub value: Option<serde_json::Value>,

    #[serde(default)]
    pub reason: String,
}

/// Draft fields checked on the client before anything is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Summary,
    Content,
    CoverImageUrl,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Summary => "summary",
            Field::Content => "content",
            Field::CoverImageUrl => "cover image URL",
        };
        f.write_str(name)
    }
}

/// Client-side validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(Field),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: Field, max: usize },
}

impl ValidationError {
    /// The field that failed validation
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required(field) => *field,
            ValidationError::TooLong { field, .. } => *field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_failure_display() {
        let mut failure = ApiFailure::new("invalid input")
            .with_status(400)
            .with_code("INVALID_INPUT_VALUE");
        failure.errors.push(FieldError {
            field: "title".to_string(),
            value: None,
            reason: "must not be blank".to_string(),
        });

        assert_eq!(
            failure.to_string(),
            "[400] invalid input (INVALID_INPUT_VALUE); title: must not be blank"
        );
    }

    #[test]
    fn test_validation_message() {
        let err = ValidationError::Required(Field::Title);
        assert_eq!(err.to_string(), "title is required");
        assert_eq!(err.field(), Field::Title);

        let err = ValidationError::TooLong {
            field: Field::Summary,
            max: 1000,
        };
        assert_eq!(err.to_string(), "summary must be at most 1000 characters");
    }

    #[test]
    fn test_not_found_predicate() {
        let err = BookcaseError::NotFound(BookId::from("7"));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Book not found: 7");
    }
}
