//! Response envelope normalization
//!
//! The storage service has answered in several shapes over its lifetime:
//! bare entities, bare arrays, `{status, data}` envelopes, and envelopes whose
//! `data` is a page object with a `content` array. Everything is folded into
//! one shape here so views never see the difference.

use crate::error::{ApiFailure, FieldError};
use crate::types::Book;
use serde::Deserialize;

/// `{status, message, data, errorCode, errors}` as sent by the storage service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status: String,

    #[serde(default)]
    pub message: Option<String>,

    pub data: Option<T>,

    #[serde(default)]
    pub error_code: Option<String>,

    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// Turn an unsuccessful envelope into an `ApiFailure`
    pub fn into_failure(self) -> ApiFailure {
        ApiFailure {
            status: None,
            code: self.error_code,
            message: self
                .message
                .unwrap_or_else(|| format!("request failed with status '{}'", self.status)),
            errors: self.errors,
        }
    }
}

/// Either a wrapped or a bare response body
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Wrapped(Envelope<T>),
    Bare(T),
}

impl<T> Payload<T> {
    /// Unwrap the payload, trusting `data` only behind a success indicator
    pub fn into_result(self) -> Result<Option<T>, ApiFailure> {
        match self {
            Payload::Wrapped(envelope) if envelope.is_success() => Ok(envelope.data),
            Payload::Wrapped(envelope) => Err(envelope.into_failure()),
            Payload::Bare(value) => Ok(Some(value)),
        }
    }
}

/// A list response: a bare array or a page object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Collection<T> {
    Items(Vec<T>),
    Page(Page<T>),
}

/// Page object with pagination metadata
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,

    #[serde(default)]
    pub total_elements: Option<u64>,

    #[serde(default)]
    pub total_pages: Option<u32>,

    /// Zero-based page index
    #[serde(default)]
    pub number: Option<u32>,
}

/// One page of books, whatever shape the service used
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPage {
    /// Books in server order
    pub books: Vec<Book>,
    pub total_elements: Option<u64>,
    pub total_pages: Option<u32>,
    pub page: Option<u32>,
}

impl From<Collection<Book>> for BookPage {
    fn from(collection: Collection<Book>) -> Self {
        match collection {
            Collection::Items(books) => Self {
                total_elements: Some(books.len() as u64),
                books,
                total_pages: None,
                page: None,
            },
            Collection::Page(page) => Self {
                books: page.content,
                total_elements: page.total_elements,
                total_pages: page.total_pages,
                page: page.number,
            },
        }
    }
}
