//! Client for the book-storage REST API

mod envelope;
mod http;
mod memory;

pub use envelope::{BookPage, Collection, Envelope, Page, Payload};
pub use http::HttpBookApi;
pub use memory::{ApiCall, MemoryBookApi};

use crate::error::Result;
use crate::types::{Book, BookDraft, BookId};
use async_trait::async_trait;
use serde::Serialize;

/// Query parameters for listing books
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    /// Match against title or author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Zero-based page index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Items per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl ListQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    /// Set page and page size
    pub fn with_page(mut self, page: u32, size: u32) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }
}

/// Typed operations against the book-storage service
///
/// Every call is a single request: no retry, no backoff. Failures surface to
/// the caller unchanged.
#[async_trait]
pub trait BookApi: Send + Sync {
    /// List books in server order
    async fn list_books(&self, query: &ListQuery) -> Result<BookPage>;

    /// Fetch one book
    async fn get_book(&self, id: &BookId) -> Result<Book>;

    /// Create a book from a draft; the server assigns id and timestamps
    async fn create_book(&self, draft: &BookDraft) -> Result<Book>;

    /// Replace a book's editable fields
    async fn update_book(&self, id: &BookId, draft: &BookDraft) -> Result<Book>;

    /// Replace only the cover image URL
    async fn update_book_cover(&self, id: &BookId, cover_image_url: &str) -> Result<Book>;

    /// Delete a book
    async fn delete_book(&self, id: &BookId) -> Result<()>;
}
