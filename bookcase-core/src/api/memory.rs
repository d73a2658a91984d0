//! In-memory `BookApi` (for testing and offline use)

use super::envelope::BookPage;
use super::{BookApi, ListQuery};
use crate::error::{ApiFailure, BookcaseError, Result};
use crate::types::{Book, BookDraft, BookId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A call received by `MemoryBookApi`, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List(ListQuery),
    Get(BookId),
    Create(BookDraft),
    Update(BookId, BookDraft),
    UpdateCover(BookId, String),
    Delete(BookId),
}

#[derive(Default)]
struct Inner {
    books: BTreeMap<u64, Book>,
    next_id: u64,
    calls: Vec<ApiCall>,
    failing: Option<ApiFailure>,
}

/// Book store held in process memory
///
/// Records every call it receives so callers can assert exactly which
/// requests a view issued.
#[derive(Default)]
pub struct MemoryBookApi {
    inner: Mutex<Inner>,
    latency: Option<Duration>,
}

impl MemoryBookApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency` before it is answered
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Insert a book under a fresh id, as if created by the service
    pub fn seed(&self, draft: BookDraft) -> Book {
        self.lock().insert(draft)
    }

    /// Insert a fully-formed record, keeping its id
    ///
    /// Numeric ids keep the id sequence ahead of them.
    pub fn seed_book(&self, book: Book) {
        let mut inner = self.lock();
        let key = match book.id.as_str().parse::<u64>() {
            Ok(key) => key,
            Err(_) => {
                inner.next_id += 1;
                inner.next_id
            }
        };
        inner.next_id = inner.next_id.max(key);
        inner.books.insert(key, book);
    }

    /// Make every following call fail with `failure`
    pub fn fail_with(&self, failure: ApiFailure) {
        self.lock().failing = Some(failure);
    }

    /// Answer calls normally again
    pub fn recover(&self) {
        self.lock().failing = None;
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Stored books in id order
    pub fn books(&self) -> Vec<Book> {
        self.lock().books.values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call, wait out the latency, then report any injected failure
    async fn begin(&self, call: ApiCall) -> Result<()> {
        self.lock().calls.push(call);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.lock().failing.clone() {
            Some(failure) => Err(BookcaseError::Api(failure)),
            None => Ok(()),
        }
    }
}

impl Inner {
    fn insert(&mut self, draft: BookDraft) -> Book {
        self.next_id += 1;
        let now = chrono::Utc::now().naive_utc();
        let book = Book {
            id: BookId::from(self.next_id),
            title: draft.title,
            author: draft.author,
            summary: draft.summary,
            content: draft.content,
            cover_image_url: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.books.insert(self.next_id, book.clone());
        book
    }

    fn find_mut(&mut self, id: &BookId) -> Result<&mut Book> {
        self.books
            .values_mut()
            .find(|book| &book.id == id)
            .ok_or_else(|| BookcaseError::NotFound(id.clone()))
    }
}

#[async_trait]
impl BookApi for MemoryBookApi {
    async fn list_books(&self, query: &ListQuery) -> Result<BookPage> {
        self.begin(ApiCall::List(query.clone())).await?;

        let inner = self.lock();
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        // Newest first, like the storage service's default sort.
        let matching: Vec<Book> = inner
            .books
            .values()
            .rev()
            .filter(|book| match &needle {
                Some(needle) => {
                    book.title.to_lowercase().contains(needle)
                        || book.author.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let page = query.page.unwrap_or(0);
        let size = query.size.unwrap_or(10).max(1);
        let books = matching
            .into_iter()
            .skip((page as usize).saturating_mul(size as usize))
            .take(size as usize)
            .collect();

        Ok(BookPage {
            books,
            total_elements: Some(total),
            total_pages: Some(total.div_ceil(size as u64) as u32),
            page: Some(page),
        })
    }

    async fn get_book(&self, id: &BookId) -> Result<Book> {
        self.begin(ApiCall::Get(id.clone())).await?;
        self.lock().find_mut(id).map(|book| book.clone())
    }

    async fn create_book(&self, draft: &BookDraft) -> Result<Book> {
        self.begin(ApiCall::Create(draft.clone())).await?;
        Ok(self.lock().insert(draft.clone()))
    }

    async fn update_book(&self, id: &BookId, draft: &BookDraft) -> Result<Book> {
        self.begin(ApiCall::Update(id.clone(), draft.clone())).await?;

        let mut inner = self.lock();
        let book = inner.find_mut(id)?;
        book.title = draft.title.clone();
        book.author = draft.author.clone();
        book.summary = draft.summary.clone();
        book.content = draft.content.clone();
        book.updated_at = Some(chrono::Utc::now().naive_utc());
        Ok(book.clone())
    }

    async fn update_book_cover(&self, id: &BookId, cover_image_url: &str) -> Result<Book> {
        self.begin(ApiCall::UpdateCover(id.clone(), cover_image_url.to_string()))
            .await?;

        let mut inner = self.lock();
        let book = inner.find_mut(id)?;
        book.cover_image_url = Some(cover_image_url.to_string());
        book.updated_at = Some(chrono::Utc::now().naive_utc());
        Ok(book.clone())
    }

    async fn delete_book(&self, id: &BookId) -> Result<()> {
        self.begin(ApiCall::Delete(id.clone())).await?;

        let mut inner = self.lock();
        let key = inner
            .books
            .iter()
            .find(|(_, book)| &book.id == id)
            .map(|(key, _)| *key)
            .ok_or_else(|| BookcaseError::NotFound(id.clone()))?;
        inner.books.remove(&key);
        Ok(())
    }
}
