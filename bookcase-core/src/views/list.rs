//! List screen

use super::{Catalog, Mount, Notice};
use crate::api::{BookApi, ListQuery};
use crate::router::Route;
use crate::types::{Book, BookId};
use serde::Serialize;

/// Summary card for one book, linking to its detail screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookCard {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub cover_url: String,
    pub href: String,
}

impl From<&Book> for BookCard {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            summary: book.summary.clone(),
            cover_url: book.cover_url().to_string(),
            href: Route::Detail(book.id.clone()).path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Loaded(Vec<BookCard>),
    Failed(Notice),
}

pub struct ListView {
    mount: Mount,
    query: ListQuery,
    catalog: Option<Catalog>,
    state: ListState,
    total: Option<u64>,
}

impl ListView {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            query: ListQuery::default(),
            catalog: None,
            state: ListState::Loading,
            total: None,
        }
    }

    /// Write loaded books into a hoisted catalog
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Cards in server order; empty unless loaded
    pub fn cards(&self) -> &[BookCard] {
        match &self.state {
            ListState::Loaded(cards) => cards,
            _ => &[],
        }
    }

    /// Total matching books as reported by the server
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    /// Fetch the list once and render it
    pub async fn load(&mut self, api: &dyn BookApi) {
        self.state = ListState::Loading;
        let result = api.list_books(&self.query).await;

        if !self.mount.is_live() {
            tracing::debug!("list view unmounted, dropping response");
            return;
        }

        match result {
            Ok(page) => {
                tracing::debug!(count = page.books.len(), "books loaded");
                self.total = page.total_elements;
                self.state = ListState::Loaded(page.books.iter().map(BookCard::from).collect());
                if let Some(catalog) = &self.catalog {
                    catalog.replace(page.books);
                }
            }
            Err(e) => {
                tracing::error!("Failed to load books: {}", e);
                self.state = ListState::Failed(Notice::error(format!(
                    "Could not load books: {}",
                    e
                )));
            }
        }
    }

    /// Where the "new book" action leads
    pub fn new_book_route(&self) -> Route {
        Route::New
    }
}
