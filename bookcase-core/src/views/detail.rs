//! Detail screen

use super::{Catalog, Confirm, Mount, Notice};
use crate::api::BookApi;
use crate::router::Route;
use crate::types::{Book, BookId, PLACEHOLDER_COVER_URL};

/// Question put to the user before a book is deleted
pub const DELETE_PROMPT: &str = "Delete this book? This cannot be undone.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Book),
    NotFound,
    Failed(Notice),
}

pub struct DetailView {
    id: BookId,
    mount: Mount,
    catalog: Option<Catalog>,
    state: DetailState,
    notice: Option<Notice>,
}

impl DetailView {
    pub fn new(id: BookId, mount: Mount) -> Self {
        Self {
            id,
            mount,
            catalog: None,
            state: DetailState::Loading,
            notice: None,
        }
    }

    /// Remove the book from a hoisted catalog once it is deleted
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn book(&self) -> Option<&Book> {
        match &self.state {
            DetailState::Loaded(book) => Some(book),
            _ => None,
        }
    }

    /// Cover to display, or the placeholder until a cover is known
    pub fn cover_url(&self) -> &str {
        self.book()
            .map(Book::cover_url)
            .unwrap_or(PLACEHOLDER_COVER_URL)
    }

    /// Pending error from a failed action
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn edit_route(&self) -> Route {
        Route::Edit(self.id.clone())
    }

    /// Fetch the book once
    pub async fn load(&mut self, api: &dyn BookApi) {
        self.state = DetailState::Loading;
        let result = api.get_book(&self.id).await;

        if !self.mount.is_live() {
            tracing::debug!(id = %self.id, "detail view unmounted, dropping response");
            return;
        }

        self.state = match result {
            Ok(book) => DetailState::Loaded(book),
            Err(e) if e.is_not_found() => {
                tracing::warn!(id = %self.id, "book not found");
                DetailState::NotFound
            }
            Err(e) => {
                tracing::error!(id = %self.id, "Failed to load book: {}", e);
                DetailState::Failed(Notice::error(format!("Could not load book: {}", e)))
            }
        };
    }

    /// Delete the book after the user confirms
    ///
    /// Returns the route to navigate to on success. Declining, or any
    /// failure, leaves the view as it was (plus a notice on failure).
    pub async fn delete(&mut self, api: &dyn BookApi, confirm: &dyn Confirm) -> Option<Route> {
        if self.book().is_none() {
            tracing::debug!(id = %self.id, "delete ignored, book not loaded");
            return None;
        }

        if !confirm.confirm(DELETE_PROMPT) {
            return None;
        }

        let result = api.delete_book(&self.id).await;

        if !self.mount.is_live() {
            tracing::debug!(id = %self.id, "detail view unmounted, dropping delete result");
            return None;
        }

        match result {
            Ok(()) => {
                tracing::info!(id = %self.id, "book deleted");
                if let Some(catalog) = &self.catalog {
                    catalog.remove(&self.id);
                }
                Some(Route::List)
            }
            Err(e) => {
                tracing::error!(id = %self.id, "Failed to delete book: {}", e);
                self.notice = Some(Notice::error(format!("Could not delete book: {}", e)));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, MemoryBookApi};
    use crate::error::ApiFailure;
    use crate::types::BookDraft;
    use std::cell::Cell;

    fn seeded() -> (MemoryBookApi, Book) {
        let api = MemoryBookApi::new();
        let book = api.seed(BookDraft::new("Title", "Author", "Body").with_summary("Sum"));
        (api, book)
    }

    #[tokio::test]
    async fn test_load_renders_every_field() {
        let (api, book) = seeded();
        let mut view = DetailView::new(book.id.clone(), Mount::new());
        view.load(&api).await;

        let shown = view.book().unwrap();
        assert_eq!(shown.title, "Title");
        assert_eq!(shown.author, "Author");
        assert_eq!(shown.summary, "Sum");
        assert_eq!(shown.content, "Body");
        assert_eq!(view.cover_url(), PLACEHOLDER_COVER_URL);
        assert_eq!(view.edit_route(), Route::Edit(book.id));
    }

    #[tokio::test]
    async fn test_missing_book() {
        let api = MemoryBookApi::new();
        let mut view = DetailView::new(BookId::from("99"), Mount::new());
        view.load(&api).await;
        assert_eq!(view.state(), &DetailState::NotFound);
    }

    #[tokio::test]
    async fn test_failed_load_blocks_delete() {
        let (api, book) = seeded();
        api.fail_with(ApiFailure::new("offline"));

        let mut view = DetailView::new(book.id.clone(), Mount::new());
        view.load(&api).await;
        assert!(matches!(view.state(), DetailState::Failed(_)));

        let route = view.delete(&api, &|_: &str| true).await;
        assert_eq!(route, None);
        assert_eq!(api.calls(), vec![ApiCall::Get(book.id)]);
    }

    #[tokio::test]
    async fn test_declined_confirmation_issues_no_call() {
        let (api, book) = seeded();
        let mut view = DetailView::new(book.id.clone(), Mount::new());
        view.load(&api).await;

        let asked = Cell::new(0);
        let decline = |prompt: &str| {
            assert_eq!(prompt, DELETE_PROMPT);
            asked.set(asked.get() + 1);
            false
        };

        assert_eq!(view.delete(&api, &decline).await, None);
        assert_eq!(asked.get(), 1);
        assert_eq!(api.calls(), vec![ApiCall::Get(book.id.clone())]);
        assert_eq!(view.book().unwrap().id, book.id);
        assert!(view.notice().is_none());
    }

    #[tokio::test]
    async fn test_confirmed_delete_navigates_home() {
        let (api, book) = seeded();
        let catalog = Catalog::new();
        catalog.replace(vec![book.clone()]);

        let mut view = DetailView::new(book.id.clone(), Mount::new()).with_catalog(catalog.clone());
        view.load(&api).await;

        let route = view.delete(&api, &|_: &str| true).await;
        assert_eq!(route, Some(Route::List));
        assert!(catalog.is_empty());
        assert!(api.books().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_state() {
        let (api, book) = seeded();
        let catalog = Catalog::new();
        catalog.replace(vec![book.clone()]);

        let mut view = DetailView::new(book.id.clone(), Mount::new()).with_catalog(catalog.clone());
        view.load(&api).await;
        api.fail_with(ApiFailure::new("conflict").with_status(409));

        assert_eq!(view.delete(&api, &|_: &str| true).await, None);
        assert!(view.notice().unwrap().message.contains("conflict"));
        assert_eq!(view.book().unwrap().title, "Title");
        assert_eq!(catalog.len(), 1);

        view.dismiss_notice();
        assert!(view.notice().is_none());
    }
}
