//! Hoisted book list shared between screens

use crate::types::{Book, BookId};
use std::sync::{Arc, PoisonError, RwLock};

/// Parent-held list of books
///
/// Only the list view replaces its contents; the detail view removes a
/// book after the server confirmed its deletion.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Arc<RwLock<Vec<Book>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a fresh server response
    pub fn replace(&self, books: Vec<Book>) {
        *self.books.write().unwrap_or_else(PoisonError::into_inner) = books;
    }

    /// Drop the entry for `id`, returning whether one was present
    pub fn remove(&self, id: &BookId) -> bool {
        let mut books = self.books.write().unwrap_or_else(PoisonError::into_inner);
        let before = books.len();
        books.retain(|book| &book.id != id);
        books.len() != before
    }

    /// Copy of the current list
    pub fn snapshot(&self) -> Vec<Book> {
        self.books
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: &BookId) -> Option<Book> {
        self.books
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|book| &book.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.books.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book(id: u64, title: &str) -> Book {
        serde_json::from_value(json!({ "id": id, "title": title })).unwrap()
    }

    #[test]
    fn test_replace_and_remove() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());

        catalog.replace(vec![book(1, "A"), book(2, "B")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&BookId::from("2")).unwrap().title, "B");

        assert!(catalog.remove(&BookId::from("1")));
        assert!(!catalog.remove(&BookId::from("1")));

        let titles: Vec<_> = catalog.snapshot().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, ["B"]);
    }

    #[test]
    fn test_clones_share_the_list() {
        let catalog = Catalog::new();
        let handle = catalog.clone();
        handle.replace(vec![book(3, "C")]);
        assert_eq!(catalog.len(), 1);
    }
}
