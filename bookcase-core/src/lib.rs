//! Bookcase Core Library
//!
//! This crate provides the types, API client and view models for the Bookcase
//! book catalog. Views are headless: they hold their own state, talk to the
//! book-storage service through [`BookApi`], and report navigation as a
//! [`Route`] for whatever front end renders them.

pub mod api;
pub mod config;
pub mod error;
pub mod generation;
pub mod router;
pub mod types;
pub mod views;

pub use api::{BookApi, BookPage, HttpBookApi, ListQuery, MemoryBookApi};
pub use config::Settings;
pub use error::{ApiFailure, BookcaseError, Field, Result, ValidationError};
pub use generation::{Generator, OpenAiGenerator};
pub use router::{Route, Router, Screen};
pub use types::{Book, BookDraft, BookId};
pub use views::{BookEditor, Catalog, Confirm, DetailView, EditorMode, ListView, Mount, Notice};
