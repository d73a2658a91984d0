//! Core types for Bookcase

mod book;
mod draft;

pub use book::{Book, BookId, InvalidBookId, PLACEHOLDER_COVER_URL};
pub use draft::{
    validate_cover_url, BookDraft, MAX_AUTHOR_LEN, MAX_COVER_URL_LEN, MAX_SUMMARY_LEN,
    MAX_TITLE_LEN,
};
