//! Plain-text and JSON rendering of the screens

use anyhow::{bail, Result};
use bookcase_core::views::{BookCard, DetailState, EditorMode};
use bookcase_core::{Book, BookEditor, DetailView};

/// Print the list screen
pub fn cards(cards: &[BookCard], total: Option<u64>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("No books yet. Add one with `bookcase new`.");
        return Ok(());
    }

    match total {
        Some(total) if total > cards.len() as u64 => {
            println!("Showing {} of {} books", cards.len(), total)
        }
        _ => println!("{} book(s)", cards.len()),
    }
    println!();

    for card in cards {
        if card.author.is_empty() {
            println!("{}", card.title);
        } else {
            println!("{} by {}", card.title, card.author);
        }
        if !card.summary.is_empty() {
            println!("    {}", card.summary);
        }
        println!("    {}", card.href);
    }

    Ok(())
}

/// Print the detail screen, failing if the book could not be shown
pub fn detail(view: &DetailView, json: bool) -> Result<()> {
    match view.state() {
        DetailState::Loaded(book) => book_fields(book, view.cover_url(), json),
        DetailState::NotFound => bail!("Book {} not found", view.id()),
        DetailState::Failed(notice) => bail!("{}", notice),
        DetailState::Loading => bail!("Book {} did not load", view.id()),
    }
}

/// Print every field of a book
fn book_fields(book: &Book, cover_url: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(book)?);
        return Ok(());
    }

    println!("Id:       {}", book.id);
    println!("Title:    {}", book.title);
    println!("Author:   {}", book.author);
    println!("Cover:    {}", cover_url);
    if let Some(created) = book.created_at {
        println!("Created:  {}", created);
    }
    if let Some(updated) = book.updated_at {
        println!("Updated:  {}", updated);
    }
    if !book.summary.is_empty() {
        println!();
        println!("{}", book.summary);
    }
    println!();
    println!("{}", book.content);

    Ok(())
}

/// Print the editor's current form
pub fn editor(editor: &BookEditor) -> Result<()> {
    if let Some(notice) = editor.notice() {
        bail!("{}", notice);
    }

    let heading = match editor.mode() {
        EditorMode::Create => "New book".to_string(),
        EditorMode::Edit(id) => format!("Editing book {}", id),
    };
    let draft = editor.draft();

    println!("{}", heading);
    println!("Title:    {}", draft.title);
    println!("Author:   {}", draft.author);
    if let Some(cover) = editor.cover_url() {
        println!("Cover:    {}", cover);
    }
    println!("Summary:  {}", draft.summary);
    println!("Content:  {}", draft.content);

    Ok(())
}
