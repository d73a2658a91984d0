//! Book editor, shared by the create and edit screens

use super::{Mount, Notice};
use crate::api::BookApi;
use crate::error::{Field, ValidationError};
use crate::generation::{cover_or_placeholder, summary_or_placeholder, Generator};
use crate::router::Route;
use crate::types::{validate_cover_url, Book, BookDraft, BookId};

/// Which screen the editor serves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(BookId),
}

/// Where the editor is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Waiting for the book being edited
    Loading,
    Idle,
    GeneratingSummary,
    GeneratingCover,
    Submitting,
    /// The book being edited could not be loaded; nothing can be saved
    Unavailable,
}

/// Editable draft plus the optional AI-assisted actions
pub struct BookEditor {
    mode: EditorMode,
    mount: Mount,
    phase: EditorPhase,
    draft: BookDraft,
    cover_url: Option<String>,
    cover_generated: bool,
    validation: Option<ValidationError>,
    notice: Option<Notice>,
    saved: Option<Book>,
}

impl BookEditor {
    pub fn new(mode: EditorMode, mount: Mount) -> Self {
        let phase = match mode {
            EditorMode::Create => EditorPhase::Idle,
            EditorMode::Edit(_) => EditorPhase::Loading,
        };
        Self {
            mode,
            mount,
            phase,
            draft: BookDraft::default(),
            cover_url: None,
            cover_generated: false,
            validation: None,
            notice: None,
            saved: None,
        }
    }

    pub fn create(mount: Mount) -> Self {
        Self::new(EditorMode::Create, mount)
    }

    pub fn edit(id: BookId, mount: Mount) -> Self {
        Self::new(EditorMode::Edit(id), mount)
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    /// Edit the draft in place
    ///
    /// Any inline validation message is cleared, since the fields changed.
    pub fn draft_mut(&mut self) -> &mut BookDraft {
        self.validation = None;
        &mut self.draft
    }

    /// Cover shown as a preview, either existing or generated
    pub fn cover_url(&self) -> Option<&str> {
        self.cover_url.as_deref()
    }

    /// Inline message from the last failed validation
    pub fn validation(&self) -> Option<&ValidationError> {
        self.validation.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The record returned by the last successful save
    pub fn saved(&self) -> Option<&Book> {
        self.saved.as_ref()
    }

    /// Pre-populate the draft when editing an existing book
    pub async fn load(&mut self, api: &dyn BookApi) {
        let id = match &self.mode {
            EditorMode::Create => {
                self.phase = EditorPhase::Idle;
                return;
            }
            EditorMode::Edit(id) => id.clone(),
        };

        self.phase = EditorPhase::Loading;
        let result = api.get_book(&id).await;

        if !self.mount.is_live() {
            tracing::debug!(%id, "editor unmounted, dropping response");
            return;
        }

        match result {
            Ok(book) => self.fill_from(&book),
            Err(e) => {
                tracing::error!(%id, "Failed to load book for editing: {}", e);
                self.phase = EditorPhase::Unavailable;
                self.notice = Some(Notice::error(format!("Could not load book: {}", e)));
            }
        }
    }

    fn fill_from(&mut self, book: &Book) {
        self.draft = BookDraft::from(book);
        self.cover_url = book.has_cover().then(|| book.cover_url().to_string());
        self.cover_generated = false;
        self.phase = EditorPhase::Idle;
    }

    /// Fill the summary from the content
    ///
    /// Needs non-blank content. Generation failures fall back to a
    /// placeholder summary and are never reported as errors.
    pub async fn generate_summary(&mut self, generator: &dyn Generator) -> Result<(), ValidationError> {
        if self.draft.content.trim().is_empty() {
            let err = ValidationError::Required(Field::Content);
            self.validation = Some(err.clone());
            return Err(err);
        }

        let previous = self.enter(EditorPhase::GeneratingSummary);
        let summary = summary_or_placeholder(generator, &self.draft.content).await;

        if !self.mount.is_live() {
            tracing::debug!("editor unmounted, dropping generated summary");
            return Ok(());
        }

        self.draft.summary = summary;
        self.phase = previous;
        Ok(())
    }

    /// Produce a cover image from the summary
    ///
    /// Needs a non-blank summary. Generation failures fall back to a
    /// placeholder image URL.
    pub async fn generate_cover(&mut self, generator: &dyn Generator) -> Result<(), ValidationError> {
        if self.draft.summary.trim().is_empty() {
            let err = ValidationError::Required(Field::Summary);
            self.validation = Some(err.clone());
            return Err(err);
        }

        let previous = self.enter(EditorPhase::GeneratingCover);
        let url = cover_or_placeholder(generator, &self.draft.summary).await;

        if !self.mount.is_live() {
            tracing::debug!("editor unmounted, dropping generated cover");
            return Ok(());
        }

        self.cover_url = Some(url);
        self.cover_generated = true;
        self.phase = previous;
        Ok(())
    }

    fn enter(&mut self, phase: EditorPhase) -> EditorPhase {
        self.validation = None;
        std::mem::replace(&mut self.phase, phase)
    }

    /// Validate and save the draft
    ///
    /// Returns where to navigate on success: the list after a create, the
    /// book's detail screen after an edit. On failure the draft is kept and
    /// either `validation()` or `notice()` explains why.
    pub async fn submit(&mut self, api: &dyn BookApi) -> Option<Route> {
        if self.phase == EditorPhase::Unavailable {
            self.notice = Some(Notice::error("The book could not be loaded, so it cannot be saved"));
            return None;
        }

        if let Err(err) = self.check() {
            tracing::debug!("submission blocked: {}", err);
            self.validation = Some(err);
            return None;
        }
        self.validation = None;
        self.notice = None;
        self.phase = EditorPhase::Submitting;

        let saved = match &self.mode {
            EditorMode::Create => api.create_book(&self.draft).await,
            EditorMode::Edit(id) => api.update_book(id, &self.draft).await,
        };

        if !self.mount.is_live() {
            tracing::debug!("editor unmounted, dropping save result");
            return None;
        }

        let mut book = match saved {
            Ok(book) => book,
            Err(e) => {
                tracing::error!("Failed to save book: {}", e);
                self.notice = Some(Notice::error(format!("Could not save book: {}", e)));
                self.phase = EditorPhase::Idle;
                return None;
            }
        };

        if self.cover_generated {
            if let Some(url) = &self.cover_url {
                // The book itself is already saved at this point.
                let covered = api.update_book_cover(&book.id, url).await;

                if !self.mount.is_live() {
                    tracing::debug!(id = %book.id, "editor unmounted, dropping cover result");
                    return None;
                }

                match covered {
                    Ok(covered) => book = covered,
                    Err(e) => {
                        tracing::warn!(id = %book.id, "Saved book but failed to attach cover: {}", e)
                    }
                }
            }
        }

        tracing::info!(id = %book.id, title = %book.title, "book saved");
        self.saved = Some(book);
        self.phase = EditorPhase::Idle;
        Some(match &self.mode {
            EditorMode::Create => Route::List,
            EditorMode::Edit(id) => Route::Detail(id.clone()),
        })
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.draft.validate()?;
        if let Some(url) = &self.cover_url {
            validate_cover_url(url)?;
        }
        Ok(())
    }
}
