//! New and edit command implementations

use super::{spinner, Session};
use anyhow::{bail, Context, Result};
use bookcase_core::views::EditorPhase;
use bookcase_core::{BookDraft, BookEditor, BookId, Route, Screen};
use clap::Args;
use std::path::PathBuf;

/// Draft fields and generation switches shared by `new` and `edit`
#[derive(Args, Debug, Default)]
pub struct DraftArgs {
    /// Book title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Author name
    #[arg(short, long)]
    pub author: Option<String>,

    /// Short summary
    #[arg(long)]
    pub summary: Option<String>,

    /// Body text
    #[arg(short, long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the body text from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Generate the summary from the content
    #[arg(long)]
    pub generate_summary: bool,

    /// Generate a cover image from the summary
    #[arg(long)]
    pub generate_cover: bool,
}

impl DraftArgs {
    /// Overwrite the draft fields that were given
    fn apply(&self, draft: &mut BookDraft) -> Result<()> {
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
        if let Some(author) = &self.author {
            draft.author = author.clone();
        }
        if let Some(summary) = &self.summary {
            draft.summary = summary.clone();
        }
        if let Some(content) = &self.content {
            draft.content = content.clone();
        }
        if let Some(path) = &self.content_file {
            draft.content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read content file: {}", path.display()))?;
        }
        Ok(())
    }
}

/// Add a new book
pub async fn create(session: &mut Session, args: DraftArgs) -> Result<()> {
    let Screen::Editor(mut editor) = session.router.navigate(Route::New) else {
        bail!("Unexpected screen for {}", Route::New);
    };

    fill_and_submit(session, &mut editor, &args).await?;

    match editor.saved() {
        Some(book) => println!("Created '{}' ({})", book.title, Route::Detail(book.id.clone())),
        None => println!("Created '{}'", editor.draft().title),
    }
    Ok(())
}

/// Change an existing book
pub async fn edit(session: &mut Session, id: BookId, args: DraftArgs) -> Result<()> {
    let mut screen = session.router.navigate(Route::Edit(id));
    let pb = spinner("Loading book...");
    screen.activate(&session.api).await;
    pb.finish_and_clear();

    let Screen::Editor(mut editor) = screen else {
        bail!("Unexpected screen for {}", session.router.current());
    };
    if editor.phase() == EditorPhase::Unavailable {
        match editor.notice() {
            Some(notice) => bail!("{}", notice),
            None => bail!("Book could not be loaded"),
        }
    }

    fill_and_submit(session, &mut editor, &args).await?;

    match editor.saved() {
        Some(book) => println!("Saved '{}' ({})", book.title, Route::Detail(book.id.clone())),
        None => println!("Saved '{}'", editor.draft().title),
    }
    Ok(())
}

async fn fill_and_submit(
    session: &mut Session,
    editor: &mut BookEditor,
    args: &DraftArgs,
) -> Result<()> {
    args.apply(editor.draft_mut())?;

    if (args.generate_summary || args.generate_cover) && !session.generator.has_credential() {
        tracing::warn!("OPENAI_API_KEY is not set, generated fields will be placeholders");
    }

    if args.generate_summary {
        let pb = spinner("Generating summary...");
        let result = editor.generate_summary(&session.generator).await;
        pb.finish_and_clear();
        result.context("Cannot generate a summary")?;
    }

    if args.generate_cover {
        let pb = spinner("Generating cover...");
        let result = editor.generate_cover(&session.generator).await;
        pb.finish_and_clear();
        result.context("Cannot generate a cover")?;
    }

    let pb = spinner("Saving...");
    let next = editor.submit(&session.api).await;
    pb.finish_and_clear();

    match next {
        Some(route) => {
            tracing::debug!(%route, "book saved");
            session.router.navigate(route);
            Ok(())
        }
        None => {
            if let Some(err) = editor.validation() {
                bail!("{}", err);
            }
            match editor.notice() {
                Some(notice) => bail!("{}", notice),
                None => bail!("Book was not saved"),
            }
        }
    }
}
