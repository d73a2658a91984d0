//! Show command implementation

use super::{render, spinner, Session};
use anyhow::{bail, Result};
use bookcase_core::{BookId, Route, Screen};

/// Show one book with every field
pub async fn show(session: &mut Session, id: BookId, json: bool) -> Result<()> {
    let mut screen = session.router.navigate(Route::Detail(id));
    let pb = spinner("Loading book...");
    screen.activate(&session.api).await;
    pb.finish_and_clear();

    match screen {
        Screen::Detail(view) => render::detail(&view, json),
        _ => bail!("Unexpected screen for {}", session.router.current()),
    }
}
