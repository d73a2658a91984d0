//! Open command implementation

use super::{render, spinner, Session};
use anyhow::{bail, Result};
use bookcase_core::views::ListState;
use bookcase_core::Screen;

/// Resolve a client path and render whatever screen it mounts
pub async fn open(session: &mut Session, path: &str, json: bool) -> Result<()> {
    let mut screen = session.router.open(path);
    tracing::debug!(route = %session.router.current(), "opened");

    if let Screen::NotFound(path) = &screen {
        bail!("Page not found: {}", path);
    }

    let pb = spinner("Loading...");
    screen.activate(&session.api).await;
    pb.finish_and_clear();

    match screen {
        Screen::List(view) => match view.state() {
            ListState::Loaded(cards) => render::cards(cards, view.total(), json),
            ListState::Failed(notice) => bail!("{}", notice),
            ListState::Loading => bail!("Book list did not load"),
        },
        Screen::Detail(view) => render::detail(&view, json),
        Screen::Editor(editor) => {
            if json {
                println!("{}", serde_json::to_string_pretty(editor.draft())?);
                Ok(())
            } else {
                render::editor(&editor)
            }
        }
        Screen::NotFound(path) => bail!("Page not found: {}", path),
    }
}
