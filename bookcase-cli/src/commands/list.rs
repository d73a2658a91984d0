//! List command implementation

use super::{render, spinner, Session};
use anyhow::{bail, Result};
use bookcase_core::views::ListState;
use bookcase_core::{ListQuery, Route, Screen};

/// List books, newest first
pub async fn list(
    session: &mut Session,
    search: Option<String>,
    page: Option<u32>,
    size: Option<u32>,
    json: bool,
) -> Result<()> {
    let query = ListQuery {
        search: search.filter(|s| !s.trim().is_empty()),
        page,
        size,
    };
    session.router = std::mem::take(&mut session.router).with_list_query(query);

    let mut screen = session.router.navigate(Route::List);
    let pb = spinner("Loading books...");
    screen.activate(&session.api).await;
    pb.finish_and_clear();

    let Screen::List(view) = screen else {
        bail!("Unexpected screen for {}", Route::List);
    };

    match view.state() {
        ListState::Loaded(cards) => {
            render::cards(cards, view.total(), json)?;
            Ok(())
        }
        ListState::Failed(notice) => bail!("{}", notice),
        ListState::Loading => bail!("Book list did not load"),
    }
}
