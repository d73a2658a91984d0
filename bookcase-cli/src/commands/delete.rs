//! Delete command implementation

use super::{spinner, Session};
use anyhow::{bail, Result};
use bookcase_core::views::DetailState;
use bookcase_core::{BookId, Confirm, Route, Screen};
use std::io::{self, BufRead, Write};

/// Asks on stderr and reads the answer from stdin; anything but yes declines
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Delete a book after confirmation
pub async fn delete(session: &mut Session, id: BookId, yes: bool) -> Result<()> {
    let mut screen = session.router.navigate(Route::Detail(id.clone()));
    let pb = spinner("Loading book...");
    screen.activate(&session.api).await;
    pb.finish_and_clear();

    let Screen::Detail(mut view) = screen else {
        bail!("Unexpected screen for {}", session.router.current());
    };

    let title = match view.state() {
        DetailState::Loaded(book) => book.title.clone(),
        DetailState::NotFound => bail!("Book {} not found", id),
        DetailState::Failed(notice) => bail!("{}", notice),
        DetailState::Loading => bail!("Book {} did not load", id),
    };

    let next = if yes {
        view.delete(&session.api, &|_: &str| true).await
    } else {
        view.delete(&session.api, &StdinConfirm).await
    };

    match next {
        Some(route) => {
            session.router.navigate(route);
            println!("Deleted '{}'", title);
            Ok(())
        }
        None => match view.notice() {
            Some(notice) => bail!("{}", notice),
            None => {
                println!("Cancelled");
                Ok(())
            }
        },
    }
}
