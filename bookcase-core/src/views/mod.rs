//! Headless view models for the four catalog screens
//!
//! Each view owns its own copy of the data it shows, talks to a `BookApi`,
//! and reports navigation by returning a `Route`. Views never share mutable
//! state except through the optional hoisted `Catalog`.

mod catalog;
mod detail;
mod editor;
mod list;

pub use catalog::Catalog;
pub use detail::{DetailState, DetailView, DELETE_PROMPT};
pub use editor::{BookEditor, EditorMode, EditorPhase};
pub use list::{BookCard, ListState, ListView};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Liveness token for a mounted view
///
/// The router keeps one clone and flips it when it navigates away. Views
/// check it after every await and drop late results instead of committing
/// them.
#[derive(Debug, Clone)]
pub struct Mount(Arc<AtomicBool>);

impl Mount {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A dismissible message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// A blocking yes/no decision put to the user
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_clones_share_liveness() {
        let mount = Mount::new();
        let held_by_router = mount.clone();
        assert!(mount.is_live());

        held_by_router.unmount();
        assert!(!mount.is_live());
    }

    #[test]
    fn test_closures_confirm() {
        let yes = |_: &str| true;
        let no = |_: &str| false;
        assert!(yes.confirm("sure?"));
        assert!(!no.confirm("sure?"));
    }
}
