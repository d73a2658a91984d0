//! CLI command implementations

mod compose;
mod delete;
mod list;
mod open;
mod render;
mod show;

pub use compose::{create, edit, DraftArgs};
pub use delete::delete;
pub use list::list;
pub use open::open;
pub use show::show;

use anyhow::{Context, Result};
use bookcase_core::{HttpBookApi, OpenAiGenerator, Router, Settings};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Everything a command needs to talk to the services
pub struct Session {
    pub api: HttpBookApi,
    pub generator: OpenAiGenerator,
    pub router: Router,
}

impl Session {
    /// Load settings and build the clients
    pub fn connect(api_url: Option<&str>) -> Result<Self> {
        let mut settings = Settings::load().context("Failed to load settings")?;
        if let Some(url) = api_url {
            settings = settings.with_api_base_url(url);
        }
        tracing::debug!(?settings, "settings loaded");

        let api = HttpBookApi::from_settings(&settings).context("Failed to build API client")?;
        let generator =
            OpenAiGenerator::from_settings(&settings).context("Failed to build generation client")?;

        Ok(Self {
            api,
            generator,
            router: Router::new(),
        })
    }
}

/// Spinner shown on stderr while a request is pending
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
