//! Process configuration

use crate::error::{BookcaseError, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_GENERATION_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEXT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings, injected once at process start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the book-storage service, including the `/api` prefix
    pub api_base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub generation: GenerationSettings,
}

/// Settings for the external text/image generation service
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Bearer credential; without it generation degrades to placeholders
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub image_size: String,
}

// Keeps the credential out of logs.
impl std::fmt::Debug for GenerationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("image_size", &self.image_size)
            .finish()
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GENERATION_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            generation: GenerationSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the environment, reading `.env` first if present
    pub fn load() -> Result<Self> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Settings::default();

        let timeout_secs = match get("BOOKCASE_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(BookcaseError::Config(format!(
                        "BOOKCASE_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => defaults.timeout_secs,
        };

        let api_base_url = get("BOOKCASE_API_URL").unwrap_or(defaults.api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(BookcaseError::Config(format!(
                "BOOKCASE_API_URL must be an http(s) URL, got '{}'",
                api_base_url
            )));
        }

        let generation = GenerationSettings {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("BOOKCASE_GENERATION_URL").unwrap_or(defaults.generation.base_url),
            text_model: get("BOOKCASE_TEXT_MODEL").unwrap_or(defaults.generation.text_model),
            image_model: get("BOOKCASE_IMAGE_MODEL").unwrap_or(defaults.generation.image_model),
            image_size: get("BOOKCASE_IMAGE_SIZE").unwrap_or(defaults.generation.image_size),
        };

        Ok(Self {
            api_base_url,
            timeout_secs,
            generation,
        })
    }

    /// Override the storage base URL (e.g. from a command-line flag)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
