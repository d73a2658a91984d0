//! OpenAI-compatible generation client

use super::Generator;
use crate::config::{GenerationSettings, Settings};
use crate::error::{BookcaseError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CREDENTIAL: &str = "OPENAI_API_KEY";

const SUMMARY_INSTRUCTIONS: &str =
    "You summarize books. Reply with a two or three sentence summary of the text you are given.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: String,
    n: u8,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
}

/// Generator backed by the chat-completions and image-generation endpoints
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: Client,
    settings: GenerationSettings,
}

impl OpenAiGenerator {
    pub fn new(settings: GenerationSettings, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        // Image generation is slow; give it more room than storage calls.
        Self::new(settings.generation.clone(), settings.timeout() * 6)
    }

    /// Whether a credential is configured
    pub fn has_credential(&self) -> bool {
        self.settings.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str> {
        self.settings
            .api_key
            .as_deref()
            .ok_or(BookcaseError::MissingCredential(CREDENTIAL))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.settings.base_url.trim_end_matches('/'), path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BookcaseError::Generation(format!(
                "{} returned {}: {}",
                path,
                status,
                text.trim()
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn summarize(&self, content: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.settings.text_model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SUMMARY_INSTRUCTIONS,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
            max_tokens: 300,
        };

        let response: ChatResponse = self.post("/chat/completions", &request).await?;
        response
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| BookcaseError::Generation("completion had no text".to_string()))
    }

    async fn cover(&self, summary: &str) -> Result<String> {
        let request = ImageRequest {
            model: &self.settings.image_model,
            prompt: format!("A book cover illustration for this story: {}", summary.trim()),
            n: 1,
            size: &self.settings.image_size,
        };

        let response: ImageResponse = self.post("/images/generations", &request).await?;
        response
            .data
            .into_iter()
            .find_map(|image| image.url)
            .ok_or_else(|| BookcaseError::Generation("image response had no URL".to_string()))
    }
}
