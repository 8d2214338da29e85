//! OpenAI-compatible chat completions adapter (also used for Azure).

use super::http::{client, post_json, trim_base_url};
use super::{BackendError, CompletionBackend};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Base URL used for `openai` when `LLM_BASE_URL` is not set.
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAiBackend {
    client: Client,
    model: String,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoice {
    pub message: ChatReply,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatReply {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice.
    pub(super) fn into_content(self) -> Result<String, BackendError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BackendError::InvalidResponse("no message content in choices".into()))
    }
}

impl OpenAiBackend {
    /// # Errors
    ///
    /// Fails when `api_key` is empty.
    pub fn new(model: &str, base_url: &str, api_key: &str) -> Result<Self, BackendError> {
        if api_key.is_empty() {
            return Err(BackendError::Config(
                "LLM_API_KEY required for OpenAI-compatible backends".to_string(),
            ));
        }
        Ok(Self {
            client: client()?,
            model: model.to_string(),
            api_url: format!("{}/v1/chat/completions", trim_base_url(base_url)),
            api_key: api_key.to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(super) fn request<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
        temperature: f64,
        max_tokens: u32,
    ) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            max_tokens,
        }
    }
}

impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, BackendError> {
        let body = self.request(system, user, temperature, max_tokens);
        let reply: ChatResponse =
            post_json(&self.client, &self.api_url, Some(&self.api_key), &body)
                .inspect_err(|e| tracing::error!(error = %e, "OpenAI request failed"))?;
        reply.into_content()
    }
}
