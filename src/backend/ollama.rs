//! Ollama `/api/generate` adapter.

use super::http::{client, post_json, trim_base_url};
use super::{BackendError, CompletionBackend};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

pub struct OllamaBackend {
    client: Client,
    model: String,
    api_url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

#[derive(Debug, Serialize)]
pub(super) struct GenerateOptions {
    pub temperature: f64,
    pub num_predict: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

impl OllamaBackend {
    pub fn new(model: &str, base_url: &str) -> Result<Self, BackendError> {
        Ok(Self {
            client: client()?,
            model: model.to_string(),
            api_url: format!("{}/api/generate", trim_base_url(base_url)),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(super) fn request<'a>(
        &'a self,
        system: &str,
        user: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt: format!("{}\n\n{}", system, user),
            stream: false,
            options: GenerateOptions {
                temperature,
                num_predict: max_tokens,
            },
        }
    }
}

impl CompletionBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, BackendError> {
        let body = self.request(system, user, temperature, max_tokens);
        let reply: GenerateResponse = post_json(&self.client, &self.api_url, None, &body)
            .inspect_err(|e| tracing::error!(error = %e, "Ollama request failed"))?;
        Ok(reply.response)
    }
}
