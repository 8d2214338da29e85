//! Completion backends.
//!
//! The pipeline only needs one capability from a text-generation service:
//! turn a system prompt and a user prompt into a reply. [`CompletionBackend`]
//! is that seam; adapters here implement it for a dry-run stub, Ollama and
//! OpenAI-compatible chat endpoints. The backend is chosen once at startup
//! from [`Config`] and never changes during a run.

mod http;
mod null;
mod ollama;
mod openai;

#[cfg(test)]
mod tests;

use crate::config::Config;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use null::{NULL_RESPONSE, NullBackend};
pub use ollama::OllamaBackend;
pub use openai::{OPENAI_DEFAULT_BASE_URL, OpenAiBackend};

/// Errors raised by a completion backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend could not be constructed from configuration.
    #[error("backend configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response.
    #[error("backend request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("backend returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Body or error message returned by the service.
        message: String,
    },

    /// The service answered but the body has an unexpected shape.
    #[error("backend returned an unexpected response: {0}")]
    InvalidResponse(String),
}

/// A service that completes a prompt pair.
pub trait CompletionBackend {
    /// Short name used in log events.
    fn name(&self) -> &str;

    /// Produce a reply for the given prompts.
    ///
    /// # Errors
    ///
    /// Any failure is returned as-is; callers do not retry.
    fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, BackendError>;
}

impl<B: CompletionBackend + ?Sized> CompletionBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, BackendError> {
        (**self).complete(system, user, temperature, max_tokens)
    }
}

/// Supported `LLM_PROVIDER` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Null,
    Ollama,
    OpenAi,
    Azure,
}

impl FromStr for Provider {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(Provider::Null),
            "ollama" => Ok(Provider::Ollama),
            "openai" => Ok(Provider::OpenAi),
            "azure" => Ok(Provider::Azure),
            other => Err(BackendError::Config(format!(
                "unsupported LLM provider '{}' (expected null, ollama, openai or azure)",
                other
            ))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Null => "null",
            Provider::Ollama => "ollama",
            Provider::OpenAi => "openai",
            Provider::Azure => "azure",
        };
        f.write_str(name)
    }
}

/// Build the backend selected by `config`.
///
/// # Errors
///
/// Returns [`BackendError::Config`] for an unknown provider, a missing API key
/// (openai, azure) or a missing explicit base URL (azure).
pub fn create_backend(config: &Config) -> Result<Box<dyn CompletionBackend>, BackendError> {
    let provider: Provider = config.llm_provider.parse()?;
    let backend: Box<dyn CompletionBackend> = match provider {
        Provider::Null => Box::new(NullBackend),
        Provider::Ollama => Box::new(OllamaBackend::new(&config.llm_model, &config.llm_base_url)?),
        Provider::OpenAi | Provider::Azure => {
            let base_url = if config.is_from_environment("LLM_BASE_URL") {
                config.llm_base_url.clone()
            } else if provider == Provider::OpenAi {
                OPENAI_DEFAULT_BASE_URL.to_string()
            } else {
                return Err(BackendError::Config(format!(
                    "LLM_BASE_URL required for {}",
                    provider
                )));
            };
            Box::new(OpenAiBackend::new(
                &config.llm_model,
                &base_url,
                &config.llm_api_key,
            )?)
        }
    };

    tracing::info!(
        provider = %provider,
        model = %config.llm_model,
        backend = backend.name(),
        "Selected completion backend"
    );
    Ok(backend)
}
