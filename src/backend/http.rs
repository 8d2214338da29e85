//! Shared blocking HTTP plumbing for the remote adapters.

use super::BackendError;
use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Upper bound on a single completion request.
pub(super) const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub(super) fn client() -> Result<Client, BackendError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| BackendError::Config(format!("failed to build HTTP client: {}", e)))
}

/// Strip trailing slashes so endpoint paths can be appended.
pub(super) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// POST `body` as JSON and decode a successful reply as `T`.
pub(super) fn post_json<B, T>(
    client: &Client,
    url: &str,
    bearer: Option<&str>,
    body: &B,
) -> Result<T, BackendError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    tracing::debug!(url, "Sending completion request");

    let mut request = client.post(url).json(body);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .map_err(|e| BackendError::Transport(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .map_err(|e| BackendError::Transport(format!("failed to read response body: {}", e)))?;

    if !status.is_success() {
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| BackendError::InvalidResponse(e.to_string()))
}
