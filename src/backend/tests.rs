//! Tests for backend selection, request bodies and reply decoding.

use super::openai::ChatResponse;
use super::*;
use crate::response::parse_response;
use serde_json::json;
use std::collections::HashMap;

fn config(pairs: &[(&str, &str)]) -> Config {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| env.get(name).cloned()).unwrap()
}

fn config_error(pairs: &[(&str, &str)]) -> String {
    match create_backend(&config(pairs)) {
        Err(BackendError::Config(message)) => message,
        Err(other) => panic!("expected config error, got {:?}", other),
        Ok(backend) => panic!("expected config error, got backend {}", backend.name()),
    }
}

// ============================================================================
// Provider selection
// ============================================================================

#[test]
fn test_provider_parsing() {
    assert_eq!("null".parse::<Provider>().unwrap(), Provider::Null);
    assert_eq!("Ollama".parse::<Provider>().unwrap(), Provider::Ollama);
    assert_eq!("OPENAI".parse::<Provider>().unwrap(), Provider::OpenAi);
    assert_eq!("azure".parse::<Provider>().unwrap(), Provider::Azure);
    assert!("anthropic".parse::<Provider>().is_err());
}

#[test]
fn test_default_config_selects_null_backend() {
    let backend = create_backend(&config(&[])).unwrap();
    assert_eq!(backend.name(), "null");
}

#[test]
fn test_unknown_provider_is_config_error() {
    let message = config_error(&[("LLM_PROVIDER", "bogus")]);
    assert!(message.contains("bogus"));
}

#[test]
fn test_openai_requires_api_key() {
    let message = config_error(&[("LLM_PROVIDER", "openai")]);
    assert!(message.contains("LLM_API_KEY"));
}

#[test]
fn test_azure_requires_explicit_base_url() {
    let message = config_error(&[("LLM_PROVIDER", "azure"), ("LLM_API_KEY", "k")]);
    assert!(message.contains("LLM_BASE_URL"));
}

#[test]
fn test_openai_defaults_base_url() {
    let backend = OpenAiBackend::new("gpt-4", OPENAI_DEFAULT_BASE_URL, "k").unwrap();
    assert_eq!(backend.api_url(), "https://api.openai.com/v1/chat/completions");

    let selected = create_backend(&config(&[
        ("LLM_PROVIDER", "openai"),
        ("LLM_API_KEY", "k"),
    ]))
    .unwrap();
    assert_eq!(selected.name(), "openai");
}

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    let backend = OllamaBackend::new("codellama", "http://localhost:11434/").unwrap();
    assert_eq!(backend.api_url(), "http://localhost:11434/api/generate");
}

// ============================================================================
// Null backend
// ============================================================================

#[test]
fn test_null_backend_reply_is_well_formed() {
    let reply = NullBackend.complete("system", "user", 0.7, 10).unwrap();

    let parsed = parse_response(&reply).unwrap();
    assert_eq!(parsed.commit_message, "feat: mock change");
    assert!(parsed.patch.contains("+++ b/test.txt"));
    assert!(parsed.patch.ends_with("+mock content"));
}

// ============================================================================
// Request bodies
// ============================================================================

#[test]
fn test_ollama_request_body() {
    let backend = OllamaBackend::new("codellama", "http://localhost:11434").unwrap();

    let body = serde_json::to_value(backend.request("SYS", "USR", 0.5, 128)).unwrap();

    assert_eq!(
        body,
        json!({
            "model": "codellama",
            "prompt": "SYS\n\nUSR",
            "stream": false,
            "options": { "temperature": 0.5, "num_predict": 128 }
        })
    );
}

#[test]
fn test_openai_request_body() {
    let backend = OpenAiBackend::new("gpt-4", "https://example.test", "k").unwrap();

    let body = serde_json::to_value(backend.request("SYS", "USR", 0.5, 256)).unwrap();

    assert_eq!(
        body,
        json!({
            "model": "gpt-4",
            "messages": [
                { "role": "system", "content": "SYS" },
                { "role": "user", "content": "USR" }
            ],
            "temperature": 0.5,
            "max_tokens": 256
        })
    );
}

// ============================================================================
// Reply decoding
// ============================================================================

#[test]
fn test_chat_response_first_choice() {
    let reply: ChatResponse = serde_json::from_value(json!({
        "choices": [
            { "message": { "role": "assistant", "content": "first" } },
            { "message": { "role": "assistant", "content": "second" } }
        ]
    }))
    .unwrap();

    assert_eq!(reply.into_content().unwrap(), "first");
}

#[test]
fn test_chat_response_without_choices_is_invalid() {
    let reply: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();

    assert!(matches!(
        reply.into_content(),
        Err(BackendError::InvalidResponse(_))
    ));
}

#[test]
fn test_api_error_message() {
    let err = BackendError::Api {
        status: 401,
        message: "unauthorized".to_string(),
    };
    assert_eq!(err.to_string(), "backend returned HTTP 401: unauthorized");
}
