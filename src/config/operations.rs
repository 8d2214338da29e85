//! Config loading and provenance queries.

use super::model::Config;
use super::types::{ConfigItem, ConfigSource, ITEMS, ItemKind, SECRET_MASK};
use crate::error::{Result, RunbookError};
use std::collections::HashMap;
use std::path::PathBuf;

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Every item resolved from the lookup or its default
    /// * `Err(RunbookError::UserError)` - An integer item is not a valid integer
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = HashMap::new();
        let mut items = Vec::with_capacity(ITEMS.len());

        for spec in ITEMS {
            let (value, source) = match lookup(spec.name).filter(|v| !v.is_empty()) {
                Some(value) => (value, ConfigSource::Environment),
                None => (spec.default.to_string(), ConfigSource::Default),
            };

            let recorded = match spec.kind {
                ItemKind::Secret => SECRET_MASK.to_string(),
                ItemKind::Text | ItemKind::Integer => value.clone(),
            };
            items.push(ConfigItem {
                name: spec.name.to_string(),
                value: recorded,
                source,
            });
            values.insert(spec.name, value);
        }

        let mut take = |name: &str| values.remove(name).unwrap_or_default();

        Ok(Config {
            repo_root: PathBuf::from(take("REPO_ROOT")),
            context_root: PathBuf::from(take("CONTEXT_ROOT")),
            log_level: take("LOG_LEVEL"),
            tracking_breadcrumb: take("TRACKING_BREADCRUMB"),
            llm_provider: take("LLM_PROVIDER"),
            llm_model: take("LLM_MODEL"),
            llm_base_url: take("LLM_BASE_URL"),
            llm_temperature: parse_int("LLM_TEMPERATURE", &take("LLM_TEMPERATURE"))?,
            llm_max_tokens: parse_int("LLM_MAX_TOKENS", &take("LLM_MAX_TOKENS"))?,
            llm_api_key: take("LLM_API_KEY"),
            items,
        })
    }

    /// Provenance of every item in load order, secrets masked.
    pub fn items(&self) -> &[ConfigItem] {
        &self.items
    }

    /// Sampling temperature as a fraction (`LLM_TEMPERATURE / 10`).
    pub fn temperature(&self) -> f64 {
        f64::from(self.llm_temperature) / 10.0
    }

    /// Default value of a known item.
    pub fn default_for(name: &str) -> Option<&'static str> {
        ITEMS.iter().find(|spec| spec.name == name).map(|spec| spec.default)
    }

    /// Whether `name` was set in the environment rather than defaulted.
    pub fn is_from_environment(&self, name: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.name == name && item.source == ConfigSource::Environment)
    }

    /// Emit one log event per item, then warn if no breadcrumb is set.
    pub fn log_items(&self) {
        for item in &self.items {
            tracing::info!(
                name = %item.name,
                value = %item.value,
                source = %item.source,
                "Configuration item"
            );
        }
        if self.tracking_breadcrumb.is_empty() {
            tracing::warn!("TRACKING_BREADCRUMB not set");
        }
        tracing::info!("Configuration initialized");
    }
}

fn parse_int(name: &str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| {
        RunbookError::UserError(format!(
            "configuration item {} must be a non-negative integer, found '{}'",
            name, value
        ))
    })
}
