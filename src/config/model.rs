//! Config struct definition.

use super::types::{ConfigItem, SECRET_MASK};
use std::fmt;
use std::path::PathBuf;

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct Config {
    // =========================================================================
    // Paths and logging
    // =========================================================================
    /// Repository the task operates on.
    pub repo_root: PathBuf,

    /// Tree of shared task definitions and reference documents.
    pub context_root: PathBuf,

    /// Log level name (`DEBUG`, `INFO`, `WARN`, `ERROR`).
    pub log_level: String,

    /// Opaque token attached to log output for correlating runs.
    pub tracking_breadcrumb: String,

    // =========================================================================
    // Backend
    // =========================================================================
    pub llm_provider: String,
    pub llm_model: String,
    pub llm_base_url: String,

    /// Sampling temperature in tenths.
    pub llm_temperature: u32,

    pub llm_max_tokens: u32,

    /// Never logged or debug-printed; [`Config::items`] records it masked.
    pub llm_api_key: String,

    pub(super) items: Vec<ConfigItem>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("repo_root", &self.repo_root)
            .field("context_root", &self.context_root)
            .field("log_level", &self.log_level)
            .field("tracking_breadcrumb", &self.tracking_breadcrumb)
            .field("llm_provider", &self.llm_provider)
            .field("llm_model", &self.llm_model)
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("llm_api_key", &SECRET_MASK)
            .field("items", &self.items)
            .finish()
    }
}
