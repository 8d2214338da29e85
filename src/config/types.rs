//! Configuration item table and provenance types.

use serde::Serialize;
use std::fmt;

/// Value recorded in [`ConfigItem::value`] for secret items.
pub const SECRET_MASK: &str = "secret";

/// How an item's raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Text,
    Integer,
    Secret,
}

/// A known configuration item and its default.
#[derive(Debug, Clone, Copy)]
pub struct ItemSpec {
    pub name: &'static str,
    pub default: &'static str,
    pub kind: ItemKind,
}

/// Every configuration item, in load order.
pub const ITEMS: &[ItemSpec] = &[
    // =========================================================================
    // Paths and logging
    // =========================================================================
    ItemSpec {
        name: "REPO_ROOT",
        default: "/workspace/repo",
        kind: ItemKind::Text,
    },
    ItemSpec {
        name: "CONTEXT_ROOT",
        default: "/workspace/context",
        kind: ItemKind::Text,
    },
    ItemSpec {
        name: "LOG_LEVEL",
        default: "INFO",
        kind: ItemKind::Text,
    },
    ItemSpec {
        name: "TRACKING_BREADCRUMB",
        default: "",
        kind: ItemKind::Text,
    },
    // =========================================================================
    // Backend
    // =========================================================================
    ItemSpec {
        name: "LLM_PROVIDER",
        default: "null",
        kind: ItemKind::Text,
    },
    ItemSpec {
        name: "LLM_MODEL",
        default: "codellama",
        kind: ItemKind::Text,
    },
    ItemSpec {
        name: "LLM_BASE_URL",
        default: "http://localhost:11434",
        kind: ItemKind::Text,
    },
    // Tenths: 7 means 0.7.
    ItemSpec {
        name: "LLM_TEMPERATURE",
        default: "7",
        kind: ItemKind::Integer,
    },
    ItemSpec {
        name: "LLM_MAX_TOKENS",
        default: "8192",
        kind: ItemKind::Integer,
    },
    ItemSpec {
        name: "LLM_API_KEY",
        default: "",
        kind: ItemKind::Secret,
    },
];

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Environment,
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Environment => f.write_str("environment"),
            ConfigSource::Default => f.write_str("default"),
        }
    }
}

/// Provenance record for one item. Secret values are masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigItem {
    pub name: String,
    pub value: String,
    pub source: ConfigSource,
}
