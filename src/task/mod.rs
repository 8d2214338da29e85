//! Task definition model for runbook.
//!
//! A task file is YAML front matter followed by free-text instructions:
//!
//! ```text
//! ---
//! description: Generate an API spec
//! context:
//!   - /specs/api_standards.md
//! repo:
//!   - src/routes
//! environment:
//!   - SERVICE
//! guarantees:
//!   - OpenAPI 3.1
//! inputs:
//!   - openapi.yaml
//! ---
//! Write the OpenAPI document for {SERVICE}.
//! ```
//!
//! The document is split on the `---` delimiter into exactly three parts: the
//! (empty) text before the opening delimiter, the YAML block, and the body.
//! Any further `---` sequences belong to the body.
//!
//! `context`, `repo` and `environment` are kept as raw YAML values here and
//! validated when used, so that an explicit `null` can be told apart from a
//! value of the wrong shape (see [`crate::context::specs`]).

use crate::error::{Result, RunbookError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

mod environment;
mod io;

pub use environment::load_environment;
pub use io::{TASKS_DIR, TASK_EXTENSION, search_locations};

/// Front matter delimiter.
pub const DELIMITER: &str = "---";

/// A parsed task definition.
#[derive(Debug, Clone)]
pub struct TaskDefinition {
    /// Task name as requested.
    pub name: String,
    /// File the definition was loaded from (empty when parsed from a string).
    pub source: PathBuf,
    /// The declared front matter fields.
    pub frontmatter: TaskFrontmatter,
    /// Free-text body with surrounding whitespace trimmed. Always present.
    pub content: String,
}

/// Task front matter fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFrontmatter {
    /// One-line description, used as the task line of the system prompt.
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // =========================================================================
    // Path-spec declarations (validated on use)
    // =========================================================================
    /// Context-root path specs. `Some(Null)` means the key is present but empty.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_yaml::Value>,

    /// Repository-root path specs.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub repo: Option<serde_yaml::Value>,

    /// Names of environment variables that must be set.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub environment: Option<serde_yaml::Value>,

    // =========================================================================
    // Prompt material
    // =========================================================================
    /// Requirements listed in the system prompt.
    #[serde(default, deserialize_with = "scalars", skip_serializing_if = "Option::is_none")]
    pub guarantees: Option<Vec<String>>,

    /// Repo-relative files previewed in the user prompt.
    #[serde(default, deserialize_with = "scalars", skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<String>>,

    /// Any keys not recognized above (e.g. `outputs`).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Keep an explicit YAML `null` as `Some(Value::Null)`; absence stays `None`
/// through `#[serde(default)]`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<serde_yaml::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_yaml::Value::deserialize(deserializer).map(Some)
}

/// Accept any YAML scalar as text; `null` is treated as absent.
fn scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    scalar_text(&value).map(Some).map_err(D::Error::custom)
}

/// A sequence of YAML scalars as text; nested collections are rejected.
fn scalars<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(values) = Option::<Vec<serde_yaml::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    values
        .iter()
        .map(scalar_text)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(Some)
        .map_err(D::Error::custom)
}

fn scalar_text(value: &serde_yaml::Value) -> std::result::Result<String, String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::Sequence(_) => Err("expected a scalar, found a sequence".to_string()),
        serde_yaml::Value::Mapping(_) => Err("expected a scalar, found a mapping".to_string()),
        serde_yaml::Value::Tagged(tagged) => scalar_text(&tagged.value),
    }
}

impl TaskDefinition {
    /// Parse a task definition from file content.
    ///
    /// # Examples
    ///
    /// ```
    /// use runbook::task::TaskDefinition;
    ///
    /// let content = "---\ndescription: Test task\n---\nDo something.\n";
    /// let task = TaskDefinition::parse("test", content).unwrap();
    /// assert_eq!(task.description(), Some("Test task"));
    /// assert_eq!(task.content, "Do something.");
    /// ```
    pub fn parse(name: &str, content: &str) -> Result<Self> {
        if !content.starts_with(DELIMITER) {
            return Err(malformed(
                name,
                "task must start with YAML front matter (---)".to_string(),
            ));
        }

        let parts: Vec<&str> = content.splitn(3, DELIMITER).collect();
        if parts.len() < 3 {
            return Err(malformed(
                name,
                "task must have YAML front matter and content".to_string(),
            ));
        }

        let value: serde_yaml::Value = serde_yaml::from_str(parts[1])
            .map_err(|e| malformed(name, format!("invalid YAML in front matter: {}", e)))?;

        let frontmatter = match value {
            serde_yaml::Value::Null => TaskFrontmatter::default(),
            serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)
                .map_err(|e| malformed(name, format!("invalid front matter: {}", e)))?,
            _ => {
                return Err(malformed(
                    name,
                    "front matter must be a mapping of keys to values".to_string(),
                ));
            }
        };

        Ok(Self {
            name: name.to_string(),
            source: PathBuf::new(),
            frontmatter,
            content: parts[2].trim().to_string(),
        })
    }

    /// The task description, if declared.
    pub fn description(&self) -> Option<&str> {
        self.frontmatter.description.as_deref()
    }

    /// Declared guarantees, empty when absent.
    pub fn guarantees(&self) -> &[String] {
        self.frontmatter.guarantees.as_deref().unwrap_or_default()
    }

    /// Declared input previews, empty when absent.
    pub fn inputs(&self) -> &[String] {
        self.frontmatter.inputs.as_deref().unwrap_or_default()
    }
}

fn malformed(task: &str, reason: String) -> RunbookError {
    RunbookError::MalformedTask {
        task: task.to_string(),
        reason,
    }
}
