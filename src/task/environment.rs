//! Required environment variable validation.

use super::TaskDefinition;
use crate::context::specs::declared_sequence;
use crate::error::{Result, RunbookError};
use crate::template::VariableBinding;

/// Collect the values of every environment variable the task requires.
///
/// `lookup` returns the value of a variable, or `None` when it is unset
/// (production callers pass `|name| std::env::var(name).ok()`).
///
/// All unset variables are reported together in one
/// `RunbookError::MissingEnvironment`. Entries that are not strings are
/// skipped with a warning.
pub fn load_environment<F>(task: &TaskDefinition, lookup: F) -> Result<VariableBinding>
where
    F: Fn(&str) -> Option<String>,
{
    let mut binding = VariableBinding::new();

    let Some(names) = declared_sequence("environment", task.frontmatter.environment.as_ref())?
    else {
        return Ok(binding);
    };

    let mut missing = Vec::new();
    for entry in names {
        let Some(name) = entry.as_str() else {
            tracing::warn!(entry = ?entry, "invalid environment variable name (not a string)");
            continue;
        };

        match lookup(name) {
            Some(value) => binding.insert(name, value),
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(RunbookError::MissingEnvironment {
            missing,
            description: task.description().unwrap_or("unknown").to_string(),
        });
    }

    Ok(binding)
}
