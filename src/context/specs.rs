//! Validation of declared path-spec collections.
//!
//! A declaration is one of:
//!
//! - absent (`None`): nothing to resolve
//! - an explicit null (`context:` with no value): rejected, the intent is ambiguous
//! - a sequence: accepted
//! - anything else (a bare string, a mapping, a number): rejected as a structural mistake

use crate::error::{Result, RunbookError};
use serde_yaml::Value;

/// Validate that a declaration is absent or a sequence, returning its entries.
pub fn declared_sequence<'a>(field: &str, declared: Option<&'a Value>) -> Result<Option<&'a [Value]>> {
    match declared {
        None => Ok(None),
        Some(Value::Null) => Err(RunbookError::InvalidSpecType {
            field: field.to_string(),
            reason: format!(
                "'{}' is present but has no value; remove the key or provide a list (use [] for none)",
                field
            ),
        }),
        Some(Value::Sequence(entries)) => Ok(Some(entries.as_slice())),
        Some(other) => Err(RunbookError::InvalidSpecType {
            field: field.to_string(),
            reason: format!(
                "'{}' must be a list of path specs, found {}",
                field,
                describe(other)
            ),
        }),
    }
}

/// Validate a path-spec declaration whose entries must all be strings.
///
/// Every non-string entry is reported in one error.
pub fn declared_specs(field: &str, declared: Option<&Value>) -> Result<Option<Vec<String>>> {
    let Some(entries) = declared_sequence(field, declared)? else {
        return Ok(None);
    };

    let mut specs = Vec::with_capacity(entries.len());
    let mut invalid = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match entry.as_str() {
            Some(spec) => specs.push(spec.to_string()),
            None => invalid.push(format!("entry {} is {}", index, describe(entry))),
        }
    }

    if !invalid.is_empty() {
        return Err(RunbookError::InvalidSpecType {
            field: field.to_string(),
            reason: format!(
                "'{}' entries must be strings ({})",
                field,
                invalid.join(", ")
            ),
        });
    }

    Ok(Some(specs))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
