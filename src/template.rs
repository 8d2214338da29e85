//! Placeholder substitution for path specs and task instructions.
//!
//! Placeholders use `{NAME}` syntax. Substitution is plain text replacement:
//!
//! - `{NAME}` with a binding is replaced by the bound value
//! - `{NAME}` without a binding is left exactly as written
//! - Any other brace (lone `{`, lone `}`, `{}`) is copied through unchanged
//!
//! There is no escaping and no strict mode. Unresolved placeholders are not an
//! error at this layer; a path that still contains one simply fails to resolve
//! later and is reported as missing.

use std::collections::BTreeMap;

/// Placeholder name to substitution value.
///
/// Built from the environment variables a task requires, overlaid with
/// explicit caller-supplied values. Explicit values win on collision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableBinding {
    values: BTreeMap<String, String>,
}

impl VariableBinding {
    /// Create an empty binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge environment-sourced values with explicit overrides.
    pub fn merged(environment: VariableBinding, explicit: &VariableBinding) -> Self {
        let mut merged = environment;
        for (name, value) in &explicit.values {
            merged.values.insert(name.clone(), value.clone());
        }
        merged
    }

    /// Bind `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every bound `{NAME}` placeholder in `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use runbook::template::VariableBinding;
    ///
    /// let vars: VariableBinding = [("SERVICE", "api")].into_iter().collect();
    /// assert_eq!(vars.substitute("/docs/{SERVICE}.md"), "/docs/api.md");
    /// assert_eq!(vars.substitute("/docs/{OTHER}.md"), "/docs/{OTHER}.md");
    /// ```
    pub fn substitute(&self, text: &str) -> String {
        if self.values.is_empty() || !text.contains('{') {
            return text.to_string();
        }

        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];

            // A placeholder ends at the first '}' with no '{' in between.
            let close = after_open
                .find(['{', '}'])
                .filter(|&i| after_open.as_bytes()[i] == b'}');

            match close {
                Some(close) => {
                    let name = &after_open[..close];
                    match self.get(name) {
                        Some(value) if !name.is_empty() => result.push_str(value),
                        _ => {
                            result.push('{');
                            result.push_str(name);
                            result.push('}');
                        }
                    }
                    rest = &after_open[close + 1..];
                }
                None => {
                    result.push('{');
                    rest = after_open;
                }
            }
        }

        result.push_str(rest);
        result
    }
}

impl<K, V> FromIterator<(K, V)> for VariableBinding
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
