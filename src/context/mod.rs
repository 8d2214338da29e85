//! Context aggregation: turning declared path specs into file contents.
//!
//! Tasks declare two kinds of sources:
//!
//! - `context` specs, resolved against the context root and keyed by the spec
//!   itself (or by the root-relative path for files found in a directory)
//! - `repo` specs, resolved against the repository root and keyed the same way
//!   with a `repo:` prefix, so a repository file never collides with a
//!   context file of the same relative path
//!
//! Each spec has its `{NAME}` placeholders substituted first. A spec naming a
//! file contributes that file; a spec naming a directory contributes every file
//! beneath it, in file-name order.
//!
//! Aggregation is fail-closed: every spec is classified before anything is
//! read, and if any spec resolves to nothing the whole aggregation fails with
//! one error listing every missing spec next to the path it was looked up at.

use crate::error::{MissingSpec, Result, RunbookError};
use crate::template::VariableBinding;
use indexmap::IndexMap;
use serde_yaml::Value;
use std::path::Path;

mod resolve;
pub mod specs;
#[cfg(test)]
mod tests;

/// Key prefix for repository-sourced entries.
pub const REPO_KEY_PREFIX: &str = "repo:";

/// Where a set of specs is resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The context root.
    Context,
    /// The repository root.
    Repo,
}

impl Source {
    fn key(self, relative: &str) -> String {
        match self {
            Source::Context => relative.to_string(),
            Source::Repo => format!("{}{}", REPO_KEY_PREFIX, relative),
        }
    }

    fn field(self) -> &'static str {
        match self {
            Source::Context => "context",
            Source::Repo => "repo",
        }
    }

    fn missing_error(self, missing: Vec<MissingSpec>) -> RunbookError {
        match self {
            Source::Context => RunbookError::MissingContext(missing),
            Source::Repo => RunbookError::MissingRepoFiles(missing),
        }
    }
}

/// Resolved reference key to file content, in resolution order.
///
/// A key is present if and only if its source file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedContext {
    files: IndexMap<String, String>,
}

impl ResolvedContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file. Re-inserting a key replaces its content in place.
    pub fn insert(&mut self, key: String, content: String) {
        self.files.insert(key, content);
    }

    /// Append every entry of `other`.
    pub fn extend(&mut self, other: ResolvedContext) {
        self.files.extend(other.files);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.files.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.files.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over `(key, content)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Resolve context specs relative to `context_root`.
///
/// # Returns
///
/// * `Ok(ResolvedContext)` - Every spec resolved
/// * `Err(RunbookError::MissingContext)` - One or more specs resolved to nothing (all listed)
/// * `Err(RunbookError::Io)` - A resolved file could not be read
pub fn resolve_context(
    context_root: &Path,
    specs: &[String],
    variables: Option<&VariableBinding>,
) -> Result<ResolvedContext> {
    resolve::resolve_specs(Source::Context, context_root, specs, variables)
}

/// Resolve repository specs relative to `repo_root`. Keys carry the `repo:` prefix.
///
/// # Returns
///
/// * `Ok(ResolvedContext)` - Every spec resolved
/// * `Err(RunbookError::MissingRepoFiles)` - One or more specs resolved to nothing (all listed)
/// * `Err(RunbookError::Io)` - A resolved file could not be read
pub fn resolve_repo(
    repo_root: &Path,
    specs: &[String],
    variables: Option<&VariableBinding>,
) -> Result<ResolvedContext> {
    resolve::resolve_specs(Source::Repo, repo_root, specs, variables)
}

/// Validate a raw front matter declaration and resolve it.
///
/// An absent declaration resolves to an empty context; a null or non-sequence
/// declaration is `RunbookError::InvalidSpecType`.
pub fn aggregate(
    source: Source,
    root: &Path,
    declared: Option<&Value>,
    variables: Option<&VariableBinding>,
) -> Result<ResolvedContext> {
    match specs::declared_specs(source.field(), declared)? {
        Some(specs) => resolve::resolve_specs(source, root, &specs, variables),
        None => Ok(ResolvedContext::new()),
    }
}
