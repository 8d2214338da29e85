//! Repository and context root resolution.

use crate::cli::RootArgs;
use crate::config::Config;
use crate::error::{Result, RunbookError};
use std::path::{Path, PathBuf};

/// Roots a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    pub repo_root: PathBuf,
    /// `None` when only the default context root applied and it does not exist.
    pub context_root: Option<PathBuf>,
}

/// Pick roots from flags, falling back to configuration.
///
/// # Returns
///
/// * `Ok(Roots)` - The repository root exists; the context root exists or was defaulted
/// * `Err(RunbookError::UserError)` - The repository root is missing, or an
///   explicitly chosen context root is missing
pub fn resolve_roots(args: &RootArgs, config: &Config) -> Result<Roots> {
    let repo_root = require_repo_root(args.repo_root.as_deref(), config)?;

    let explicit = args.context_root.is_some() || config.is_from_environment("CONTEXT_ROOT");
    let context_root = args
        .context_root
        .clone()
        .unwrap_or_else(|| config.context_root.clone());

    let context_root = if context_root.is_dir() {
        Some(context_root)
    } else if explicit {
        return Err(RunbookError::UserError(format!(
            "context root '{}' does not exist",
            context_root.display()
        )));
    } else {
        tracing::info!(
            path = %context_root.display(),
            "Default context root not found; continuing without one"
        );
        None
    };

    Ok(Roots {
        repo_root,
        context_root,
    })
}

/// The repository root from a flag or configuration; it must be a directory.
pub(super) fn require_repo_root(flag: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let repo_root = flag
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.repo_root.clone());
    if !repo_root.is_dir() {
        return Err(RunbookError::UserError(format!(
            "repository root '{}' does not exist",
            repo_root.display()
        )));
    }
    Ok(repo_root)
}
