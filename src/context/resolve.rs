//! Per-spec resolution against a root directory.

use super::{ResolvedContext, Source};
use crate::error::{MissingSpec, Result, RunbookError};
use crate::template::VariableBinding;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a single spec resolved to.
#[derive(Debug)]
enum Outcome {
    File { key: String, path: PathBuf },
    Directory { path: PathBuf },
    Missing(MissingSpec),
}

/// Resolve every spec, then read all of them or fail listing every miss.
pub(super) fn resolve_specs(
    source: Source,
    root: &Path,
    specs: &[String],
    variables: Option<&VariableBinding>,
) -> Result<ResolvedContext> {
    let outcomes: Vec<Outcome> = specs
        .iter()
        .map(|spec| classify(source, root, spec, variables))
        .collect();

    let missing: Vec<MissingSpec> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            Outcome::Missing(miss) => Some(miss.clone()),
            _ => None,
        })
        .collect();

    if !missing.is_empty() {
        return Err(source.missing_error(missing));
    }

    let mut resolved = ResolvedContext::new();
    for outcome in outcomes {
        match outcome {
            Outcome::File { key, path } => {
                resolved.insert(key, read(&path)?);
            }
            Outcome::Directory { path } => read_directory(source, root, &path, &mut resolved)?,
            Outcome::Missing(_) => {}
        }
    }

    Ok(resolved)
}

fn classify(
    source: Source,
    root: &Path,
    spec: &str,
    variables: Option<&VariableBinding>,
) -> Outcome {
    let spec = match variables {
        Some(vars) => vars.substitute(spec),
        None => spec.to_string(),
    };
    let path = root.join(spec.trim_start_matches('/'));

    if path.is_file() {
        Outcome::File {
            key: source.key(&spec),
            path,
        }
    } else if path.is_dir() {
        Outcome::Directory { path }
    } else {
        Outcome::Missing(MissingSpec {
            spec,
            resolved: path,
        })
    }
}

fn read_directory(
    source: Source,
    root: &Path,
    dir: &Path,
    resolved: &mut ResolvedContext,
) -> Result<()> {
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                tracing::warn!(
                    path = %e.path().unwrap_or(dir).display(),
                    "skipping symlink loop"
                );
                continue;
            }
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                return Err(RunbookError::io(path, e.into()));
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let key = source.key(&normalize_path(relative));
        resolved.insert(key, read(entry.path())?);
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| RunbookError::io(path, e))
}

/// Render a relative path with forward slashes regardless of platform.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
