//! Read-only access to the target repository.
//!
//! Provides single-file reads for input previews, file listing, and the
//! bounded-depth structure summary embedded in the user prompt.

use crate::error::{Result, RunbookError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

#[cfg(test)]
mod tests;

/// Name to node (`None` for empty, unreadable, or too-deep directories).
pub type RepoStructure = BTreeMap<String, Option<StructureNode>>;

/// One entry in the repository structure summary.
///
/// Serializes as a bare number for files and a nested object for directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StructureNode {
    /// File size in bytes.
    File(u64),
    /// Non-empty directory.
    Directory(RepoStructure),
}

/// Read a repository file. A leading `/` on `file_path` is ignored.
pub fn read_file(repo_root: &Path, file_path: &str) -> Result<String> {
    let full_path = repo_root.join(file_path.trim_start_matches('/'));
    std::fs::read_to_string(&full_path).map_err(|e| RunbookError::io(full_path, e))
}

/// List repo-relative file paths under `directory`, sorted.
///
/// When `pattern` is given, only files whose name contains it are returned.
/// A directory that does not exist yields an empty list.
pub fn list_files(repo_root: &Path, directory: &str, pattern: Option<&str>) -> Vec<String> {
    let search_dir = repo_root.join(directory.trim_start_matches('/'));
    if !search_dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<String> = WalkDir::new(&search_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            pattern.is_none_or(|p| entry.file_name().to_string_lossy().contains(p))
        })
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(repo_root)
                .ok()
                .map(|rel| rel.to_string_lossy().replace('\\', "/"))
        })
        .collect();

    files.sort();
    files
}

/// Summarize the repository as a tree of at most `max_depth` levels.
///
/// Hidden entries (names starting with `.`) are skipped. Directories deeper
/// than `max_depth`, empty directories, and unreadable directories appear as
/// `None`. A root that cannot be summarized yields an empty map.
pub fn structure(repo_root: &Path, max_depth: usize) -> RepoStructure {
    match build_node(repo_root, 0, max_depth) {
        Some(StructureNode::Directory(tree)) => tree,
        _ => RepoStructure::new(),
    }
}

fn build_node(path: &Path, depth: usize, max_depth: usize) -> Option<StructureNode> {
    if depth > max_depth {
        return None;
    }

    let metadata = std::fs::metadata(path).ok()?;
    if metadata.is_file() {
        return Some(StructureNode::File(metadata.len()));
    }
    if !metadata.is_dir() {
        return None;
    }

    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable directory");
            return None;
        }
    };

    let mut tree = RepoStructure::new();
    for entry in entries.filter_map(|entry| entry.ok()) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let node = build_node(&entry.path(), depth + 1, max_depth);
        tree.insert(name, node);
    }

    if tree.is_empty() {
        None
    } else {
        Some(StructureNode::Directory(tree))
    }
}
