//! Task lookup and loading.

use super::TaskDefinition;
use crate::error::{Result, RunbookError};
use std::path::{Path, PathBuf};

/// Directory under each root that holds task files.
pub const TASKS_DIR: &str = "tasks";

/// Task file extension (without the dot).
pub const TASK_EXTENSION: &str = "md";

/// Candidate task file locations, in search order.
///
/// The repository root is searched first so that a repository can override
/// a task shared through the context root.
pub fn search_locations(
    repo_root: &Path,
    context_root: Option<&Path>,
    task_name: &str,
) -> Vec<PathBuf> {
    let file_name = format!("{}.{}", task_name, TASK_EXTENSION);
    let mut locations = vec![repo_root.join(TASKS_DIR).join(&file_name)];
    if let Some(context_root) = context_root {
        locations.push(context_root.join(TASKS_DIR).join(&file_name));
    }
    locations
}

impl TaskDefinition {
    /// Resolve a task by name from the repository root, then the context root.
    ///
    /// # Returns
    ///
    /// * `Ok(TaskDefinition)` - Parsed task from the first location that exists
    /// * `Err(RunbookError::TaskNotFound)` - No location holds the task; lists all searched
    /// * `Err(RunbookError::MalformedTask)` - The file was found but could not be parsed
    pub fn resolve(repo_root: &Path, context_root: Option<&Path>, task_name: &str) -> Result<Self> {
        let locations = search_locations(repo_root, context_root, task_name);

        match locations.iter().find(|path| path.is_file()) {
            Some(path) => Self::load(task_name, path),
            None => Err(RunbookError::TaskNotFound {
                task: task_name.to_string(),
                searched: locations,
            }),
        }
    }

    /// Load and parse a task file from disk.
    pub fn load<P: AsRef<Path>>(task_name: &str, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RunbookError::io(path, e))?;

        let mut task = Self::parse(task_name, &content)?;
        task.source = path.to_path_buf();
        Ok(task)
    }
}
