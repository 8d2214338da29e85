//! Implementation of the `runbook tasks` command.

use super::roots::resolve_roots;
use crate::cli::RootArgs;
use crate::config::Config;
use crate::error::Result;
use crate::repo::list_files;
use crate::task::{TASK_EXTENSION, TASKS_DIR};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Which root supplies a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrigin {
    Repo,
    Context,
}

impl fmt::Display for TaskOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOrigin::Repo => f.write_str("repo"),
            TaskOrigin::Context => f.write_str("context"),
        }
    }
}

/// One available task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListing {
    pub name: String,
    pub origin: TaskOrigin,
    /// A context task of the same name is hidden by this one.
    pub overrides: bool,
}

/// Execute the `runbook tasks` command.
pub fn cmd_tasks(args: RootArgs, config: &Config) -> Result<()> {
    let roots = resolve_roots(&args, config)?;
    let listings = list_tasks(&roots.repo_root, roots.context_root.as_deref());

    if listings.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }
    for listing in listings {
        let note = if listing.overrides { " (overrides context)" } else { "" };
        println!("{:<32} {}{}", listing.name, listing.origin, note);
    }
    Ok(())
}

/// Every task name available from the two roots, sorted by name.
///
/// A repository task shadows a context task with the same name.
pub fn list_tasks(repo_root: &Path, context_root: Option<&Path>) -> Vec<TaskListing> {
    let mut tasks: BTreeMap<String, TaskListing> = BTreeMap::new();

    if let Some(context_root) = context_root {
        for name in task_names(context_root) {
            tasks.insert(
                name.clone(),
                TaskListing {
                    name,
                    origin: TaskOrigin::Context,
                    overrides: false,
                },
            );
        }
    }

    for name in task_names(repo_root) {
        let overrides = tasks.contains_key(&name);
        tasks.insert(
            name.clone(),
            TaskListing {
                name,
                origin: TaskOrigin::Repo,
                overrides,
            },
        );
    }

    tasks.into_values().collect()
}

fn task_names(root: &Path) -> Vec<String> {
    let suffix = format!(".{}", TASK_EXTENSION);
    let prefix = format!("{}/", TASKS_DIR);
    list_files(root, TASKS_DIR, Some(&suffix))
        .into_iter()
        .filter_map(|path| {
            path.strip_prefix(&prefix)?
                .strip_suffix(&suffix)
                .map(str::to_string)
        })
        .collect()
}
