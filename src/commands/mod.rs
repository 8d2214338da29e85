//! Command implementations for runbook.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Commands print their result to stdout; logging goes to
//! stderr.

mod patch;
mod roots;
mod run;
mod tasks;


use crate::cli::Command;
use crate::config::Config;
use crate::error::Result;

pub use roots::{Roots, resolve_roots};
pub use tasks::{TaskListing, TaskOrigin, list_tasks};

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args, config),
        Command::Prompt(args) => run::cmd_prompt(args, config),
        Command::Tasks(args) => tasks::cmd_tasks(args, config),
        Command::Diff(args) => patch::cmd_diff(args, config),
        Command::Extract(args) => patch::cmd_extract(args, config),
    }
}
