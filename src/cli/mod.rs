//! CLI argument parsing for runbook.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Runbook: resolve a task definition into prompts, call a text-generation
/// backend, and turn its reply into a commit message and a patch.
///
/// Tasks live under `tasks/<name>.md` in the repository or the context root;
/// the repository copy wins when both exist.
#[derive(Parser, Debug)]
#[command(name = "runbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for runbook.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a task and print the commit message and patch.
    ///
    /// Output uses the `---COMMIT_MSG---` / `---PATCH---` marker layout.
    Run(TaskArgs),

    /// Print the assembled system and user prompts without calling a backend.
    Prompt(TaskArgs),

    /// List the tasks available from the repository and context roots.
    Tasks(RootArgs),

    /// Print a unified diff that turns a repository file into new content.
    Diff(DiffArgs),

    /// Turn `---FILE:<path>---` blocks from a reply into a patch.
    Extract(ExtractArgs),
}

/// Repository and context root selection.
///
/// When a flag is omitted the `REPO_ROOT` / `CONTEXT_ROOT` configuration
/// applies.
#[derive(Args, Debug, Clone, Default)]
pub struct RootArgs {
    /// Repository root.
    #[arg(long, value_name = "PATH")]
    pub repo_root: Option<PathBuf>,

    /// Context root holding shared tasks and reference documents.
    #[arg(long, value_name = "PATH")]
    pub context_root: Option<PathBuf>,
}

/// Arguments for the `run` and `prompt` commands.
#[derive(Args, Debug)]
pub struct TaskArgs {
    /// Task name (file stem under `tasks/`).
    #[arg(long, env = "TASK_NAME")]
    pub task: String,

    #[command(flatten)]
    pub roots: RootArgs,

    /// Explicit placeholder value as NAME=VALUE (repeatable). Overrides
    /// values taken from the task's required environment variables.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,
}

/// Arguments for the `diff` command.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Repository-relative path the diff applies to.
    #[arg(long)]
    pub path: String,

    /// File holding the new content.
    #[arg(long, value_name = "FILE")]
    pub new: PathBuf,

    /// File holding the old content. Defaults to the current repository file.
    #[arg(long, value_name = "FILE")]
    pub old: Option<PathBuf>,

    /// Repository root.
    #[arg(long, value_name = "PATH")]
    pub repo_root: Option<PathBuf>,
}

/// Arguments for the `extract` command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// File holding the backend reply.
    #[arg(long, value_name = "FILE")]
    pub response: PathBuf,

    /// Repository root.
    #[arg(long, value_name = "PATH")]
    pub repo_root: Option<PathBuf>,
}

/// Parse a `NAME=VALUE` pair. The value may itself contain `=`.
fn parse_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
