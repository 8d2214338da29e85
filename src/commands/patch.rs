//! Implementation of the `runbook diff` and `runbook extract` commands.

use super::roots::require_repo_root;
use crate::cli::{DiffArgs, ExtractArgs};
use crate::config::Config;
use crate::diff::{PatchSynthesizer, extract_files, summarize};
use crate::error::{Result, RunbookError};
use std::path::Path;

/// Execute the `runbook diff` command.
pub fn cmd_diff(args: DiffArgs, config: &Config) -> Result<()> {
    let repo_root = require_repo_root(args.repo_root.as_deref(), config)?;
    let new_content = read_input(&args.new)?;
    let old_content = args.old.as_deref().map(read_input).transpose()?;

    let patch = PatchSynthesizer::new(repo_root).generate(
        &args.path,
        &new_content,
        old_content.as_deref(),
    )?;
    print!("{}", patch);
    Ok(())
}

/// Execute the `runbook extract` command.
///
/// A reply with no file blocks is a user error rather than an empty patch.
pub fn cmd_extract(args: ExtractArgs, config: &Config) -> Result<()> {
    let repo_root = require_repo_root(args.repo_root.as_deref(), config)?;
    let response = read_input(&args.response)?;

    let patch = extract_patch(&repo_root, &response)?;
    print!("{}", patch);
    Ok(())
}

pub(super) fn extract_patch(repo_root: &Path, response: &str) -> Result<String> {
    let files = extract_files(response);
    if files.is_empty() {
        return Err(RunbookError::UserError(
            "response contains no ---FILE:<path>--- ... ---END--- blocks".to_string(),
        ));
    }

    let patch = PatchSynthesizer::new(repo_root).generate_all(&files)?;
    tracing::info!(summary = %summarize(&patch), "Synthesized patch from file blocks");
    Ok(patch)
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        RunbookError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })
}
