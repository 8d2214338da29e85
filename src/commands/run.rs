//! Implementation of the `runbook run` and `runbook prompt` commands.

use super::roots::resolve_roots;
use crate::backend::{NullBackend, create_backend};
use crate::cli::TaskArgs;
use crate::config::Config;
use crate::error::Result;
use crate::executor::{Executor, TaskRequest};
use crate::prompt::PromptPair;
use crate::template::VariableBinding;

/// Execute the `runbook run` command.
///
/// Runs the full pipeline and prints the commit message and patch in the
/// marker layout.
pub fn cmd_run(args: TaskArgs, config: &Config) -> Result<()> {
    let request = build_request(&args, config)?;
    let backend = create_backend(config)?;
    let executor = Executor::from_config(backend, config);

    let parsed = executor.execute(&request)?;
    println!("{}", parsed.render());
    Ok(())
}

/// Execute the `runbook prompt` command.
///
/// Resolves the task and its context and prints both prompts. No backend is
/// constructed.
pub fn cmd_prompt(args: TaskArgs, config: &Config) -> Result<()> {
    let request = build_request(&args, config)?;
    let executor = Executor::from_config(NullBackend, config);

    let prompts = executor.prepare(&request)?;
    print!("{}", render_prompts(&prompts));
    Ok(())
}

pub(super) fn build_request(args: &TaskArgs, config: &Config) -> Result<TaskRequest> {
    let roots = resolve_roots(&args.roots, config)?;
    let variables: VariableBinding = args.vars.iter().cloned().collect();

    let mut request = TaskRequest::new(roots.repo_root, args.task.as_str()).with_variables(variables);
    request.context_root = roots.context_root;
    Ok(request)
}

pub(super) fn render_prompts(prompts: &PromptPair) -> String {
    let rule = "=".repeat(80);
    format!(
        "{rule}\nSYSTEM PROMPT\n{rule}\n{}\n\n{rule}\nUSER PROMPT\n{rule}\n{}\n",
        prompts.system, prompts.user
    )
}
