//! Prompt assembly.
//!
//! Builds the system prompt and user prompt sent to the completion backend:
//!
//! - **System**: task description, requirements, aggregated context files, and
//!   the fixed output-format block (always last)
//! - **User**: instructions with placeholders substituted, the repository
//!   structure summary, and previews of the task's input files
//!
//! Assembly is deterministic: identical task, context, bindings and
//! repository contents produce byte-identical prompts.

use crate::context::ResolvedContext;
use crate::task::TaskDefinition;
use crate::template::VariableBinding;
use std::path::Path;

mod system;
mod user;

pub use system::{OUTPUT_FORMAT, build_system_prompt};
pub use user::{PREVIEW_CHARS, build_user_prompt, preview};

/// Default depth of the repository structure summary.
pub const DEFAULT_STRUCTURE_DEPTH: usize = 2;

/// The two prompts for one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Builds [`PromptPair`]s for a repository.
#[derive(Debug, Clone)]
pub struct PromptAssembler<'a> {
    repo_root: &'a Path,
    structure_depth: usize,
}

impl<'a> PromptAssembler<'a> {
    pub fn new(repo_root: &'a Path) -> Self {
        Self {
            repo_root,
            structure_depth: DEFAULT_STRUCTURE_DEPTH,
        }
    }

    /// Override how many levels of the repository tree are summarized.
    pub fn with_structure_depth(mut self, depth: usize) -> Self {
        self.structure_depth = depth;
        self
    }

    /// Assemble both prompts.
    pub fn assemble(
        &self,
        task: &TaskDefinition,
        context: &ResolvedContext,
        variables: &VariableBinding,
    ) -> PromptPair {
        PromptPair {
            system: build_system_prompt(task, context),
            user: build_user_prompt(self.repo_root, task, variables, self.structure_depth),
        }
    }
}
