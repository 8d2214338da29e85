//! User prompt construction.

use crate::repo;
use crate::task::TaskDefinition;
use crate::template::VariableBinding;
use std::path::Path;

/// Maximum characters shown per input preview.
pub const PREVIEW_CHARS: usize = 500;

/// Build the user prompt: instructions, repository structure, input previews.
///
/// Input previews are advisory: a file that cannot be read is logged and
/// skipped.
pub fn build_user_prompt(
    repo_root: &Path,
    task: &TaskDefinition,
    variables: &VariableBinding,
    structure_depth: usize,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    let instructions = variables.substitute(&task.content);
    if !instructions.trim().is_empty() {
        parts.push(format!("Instructions:\n{}", instructions));
    }

    let structure = repo::structure(repo_root, structure_depth);
    if !structure.is_empty() {
        match serde_json::to_string_pretty(&structure) {
            Ok(rendered) => parts.push(format!("\nRepository structure:\n{}", rendered)),
            Err(e) => tracing::warn!(error = %e, "failed to render repository structure"),
        }
    }

    let inputs = task.inputs();
    if !inputs.is_empty() {
        parts.push("\nRelevant repository files:".to_string());
        for file_path in inputs {
            match repo::read_file(repo_root, file_path) {
                Ok(content) => parts.push(format!("\n--- {} ---\n{}", file_path, preview(&content))),
                Err(e) => tracing::warn!(input = %file_path, error = %e, "skipping unreadable input file"),
            }
        }
    }

    parts.join("\n")
}

/// First [`PREVIEW_CHARS`] characters of `content`, with `...` appended when cut.
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
