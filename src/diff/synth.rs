//! Unified diff synthesis.

use super::helpers::{format_range, normalize_path};
use crate::error::{Result, RunbookError};
use indexmap::IndexMap;
use similar::{ChangeTag, DiffTag, TextDiff};
use std::path::{Path, PathBuf};

/// Lines of unchanged context around each hunk.
const CONTEXT_LINES: usize = 3;

/// Mode line written for files that do not exist yet.
pub const NEW_FILE_MODE: &str = "new file mode 100644";

/// Fixed `index` line written for modified files (not a real blob hash).
pub const INDEX_PLACEHOLDER: &str = "index 0000000..1234567";

/// Builds patches against the current contents of a repository.
#[derive(Debug, Clone)]
pub struct PatchSynthesizer {
    repo_root: PathBuf,
}

impl PatchSynthesizer {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Generate a patch that turns `file_path` into `new_content`.
    ///
    /// When `old_content` is `None` the current file is read; a file that does
    /// not exist is treated as empty and the patch creates it. The `/dev/null`
    /// source label is used whenever the file does not exist on disk, even if
    /// `old_content` is supplied.
    pub fn generate(
        &self,
        file_path: &str,
        new_content: &str,
        old_content: Option<&str>,
    ) -> Result<String> {
        let relative = normalize_path(file_path);
        let full_path = self.repo_root.join(&relative);
        let exists = full_path.exists();

        let on_disk;
        let old = match old_content {
            Some(old) => old,
            None if exists => {
                on_disk = std::fs::read_to_string(&full_path)
                    .map_err(|e| RunbookError::io(&full_path, e))?;
                on_disk.as_str()
            }
            None => "",
        };

        Ok(unified_diff(&relative, old, new_content, !exists))
    }

    /// Generate one patch covering every `(path, new content)` pair, in order.
    pub fn generate_all(&self, files: &IndexMap<String, String>) -> Result<String> {
        let mut patch = String::new();
        for (path, content) in files {
            patch.push_str(&self.generate(path, content, None)?);
        }
        Ok(patch)
    }
}

/// Render a git-style unified diff between `old` and `new` for `path`.
///
/// Line terminators are reproduced exactly; a final line without one is
/// followed by the `\ No newline at end of file` marker. Identical content
/// produces the header only.
pub fn unified_diff(path: &str, old: &str, new: &str, is_new_file: bool) -> String {
    let from = if is_new_file {
        "/dev/null".to_string()
    } else {
        format!("a/{}", path)
    };
    let to = format!("b/{}", path);

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{} b/{}\n", path, path));
    out.push_str(if is_new_file { NEW_FILE_MODE } else { INDEX_PLACEHOLDER });
    out.push('\n');
    out.push_str(&format!("--- {}\n+++ {}\n", from, to));

    let diff = TextDiff::from_lines(old, new);
    for group in diff.grouped_ops(CONTEXT_LINES) {
        if group.iter().all(|op| op.tag() == DiffTag::Equal) {
            continue;
        }
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };

        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(first.old_range().start, last.old_range().end),
            format_range(first.new_range().start, last.new_range().end),
        ));

        for op in &group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Equal => ' ',
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                };
                let line = change.value();
                out.push(sign);
                out.push_str(line);
                if !line.ends_with('\n') {
                    out.push_str("\n\\ No newline at end of file\n");
                }
            }
        }
    }

    out
}
