//! Patch summaries for logging.

use super::helpers::parse_diff_git_line;
use std::fmt;

/// Files touched by a patch and its line counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSummary {
    pub files: Vec<String>,
    pub added: usize,
    pub removed: usize,
}

impl fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s), +{} -{}",
            self.files.len(),
            self.added,
            self.removed
        )
    }
}

/// Summarize a unified diff.
///
/// Only lines inside hunks are counted, so `---`/`+++` headers never count as
/// removals or additions. Text that is not a diff yields an empty summary.
pub fn summarize(patch: &str) -> PatchSummary {
    let mut summary = PatchSummary::default();
    let mut in_hunk = false;

    for line in patch.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            in_hunk = false;
            if let Some(path) = parse_diff_git_line(rest) {
                if !summary.files.contains(&path) {
                    summary.files.push(path);
                }
            }
        } else if line.starts_with("@@") {
            in_hunk = true;
        } else if in_hunk {
            if line.starts_with('+') {
                summary.added += 1;
            } else if line.starts_with('-') {
                summary.removed += 1;
            }
        }
    }

    summary
}
