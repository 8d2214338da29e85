//! Patch primitives for runbook.
//!
//! This module provides:
//! - Unified diff synthesis with git-style headers, for callers that build
//!   patches from explicit old/new content instead of receiving them
//! - Extraction of `---FILE:<path>---` ... `---END---` blocks from a reply
//! - A summary of which files a patch touches, used for logging
//!
//! Synthesized diffs carry a placeholder `index` line for modified files;
//! they are shaped like `git diff` output but do not carry real blob hashes.

mod blocks;
mod helpers;
mod summary;
mod synth;


// Re-export public API
pub use blocks::extract_files;
pub use summary::{PatchSummary, summarize};
pub use synth::{INDEX_PLACEHOLDER, NEW_FILE_MODE, PatchSynthesizer, unified_diff};
