//! Extraction of whole-file blocks from a backend reply.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

static FILE_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)---FILE:(.+?)---\s*(.*?)---END---").expect("Invalid file block regex")
});

/// Extract `---FILE:<path>---` ... `---END---` blocks from `response`.
///
/// Paths and contents are trimmed. A later block for the same path replaces
/// the earlier content but keeps the first position. Text outside blocks is
/// ignored and an unterminated block is dropped.
///
/// # Returns
///
/// Path to content, in order of first appearance.
pub fn extract_files(response: &str) -> IndexMap<String, String> {
    let mut files = IndexMap::new();
    for caps in FILE_BLOCK_REGEX.captures_iter(response) {
        let path = caps[1].trim().to_string();
        let content = caps[2].trim().to_string();
        files.insert(path, content);
    }
    files
}
