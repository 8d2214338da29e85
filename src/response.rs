//! Backend reply parsing.
//!
//! A reply must contain `---COMMIT_MSG---` followed, strictly later, by
//! `---PATCH---`. The commit message is the text between the two markers and
//! the patch is everything after the second, both trimmed. Parsing is
//! all-or-nothing and the patch text is not checked any further.

use crate::error::{ResponseDefect, Result};

/// Marker that opens the commit message block.
pub const COMMIT_MSG_MARKER: &str = "---COMMIT_MSG---";

/// Marker that opens the patch block.
pub const PATCH_MARKER: &str = "---PATCH---";

/// A successfully parsed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub commit_message: String,
    pub patch: String,
}

impl ParsedResponse {
    /// Render back into the marker grammar, as printed by the CLI.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            COMMIT_MSG_MARKER, self.commit_message, PATCH_MARKER, self.patch
        )
    }
}

/// Split a raw reply into commit message and patch.
///
/// # Examples
///
/// ```
/// use runbook::response::parse_response;
///
/// let parsed = parse_response("---COMMIT_MSG---\nfeat: x\n---PATCH---\ndiff --git a/x b/x\n").unwrap();
/// assert_eq!(parsed.commit_message, "feat: x");
/// assert_eq!(parsed.patch, "diff --git a/x b/x");
/// ```
pub fn parse_response(response: &str) -> Result<ParsedResponse> {
    let (Some(commit_start), Some(patch_start)) =
        (response.find(COMMIT_MSG_MARKER), response.find(PATCH_MARKER))
    else {
        return Err(ResponseDefect::MissingMarkers.into());
    };

    let message_start = commit_start + COMMIT_MSG_MARKER.len();
    if patch_start < message_start {
        return Err(ResponseDefect::WrongOrder.into());
    }

    Ok(ParsedResponse {
        commit_message: response[message_start..patch_start].trim().to_string(),
        patch: response[patch_start + PATCH_MARKER.len()..].trim().to_string(),
    })
}
