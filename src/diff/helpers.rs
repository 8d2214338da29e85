//! Helper functions for patch handling.

/// Parse the file path from a "diff --git" line.
///
/// Handles various formats:
/// - "a/path/to/file b/path/to/file" (normal)
/// - "a/path/to/file b/path/to/renamed" (rename)
///
/// Returns the "b/" path (new file path), or None if parsing fails.
pub(super) fn parse_diff_git_line(rest: &str) -> Option<String> {
    // Paths can contain spaces; " b/" separates the two paths, take the last one.
    if let Some(b_pos) = rest.rfind(" b/") {
        return Some(normalize_path(&rest[b_pos + 3..]));
    }

    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() >= 2 {
        if let Some(path) = parts[parts.len() - 1].strip_prefix("b/") {
            return Some(normalize_path(path));
        }
    }

    None
}

/// Normalize a file path for use in a patch header.
///
/// Backslashes become forward slashes and leading slashes are dropped, so a
/// spec written as `/docs/api.md` yields the repo-relative `docs/api.md`.
pub(super) fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Render a unified diff hunk range the way `diff -u` does.
///
/// A one-line range is just the start line; an empty range points at the
/// line before it.
pub(super) fn format_range(start: usize, end: usize) -> String {
    let len = end - start;
    match len {
        1 => format!("{}", start + 1),
        0 => format!("{},0", start),
        _ => format!("{},{}", start + 1, len),
    }
}
