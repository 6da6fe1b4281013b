//! Title normalization for matching expected answers against search results
//!
//! Search results often carry a suffix after a `|` separator (site name,
//! section) and differ from the expected title in spacing or case. Both sides
//! are normalized before comparison.

use regex::Regex;
use std::sync::LazyLock;

// Compile-time constant patterns, so initialization cannot fail in practice
static AFTER_PIPE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\|.*$").ok());
static INLINE_SPACE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[ \t]").ok());

/// Remove everything from the first `|` on the last line onwards
///
/// A pipe on an earlier line of a multi-line title is left in place.
pub fn strip_after_pipe(text: &str) -> String {
    match *AFTER_PIPE_PATTERN {
        Some(ref pattern) => pattern.replace(text, "").into_owned(),
        None => {
            let last_line = text.rfind('\n').map_or(0, |i| i + 1);
            match text[last_line..].find('|') {
                Some(i) => text[..last_line + i].to_string(),
                None => text.to_string(),
            }
        }
    }
}

/// Canonical form of a title: pipe suffix removed, spaces and tabs removed, lowercased
pub fn normalize_title(text: &str) -> String {
    let stripped = strip_after_pipe(text);
    let compact = match *INLINE_SPACE_PATTERN {
        Some(ref pattern) => pattern.replace_all(&stripped, "").into_owned(),
        None => stripped.replace([' ', '\t'], ""),
    };
    compact.to_lowercase()
}
