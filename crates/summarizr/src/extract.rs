//! Trigger detection and inline-summary extraction.
//!
//! The anchor comment is the most recent comment whose body starts with the
//! trigger token. If its body also carries a human-authored
//! `Problem:`/`Solution:` block, the run persists that block directly and the
//! model is never called.

use std::sync::OnceLock;

use regex::Regex;

use crate::IssueComment;

/// Literal token a comment body must start with to trigger a run.
pub const TRIGGER: &str = "/summarizr";

/// A human-authored summary extracted from the anchor comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSummary {
    /// Text between the `Problem:` label and the next blank line.
    pub problem: String,
    /// Everything after the `Solution:` label to the end of the body.
    pub solution: String,
}

// Case-insensitive; `.` spans newlines. Each label tolerates an optional
// trailing `s` and 0-1 extra newline. The problem segment is matched lazily
// up to the next blank line, the solution segment takes the remainder.
fn summary_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)problems?:\n\n?(.+?)\n\nsolutions?:\n\n?(.+)")
            .expect("summary pattern is valid")
    })
}

/// Finds the anchor comment: the most recent comment starting with
/// [`TRIGGER`]. Returns `None` when the thread holds no trigger comment.
pub fn find_anchor(comments: &[IssueComment]) -> Option<&IssueComment> {
    comments
        .iter()
        .filter(|comment| comment.text().starts_with(TRIGGER))
        .max_by_key(|comment| comment.created_at)
}

/// Extracts the inline `Problem:`/`Solution:` block from an anchor body.
///
/// Returns `None` when the body does not carry the block, which routes the
/// run onto the model fallback path.
pub fn extract_summary(body: &str) -> Option<InlineSummary> {
    let captures = summary_pattern().captures(body)?;
    Some(InlineSummary {
        problem: captures[1].to_string(),
        solution: captures[2].to_string(),
    })
}
