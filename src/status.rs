//! The `Status::` line in a project body.

use crate::model::ProjectStatus;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static STATUS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Status::[^\r\n]*").expect("status line pattern is valid"));

/// Outcome of rewriting the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRewrite {
    pub content: String,
    /// False when the body had no `Status::` line; `content` is then unchanged.
    pub found: bool,
}

/// Replace the first `Status::` line with `Status:: #<status>`.
pub fn rewrite_status(content: &str, status: ProjectStatus) -> StatusRewrite {
    let line = status.line();
    match STATUS_LINE.replace(content, regex::NoExpand(&line)) {
        Cow::Borrowed(_) => StatusRewrite {
            content: content.to_string(),
            found: false,
        },
        Cow::Owned(content) => StatusRewrite {
            content,
            found: true,
        },
    }
}

/// Current status, if the body has a recognizable status line.
pub fn read_status(content: &str) -> Option<ProjectStatus> {
    let line = STATUS_LINE.find(content)?.as_str();
    line.trim_start_matches("Status::")
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
}
