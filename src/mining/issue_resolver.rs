//! Linked-issue resolution
//!
//! Commit messages often carry the real bug report: either a full GitHub
//! issue/PR URL (possibly in another repository) or a closing-keyword
//! reference like `fixes #123` in the same repository. The first such
//! reference is resolved to the issue's text for classification.

use crate::github::{CommitSource, GithubResult};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{info, warn};

static ISSUE_URL_PATTERN: OnceLock<Regex> = OnceLock::new();
static ISSUE_REF_PATTERN: OnceLock<Regex> = OnceLock::new();

fn issue_url_pattern() -> &'static Regex {
    ISSUE_URL_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)https://github\.com/([\w\-_]+)/([\w\-_]+)/(issues|pull)/(\d+)").unwrap()
    })
}

fn issue_ref_pattern() -> &'static Regex {
    ISSUE_REF_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?:fix(?:ed|es)?|close(?:d|s)?|resolve(?:d|s)?)\s*#(\d+)").unwrap()
    })
}

/// Resolve the first issue/PR reference in a commit message to its
/// combined `title + "\n" + body` text.
///
/// An explicit URL wins over a closing-keyword reference; only one
/// reference is ever resolved. Returns an empty string when the message
/// has no reference or the referenced issue is unavailable.
pub fn resolve_linked_issue_text(
    source: &dyn CommitSource,
    repo: &str,
    message: &str,
) -> GithubResult<String> {
    if let Some(captures) = issue_url_pattern().captures(message) {
        let linked_repo = format!("{}/{}", &captures[1], &captures[2]);
        let number: u64 = captures[4].parse().unwrap_or(0);
        info!("Found linked {} #{} in {}", &captures[3], number, linked_repo);
        return fetch_text(source, &linked_repo, number);
    }

    if let Some(captures) = issue_ref_pattern().captures(message) {
        let number: u64 = captures[1].parse().unwrap_or(0);
        return fetch_text(source, repo, number);
    }

    Ok(String::new())
}

fn fetch_text(source: &dyn CommitSource, repo: &str, number: u64) -> GithubResult<String> {
    match source.fetch_issue(repo, number) {
        Ok(issue) => Ok(issue.combined()),
        Err(e) if e.is_skip() => {
            warn!("Could not fetch issue/PR #{} from {}: {}", number, repo, e);
            Ok(String::new())
        }
        Err(e) => Err(e),
    }
}
