//! Regression link extraction
//!
//! Decides whether a commit message textually claims to fix a regression
//! introduced by an earlier commit, and extracts that commit's sha.

use regex::Regex;
use std::sync::OnceLock;

/// Phrases that mark a message as referencing an earlier bug-introducing
/// commit. Checked as plain substrings before the capture regex runs.
const TRIGGER_PHRASES: [&str; 4] = [
    "introduced by",
    "regression by",
    "caused by",
    "regressed by",
];

static LINK_PATTERN: OnceLock<Regex> = OnceLock::new();

fn link_pattern() -> &'static Regex {
    // First match overall wins; alternation is tried in listed order when
    // several trigger phrases start at the same position.
    LINK_PATTERN.get_or_init(|| {
        Regex::new(r"(?:regression by|regressed by|introduced by|caused by)\s*([a-f0-9]+)")
            .unwrap()
    })
}

/// Extract the candidate bug-introducing commit sha from a commit message.
///
/// Returns `None` when no trigger phrase occurs, or when a trigger phrase
/// is present but no hexadecimal token follows it.
pub fn extract_bic_candidate(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    if !TRIGGER_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return None;
    }
    link_pattern()
        .captures(&lower)
        .map(|captures| captures[1].to_string())
}
