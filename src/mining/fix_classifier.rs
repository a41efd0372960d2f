//! Generic bug-fix classification
//!
//! A coarse keyword-membership test: does a commit message read like a
//! defect fix at all? Intentionally looser than the taxonomy classifier;
//! it only validates that a referenced commit is fix-shaped, it does not
//! categorize the defect.

/// Fix-indicating terms and phrases, matched case-insensitively as plain
/// substrings. Leading/trailing spaces are part of the keyword and serve
/// as crude word boundaries.
const FIX_KEYWORDS: &[&str] = &[
    "fixed ",
    " bug",
    "fixes ",
    "fix ",
    " fix",
    " fixed",
    " fixes",
    "crash",
    "solves",
    " resolves",
    "resolves ",
    " issue",
    "issue ",
    "regression",
    "fall back",
    "assertion",
    "coverity",
    "reproducible",
    "stack-wanted",
    "steps-wanted",
    "testcase",
    "failur",
    "fail",
    "npe ",
    " npe",
    "except",
    "broken",
    "differential testing",
    "error",
    "hang ",
    " hang",
    "test fix",
    "steps to reproduce",
    "failure",
    "leak",
    "stack trace",
    "heap overflow",
    "freez",
    "problem ",
    " problem",
    " overflow",
    "overflow ",
    "avoid ",
    " avoid",
    "workaround ",
    " workaround",
    "break ",
    " break",
    " stop",
    "stop ",
];

/// Whether a commit message reads like a bug fix. Presence of any one
/// keyword is sufficient; there is no ranking or match counting.
pub fn looks_like_bug_fix(message: &str) -> bool {
    let lower = message.to_lowercase();
    FIX_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
