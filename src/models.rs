//! Core data models for regrminer
//!
//! These models are used throughout the codebase for representing
//! commits, regression triples, and classified dataset rows.

use serde::{Deserialize, Serialize};

/// Identity of a commit: `(repository full name, sha)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitRef {
    pub repo: String,
    pub sha: String,
}

/// One file touched by a commit, as reported by the data source.
///
/// `changes` is taken on trust from the source (`additions + deletions`)
/// and not revalidated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
    #[serde(default)]
    pub changes: u32,
}

/// A fetched commit. Immutable once retrieved; the file list reflects
/// exactly what the source reported at fetch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub repo: String,
    pub sha: String,
    pub message: String,
    /// Author date as reported by the source (ISO 8601, e.g. `2023-01-01T00:00:00Z`)
    pub author_date: String,
    #[serde(default)]
    pub files: Vec<FileChange>,
}

impl CommitDetail {
    /// Identity of this commit.
    pub fn commit_ref(&self) -> CommitRef {
        CommitRef {
            repo: self.repo.clone(),
            sha: self.sha.clone(),
        }
    }

    /// Files matching the tracked source-file extension (e.g. `.c`).
    pub fn tracked_files<'a>(&'a self, extension: &'a str) -> impl Iterator<Item = &'a FileChange> {
        self.files.iter().filter(move |f| f.path.ends_with(extension))
    }

    /// Total changed lines (additions + deletions) across all files.
    pub fn total_changes(&self) -> u32 {
        self.files.iter().map(|f| f.changes).sum()
    }
}

/// Title and body of an issue or pull request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueText {
    pub repo: String,
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl IssueText {
    /// Combined text used for classification: `title + "\n" + body`.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

/// A provisional regression link: the fixing commit (BFC) whose message
/// points back at the introducing commit (BIC). Unvalidated until it
/// passes the structural filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionTriple {
    pub repo: String,
    pub bfc_sha: String,
    pub bic_sha: String,
}

/// Fixed taxonomy of memory/logic defect categories.
///
/// A commit may match several categories at once; membership is decided
/// independently per category by the taxonomy classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BugCategory {
    NullPointerDereference,
    Overflow,
    IntegerOverflow,
    UseAfterFree,
    MemoryLeak,
    DoubleFree,
    DivideByZero,
    AddressSanitizerReport,
    GenericMemoryError,
}

impl BugCategory {
    /// All categories in taxonomy declaration order. Classified rows list
    /// matched categories in this order.
    pub const ALL: [BugCategory; 9] = [
        BugCategory::NullPointerDereference,
        BugCategory::Overflow,
        BugCategory::IntegerOverflow,
        BugCategory::UseAfterFree,
        BugCategory::MemoryLeak,
        BugCategory::DoubleFree,
        BugCategory::DivideByZero,
        BugCategory::AddressSanitizerReport,
        BugCategory::GenericMemoryError,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BugCategory::NullPointerDereference => "Null pointer dereference",
            BugCategory::Overflow => "Overflow",
            BugCategory::IntegerOverflow => "Integer overflow/wraparound",
            BugCategory::UseAfterFree => "Use after free",
            BugCategory::MemoryLeak => "Memory leak",
            BugCategory::DoubleFree => "Double free",
            BugCategory::DivideByZero => "Divide by zero",
            BugCategory::AddressSanitizerReport => "AddressSanitizer report",
            BugCategory::GenericMemoryError => "Generic Memory Errors",
        }
    }

    /// Parse a display name back into a category (inverse of [`name`](Self::name)).
    pub fn from_name(name: &str) -> Option<BugCategory> {
        BugCategory::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for BugCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A regression triple whose BIC matched at least one taxonomy category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRegression {
    pub repo: String,
    pub bic_sha: String,
    /// Matched categories in taxonomy declaration order. Never empty:
    /// rows with no matches are dropped, not persisted.
    pub bug_types: Vec<BugCategory>,
}

impl ClassifiedRegression {
    /// Serialized form of `bug_types`: `"; "`-joined display names.
    pub fn bug_types_column(&self) -> String {
        self.bug_types
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Parse a `"; "`-joined `bug_types` column back into categories.
    /// Unknown names are skipped.
    pub fn parse_bug_types(column: &str) -> Vec<BugCategory> {
        column
            .split("; ")
            .filter_map(BugCategory::from_name)
            .collect()
    }
}

/// Lifecycle row for one regression chain: how long the defect lived and
/// how large both commits were.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifecycleRecord {
    pub repo: String,
    /// Whole days between BIC and BFC author dates (0 if either date is unparsable)
    pub fix_period: i64,
    pub bic_sha: String,
    pub bic_time: String,
    pub bic_files_count: usize,
    pub bic_file_changes: u32,
    pub bfc_sha: String,
    pub bfc_time: String,
    pub bfc_files_count: usize,
    pub bfc_file_changes: u32,
    /// Bytes of tracked-language code in the repository, per the source's language listing
    pub loc: u64,
}
