//! GitHub REST API access
//!
//! This module wraps the GitHub commit/issue endpoints behind a single
//! client with a uniform rate-limit/retry contract. Uses ureq (sync
//! HTTP); the pipeline is sequential and blocking by design, no async
//! runtime needed.
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN`: required; injected via [`crate::config::Config`]

mod client;

pub use client::GithubClient;

use crate::models::{CommitDetail, IssueText};
use thiserror::Error;

/// Errors surfaced by the GitHub client.
///
/// Rate limiting (403) never appears here: the client absorbs it by
/// blocking for the configured cool-down and retrying the same request.
#[derive(Error, Debug)]
pub enum GithubError {
    #[error("{what} not found in {repo}")]
    NotFound { repo: String, what: String },

    #[error("401 Unauthorized: check your GitHub token! {0}")]
    Unauthorized(String),

    #[error("422 Unprocessable Entity: {0}")]
    Unprocessable(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to parse API response: {0}")]
    Parse(String),
}

impl GithubError {
    /// Whether a caller should skip this item and keep going (missing or
    /// unprocessable resource) rather than abort the run.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            GithubError::NotFound { .. } | GithubError::Unprocessable(_)
        )
    }
}

pub type GithubResult<T> = Result<T, GithubError>;

/// The commit-repository contract the mining components depend on.
///
/// [`GithubClient`] is the production implementation; tests substitute an
/// in-memory fake.
pub trait CommitSource {
    /// Look up one commit with its message, author date, and file list.
    fn fetch_commit(&self, repo: &str, sha: &str) -> GithubResult<CommitDetail>;

    /// List commits of the default branch, newest first. An empty page
    /// means the listing is exhausted.
    fn list_commits(&self, repo: &str, page: u32, per_page: u32)
        -> GithubResult<Vec<CommitDetail>>;

    /// Look up an issue or pull request by number.
    fn fetch_issue(&self, repo: &str, number: u64) -> GithubResult<IssueText>;

    /// Bytes of code written in `language`, per the repository language
    /// listing. Returns 0 when the language is absent.
    fn fetch_language_loc(&self, repo: &str, language: &str) -> GithubResult<u64>;
}
