//! GitHub REST client
//!
//! Sync HTTP via ureq. Status contract: 404 → not-found (terminal per
//! call), 403 → rate-limited (block for the cool-down, retry the same
//! request), 401 → fatal, 422 → unprocessable (skip), 202 on the stats
//! endpoint → not-yet-ready (bounded retry).

use crate::config::Config;
use crate::github::{CommitSource, GithubError, GithubResult};
use crate::models::{CommitDetail, FileChange, IssueText};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("regrminer/", env!("CARGO_PKG_VERSION"));

/// GitHub API client: sync HTTP via ureq, retry handled internally
pub struct GithubClient {
    token: String,
    cooldown: Duration,
    stats_retry_pause: Duration,
    stats_max_attempts: u32,
    agent: ureq::Agent,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // We handle status codes ourselves
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .new_agent()
}

impl GithubClient {
    pub fn new(config: &Config) -> Self {
        Self {
            token: config.token.clone(),
            cooldown: config.rate_limit_cooldown,
            stats_retry_pause: config.stats_retry_pause,
            stats_max_attempts: config.stats_max_attempts,
            agent: make_agent(),
        }
    }

    /// GET a JSON resource, absorbing rate limits with a blocking
    /// retry loop. Never recurses.
    fn get_json<T: DeserializeOwned>(
        &self,
        repo: &str,
        what: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> GithubResult<T> {
        loop {
            let mut req = self
                .agent
                .get(url)
                .header("Authorization", &format!("token {}", self.token))
                .header("Accept", "application/vnd.github+json")
                .header("User-Agent", USER_AGENT);
            for (key, value) in query {
                req = req.query(*key, value);
            }

            let response = req
                .call()
                .map_err(|e| GithubError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            match status {
                403 => {
                    warn!(
                        "Rate limit hit, waiting {}s before retrying {}",
                        self.cooldown.as_secs(),
                        url
                    );
                    std::thread::sleep(self.cooldown);
                    continue;
                }
                404 => {
                    return Err(GithubError::NotFound {
                        repo: repo.to_string(),
                        what: what.to_string(),
                    });
                }
                401 => {
                    let body = response.into_body().read_to_string().unwrap_or_default();
                    return Err(GithubError::Unauthorized(body));
                }
                422 => {
                    let body = response.into_body().read_to_string().unwrap_or_default();
                    return Err(GithubError::Unprocessable(body));
                }
                s if s >= 400 => {
                    let body = response.into_body().read_to_string().unwrap_or_default();
                    return Err(GithubError::Transport(format!("status {}: {}", s, body)));
                }
                _ => {
                    return response
                        .into_body()
                        .read_json()
                        .map_err(|e| GithubError::Parse(e.to_string()));
                }
            }
        }
    }

    /// Total commit count via the contributor-stats endpoint.
    ///
    /// 202 means GitHub is still generating stats; retried up to the
    /// configured attempt cap, then `None`. A 403 here is treated as a
    /// skip (`None`), not an unbounded wait; this endpoint only feeds
    /// catalog filtering, never the mining loop.
    pub fn fetch_commit_count(&self, repo: &str) -> GithubResult<Option<u64>> {
        let url = format!("{}/repos/{}/stats/contributors", API_ROOT, repo);

        for attempt in 1..=self.stats_max_attempts {
            let response = self
                .agent
                .get(&url)
                .header("Authorization", &format!("token {}", self.token))
                .header("Accept", "application/vnd.github+json")
                .header("User-Agent", USER_AGENT)
                .call()
                .map_err(|e| GithubError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            match status {
                202 => {
                    warn!(
                        "GitHub is still processing stats for {}, attempt #{}",
                        repo, attempt
                    );
                    if attempt < self.stats_max_attempts {
                        std::thread::sleep(self.stats_retry_pause);
                    }
                    continue;
                }
                403 => {
                    warn!("Skipping {} stats due to rate limits or permission", repo);
                    return Ok(None);
                }
                404 => {
                    return Err(GithubError::NotFound {
                        repo: repo.to_string(),
                        what: "contributor stats".to_string(),
                    });
                }
                s if s >= 400 => {
                    let body = response.into_body().read_to_string().unwrap_or_default();
                    return Err(GithubError::Transport(format!("status {}: {}", s, body)));
                }
                _ => {
                    let contributors: Vec<ContributorEntry> = response
                        .into_body()
                        .read_json()
                        .map_err(|e| GithubError::Parse(e.to_string()))?;
                    if contributors.is_empty() {
                        warn!("No commit data for {}", repo);
                        return Ok(None);
                    }
                    return Ok(Some(contributors.iter().map(|c| c.total).sum()));
                }
            }
        }

        warn!(
            "Stats not ready after {} attempts for {}, skipping",
            self.stats_max_attempts, repo
        );
        Ok(None)
    }
}

impl CommitSource for GithubClient {
    fn fetch_commit(&self, repo: &str, sha: &str) -> GithubResult<CommitDetail> {
        // Short SHAs rarely resolve against the remote; skip the round trip
        if sha.len() < 7 {
            warn!("Commit hash '{}' seems invalid, skipping", sha);
            return Err(GithubError::NotFound {
                repo: repo.to_string(),
                what: format!("commit {}", sha),
            });
        }

        let url = format!("{}/repos/{}/commits/{}", API_ROOT, repo, sha);
        let raw: RawCommit = self.get_json(repo, &format!("commit {}", sha), &url, &[])?;
        debug!("Fetched commit {} from {}", sha, repo);
        Ok(raw.into_detail(repo))
    }

    fn list_commits(
        &self,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> GithubResult<Vec<CommitDetail>> {
        let url = format!("{}/repos/{}/commits", API_ROOT, repo);
        let query = [
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        let raw: Vec<RawCommit> = self.get_json(repo, "commit listing", &url, &query)?;
        debug!("Listed {} commits from {} page {}", raw.len(), repo, page);
        Ok(raw.into_iter().map(|c| c.into_detail(repo)).collect())
    }

    fn fetch_issue(&self, repo: &str, number: u64) -> GithubResult<IssueText> {
        let url = format!("{}/repos/{}/issues/{}", API_ROOT, repo, number);
        let raw: RawIssue = self.get_json(repo, &format!("issue #{}", number), &url, &[])?;
        Ok(IssueText {
            repo: repo.to_string(),
            number,
            title: raw.title.unwrap_or_default(),
            body: raw.body.unwrap_or_default(),
        })
    }

    fn fetch_language_loc(&self, repo: &str, language: &str) -> GithubResult<u64> {
        let url = format!("{}/repos/{}/languages", API_ROOT, repo);
        let languages: std::collections::HashMap<String, u64> =
            self.get_json(repo, "language listing", &url, &[])?;
        Ok(languages.get(language).copied().unwrap_or(0))
    }
}

// GitHub API wire types

#[derive(Deserialize)]
struct RawCommit {
    sha: String,
    commit: RawCommitNode,
    #[serde(default)]
    files: Vec<RawFile>,
}

#[derive(Deserialize)]
struct RawCommitNode {
    #[serde(default)]
    message: String,
    author: Option<RawAuthor>,
}

#[derive(Deserialize)]
struct RawAuthor {
    #[serde(default)]
    date: String,
}

#[derive(Deserialize)]
struct RawFile {
    filename: String,
    #[serde(default)]
    additions: u32,
    #[serde(default)]
    deletions: u32,
    #[serde(default)]
    changes: u32,
}

#[derive(Deserialize)]
struct RawIssue {
    title: Option<String>,
    body: Option<String>,
}

#[derive(Deserialize)]
struct ContributorEntry {
    total: u64,
}

impl RawCommit {
    fn into_detail(self, repo: &str) -> CommitDetail {
        CommitDetail {
            repo: repo.to_string(),
            sha: self.sha,
            message: self.commit.message,
            author_date: self.commit.author.map(|a| a.date).unwrap_or_default(),
            files: self
                .files
                .into_iter()
                .map(|f| FileChange {
                    path: f.filename,
                    additions: f.additions,
                    deletions: f.deletions,
                    changes: f.changes,
                })
                .collect(),
        }
    }
}
