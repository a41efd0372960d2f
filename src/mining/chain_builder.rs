//! Regression chain assembly
//!
//! Walks a repository's commit listing page by page, looking for commits
//! whose messages reference the commit that introduced the bug they fix.
//! Each candidate reference is validated by fetching the referenced
//! commit and checking that its message reads like a bug fix.

use crate::github::CommitSource;
use crate::mining::{extract_bic_candidate, looks_like_bug_fix};
use crate::models::RegressionTriple;
use anyhow::Result;
use tracing::{info, warn};

pub struct ChainBuilder<'a> {
    source: &'a dyn CommitSource,
    per_page: u32,
    max_chains: usize,
}

impl<'a> ChainBuilder<'a> {
    pub fn new(source: &'a dyn CommitSource, per_page: u32, max_chains: usize) -> Self {
        Self {
            source,
            per_page,
            max_chains,
        }
    }

    /// Scan `repo` for verified regression chains, invoking `sink` for
    /// each accepted triple as it is found. Returns the accepted count.
    ///
    /// Stops as soon as the configured chain cap is reached (mid-page),
    /// or when the commit listing is exhausted (empty page). Discovery is
    /// text-only over listing order; no commit-graph exploration.
    pub fn collect(
        &self,
        repo: &str,
        mut sink: impl FnMut(&RegressionTriple) -> Result<()>,
    ) -> Result<usize> {
        let mut found = 0usize;
        let mut page = 1u32;

        while found < self.max_chains {
            let commits = match self.source.list_commits(repo, page, self.per_page) {
                Ok(commits) => commits,
                Err(e) if e.is_skip() => {
                    warn!("Skipping {}: {}", repo, e);
                    return Ok(found);
                }
                Err(e) => return Err(e.into()),
            };
            if commits.is_empty() {
                break;
            }

            for commit in &commits {
                let Some(bic_sha) = extract_bic_candidate(&commit.message) else {
                    continue;
                };

                let bic = match self.source.fetch_commit(repo, &bic_sha) {
                    Ok(bic) => bic,
                    Err(e) if e.is_skip() => {
                        info!("Skipping candidate {} in {}: {}", bic_sha, repo, e);
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

                if !looks_like_bug_fix(&bic.message) {
                    continue;
                }

                info!(
                    "{}: regression commit {} references fix commit {}",
                    repo, commit.sha, bic_sha
                );
                let triple = RegressionTriple {
                    repo: repo.to_string(),
                    bfc_sha: commit.sha.clone(),
                    bic_sha,
                };
                sink(&triple)?;
                found += 1;
                if found >= self.max_chains {
                    break;
                }
            }

            page += 1;
        }

        Ok(found)
    }
}
