//! Structural filtering of regression triples
//!
//! Large multi-file commits are poor candidates for precise fault
//! attribution, so the filter keeps only chains where both commits touch
//! at least one tracked source file and stay under a changed-line budget.
//! Trades recall for precision.

use crate::github::CommitSource;
use crate::models::{CommitDetail, RegressionTriple};
use anyhow::Result;
use tracing::info;

pub struct StructuralFilter<'a> {
    source: &'a dyn CommitSource,
    tracked_extension: String,
    max_changes: u32,
}

impl<'a> StructuralFilter<'a> {
    pub fn new(source: &'a dyn CommitSource, tracked_extension: &str, max_changes: u32) -> Self {
        Self {
            source,
            tracked_extension: tracked_extension.to_string(),
            max_changes,
        }
    }

    /// Whether a triple passes the structural constraints. Pure predicate
    /// over the fetched commit details; re-applying to an accepted triple
    /// accepts it again.
    pub fn admit(&self, triple: &RegressionTriple) -> Result<bool> {
        if triple.bic_sha.is_empty() || triple.bfc_sha.is_empty() {
            info!("{}: missing BIC or BFC sha", triple.repo);
            return Ok(false);
        }

        let Some(bic) = self.fetch(&triple.repo, &triple.bic_sha)? else {
            return Ok(false);
        };
        if !self.check_commit(&bic, "BIC") {
            return Ok(false);
        }

        let Some(bfc) = self.fetch(&triple.repo, &triple.bfc_sha)? else {
            return Ok(false);
        };
        if !self.check_commit(&bfc, "BFC") {
            return Ok(false);
        }

        Ok(true)
    }

    fn fetch(&self, repo: &str, sha: &str) -> Result<Option<CommitDetail>> {
        match self.source.fetch_commit(repo, sha) {
            Ok(detail) => Ok(Some(detail)),
            Err(e) if e.is_skip() => {
                info!("Skipping {} {}: {}", repo, sha, e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn check_commit(&self, commit: &CommitDetail, role: &str) -> bool {
        if commit.tracked_files(&self.tracked_extension).count() == 0 {
            info!(
                "{}: {} {} does not touch any {} files",
                commit.repo, role, commit.sha, self.tracked_extension
            );
            return false;
        }
        // Budget counts all changed lines of the commit, not only tracked files
        let changes = commit.total_changes();
        if changes > self.max_changes {
            info!(
                "{}: {} {} has {} changed lines (limit {})",
                commit.repo, role, commit.sha, changes, self.max_changes
            );
            return false;
        }
        true
    }
}
