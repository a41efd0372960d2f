//! Regression lifecycle collection
//!
//! For each filtered chain, records how long the defect lived (whole days
//! between the BIC and BFC author dates) and how large both commits were,
//! plus the repository's tracked-language code size.

use crate::github::CommitSource;
use crate::models::{LifecycleRecord, RegressionTriple};
use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::info;

/// Whole days between two ISO-8601 author timestamps. A trailing `Z` is
/// stripped before parsing; if either date fails to parse, the period
/// stays at its default 0.
pub fn fix_period_days(bic_time: &str, bfc_time: &str) -> i64 {
    let parse = |value: &str| {
        NaiveDateTime::parse_from_str(value.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S").ok()
    };
    match (parse(bic_time), parse(bfc_time)) {
        (Some(bic), Some(bfc)) => (bfc - bic).num_days(),
        _ => 0,
    }
}

/// Assemble the lifecycle row for one triple, or `None` when either
/// commit is unavailable.
pub fn collect_lifecycle(
    source: &dyn CommitSource,
    triple: &RegressionTriple,
    language: &str,
) -> Result<Option<LifecycleRecord>> {
    let bic = match source.fetch_commit(&triple.repo, &triple.bic_sha) {
        Ok(detail) => detail,
        Err(e) if e.is_skip() => {
            info!("Skipping {} {}: {}", triple.repo, triple.bic_sha, e);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let loc = source.fetch_language_loc(&triple.repo, language)?;

    let bfc = match source.fetch_commit(&triple.repo, &triple.bfc_sha) {
        Ok(detail) => detail,
        Err(e) if e.is_skip() => {
            info!("Skipping {} {}: {}", triple.repo, triple.bfc_sha, e);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Some(LifecycleRecord {
        repo: triple.repo.clone(),
        fix_period: fix_period_days(&bic.author_date, &bfc.author_date),
        bic_sha: triple.bic_sha.clone(),
        bic_time: bic.author_date.clone(),
        bic_files_count: bic.files.len(),
        bic_file_changes: bic.total_changes(),
        bfc_sha: triple.bfc_sha.clone(),
        bfc_time: bfc.author_date.clone(),
        bfc_files_count: bfc.files.len(),
        bfc_file_changes: bfc.total_changes(),
        loc,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{GithubError, GithubResult};
    use crate::models::{CommitDetail, FileChange, IssueText};
    use std::collections::HashMap;

    #[test]
    fn test_fix_period_whole_days() {
        assert_eq!(
            fix_period_days("2023-01-01T00:00:00Z", "2023-01-10T00:00:00Z"),
            9
        );
    }

    #[test]
    fn test_fix_period_same_day() {
        assert_eq!(
            fix_period_days("2023-01-01T08:00:00Z", "2023-01-01T20:00:00Z"),
            0
        );
    }

    #[test]
    fn test_fix_period_unparsable_defaults_to_zero() {
        assert_eq!(fix_period_days("not-a-date", "2023-01-10T00:00:00Z"), 0);
        assert_eq!(fix_period_days("2023-01-01T00:00:00Z", ""), 0);
        assert_eq!(fix_period_days("", ""), 0);
    }

    struct FakeSource {
        commits: HashMap<String, CommitDetail>,
        loc: u64,
    }

    impl CommitSource for FakeSource {
        fn fetch_commit(&self, repo: &str, sha: &str) -> GithubResult<CommitDetail> {
            self.commits
                .get(sha)
                .cloned()
                .ok_or_else(|| GithubError::NotFound {
                    repo: repo.to_string(),
                    what: format!("commit {}", sha),
                })
        }
        fn list_commits(
            &self,
            _repo: &str,
            _page: u32,
            _per_page: u32,
        ) -> GithubResult<Vec<CommitDetail>> {
            Ok(vec![])
        }
        fn fetch_issue(&self, repo: &str, number: u64) -> GithubResult<IssueText> {
            Err(GithubError::NotFound {
                repo: repo.to_string(),
                what: format!("issue #{}", number),
            })
        }
        fn fetch_language_loc(&self, _repo: &str, _language: &str) -> GithubResult<u64> {
            Ok(self.loc)
        }
    }

    fn commit(sha: &str, date: &str, changes: u32) -> CommitDetail {
        CommitDetail {
            repo: "o/r".to_string(),
            sha: sha.to_string(),
            message: String::new(),
            author_date: date.to_string(),
            files: vec![FileChange {
                path: "src/a.c".to_string(),
                additions: changes,
                deletions: 0,
                changes,
            }],
        }
    }

    #[test]
    fn test_collect_lifecycle_row() {
        let source = FakeSource {
            commits: HashMap::from([
                (
                    "bic1234".to_string(),
                    commit("bic1234", "2023-01-01T00:00:00Z", 12),
                ),
                (
                    "bfc1234".to_string(),
                    commit("bfc1234", "2023-01-10T00:00:00Z", 30),
                ),
            ]),
            loc: 54321,
        };
        let triple = RegressionTriple {
            repo: "o/r".to_string(),
            bfc_sha: "bfc1234".to_string(),
            bic_sha: "bic1234".to_string(),
        };

        let record = collect_lifecycle(&source, &triple, "C").unwrap().unwrap();
        assert_eq!(record.fix_period, 9);
        assert_eq!(record.bic_files_count, 1);
        assert_eq!(record.bic_file_changes, 12);
        assert_eq!(record.bfc_file_changes, 30);
        assert_eq!(record.loc, 54321);
    }

    #[test]
    fn test_missing_commit_skips_row() {
        let source = FakeSource {
            commits: HashMap::new(),
            loc: 0,
        };
        let triple = RegressionTriple {
            repo: "o/r".to_string(),
            bfc_sha: "bfc1234".to_string(),
            bic_sha: "bic1234".to_string(),
        };
        assert!(collect_lifecycle(&source, &triple, "C").unwrap().is_none());
    }
}
