//! Configuration for regrminer
//!
//! The GitHub token comes from the `GITHUB_TOKEN` environment variable and
//! is required for every command that touches the network; it is injected
//! into the client at construction, never read ad hoc by inner components.
//!
//! Tunables (cool-down, thresholds, tracked extension) can optionally be
//! set in `~/.config/regrminer/config.toml`; built-in defaults apply
//! otherwise.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Runtime configuration: credential plus mining tunables.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub API token, required
    pub token: String,
    /// How long to block after a rate-limit response before retrying
    pub rate_limit_cooldown: Duration,
    /// Pause between attempts while the stats endpoint reports not-yet-ready
    pub stats_retry_pause: Duration,
    /// Attempt cap for the stats endpoint (commit/issue lookups retry unboundedly)
    pub stats_max_attempts: u32,
    /// Commits fetched per listing page
    pub per_page: u32,
    /// Accepted chains per repository before the builder stops
    pub max_chains: usize,
    /// Source-file suffix that makes a commit structurally relevant
    pub tracked_extension: String,
    /// Language name used for the repository LOC lookup
    pub tracked_language: String,
    /// Reject commits whose total changed-line count exceeds this
    pub max_commit_changes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            rate_limit_cooldown: Duration::from_secs(60),
            stats_retry_pause: Duration::from_secs(20),
            stats_max_attempts: 5,
            per_page: 100,
            max_chains: 200,
            tracked_extension: ".c".to_string(),
            tracked_language: "C".to_string(),
            max_commit_changes: 100,
        }
    }
}

/// Tunables as they appear in the optional config file. The token is
/// deliberately not accepted here; it stays env-only.
#[derive(Debug, Default, Deserialize, Serialize)]
struct FileConfig {
    #[serde(default)]
    mining: MiningSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct MiningSection {
    rate_limit_cooldown_secs: Option<u64>,
    per_page: Option<u32>,
    max_chains: Option<usize>,
    tracked_extension: Option<String>,
    tracked_language: Option<String>,
    max_commit_changes: Option<u32>,
}

impl Config {
    /// Load config with priority:
    /// 1. `GITHUB_TOKEN` environment variable (required)
    /// 2. User config (~/.config/regrminer/config.toml) for tunables
    /// 3. Built-in defaults
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(GITHUB_TOKEN_ENV).map_err(|_| {
            anyhow::anyhow!(
                "{} is not set. Create a GitHub personal access token at \
                 https://github.com/settings/tokens and export it first.",
                GITHUB_TOKEN_ENV
            )
        })?;

        let mut config = Config {
            token,
            ..Default::default()
        };

        if let Some(file_config) = Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|content| toml::from_str::<FileConfig>(&content).ok())
        {
            config.merge(file_config);
        }

        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("regrminer").join("config.toml"))
    }

    fn merge(&mut self, other: FileConfig) {
        if let Some(secs) = other.mining.rate_limit_cooldown_secs {
            self.rate_limit_cooldown = Duration::from_secs(secs);
        }
        if let Some(per_page) = other.mining.per_page {
            self.per_page = per_page;
        }
        if let Some(max_chains) = other.mining.max_chains {
            self.max_chains = max_chains;
        }
        if let Some(ext) = other.mining.tracked_extension {
            self.tracked_extension = ext;
        }
        if let Some(language) = other.mining.tracked_language {
            self.tracked_language = language;
        }
        if let Some(max) = other.mining.max_commit_changes {
            self.max_commit_changes = max;
        }
    }
}
