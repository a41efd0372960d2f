//! `stats` command: probe a repository's commit count

use crate::config::Config;
use crate::github::GithubClient;
use anyhow::Result;

pub fn run(repo: &str) -> Result<()> {
    let config = Config::from_env()?;
    let client = GithubClient::new(&config);

    match client.fetch_commit_count(repo)? {
        Some(count) => println!("{},{}", repo, count),
        None => println!("{},unavailable", repo),
    }
    Ok(())
}
