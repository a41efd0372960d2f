//! `collect` command: mine regression chains from cataloged repositories

use crate::config::Config;
use crate::dataset::{self, TripleWriter};
use crate::github::GithubClient;
use crate::mining::ChainBuilder;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

pub fn run(projects_path: &Path, out: &Path, max_chains: Option<usize>) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(max) = max_chains {
        config.max_chains = max;
    }
    let client = GithubClient::new(&config);

    let projects = dataset::read_projects(projects_path)?;
    println!(
        "Mining {} repositories for regression chains (cap {} per repo)\n",
        projects.len(),
        config.max_chains
    );

    let bar = ProgressBar::new(projects.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓▒░  "),
    );

    let builder = ChainBuilder::new(&client, config.per_page, config.max_chains);
    let mut writer = TripleWriter::open(out)?;
    let mut total = 0usize;

    for repo in &projects {
        bar.set_message(repo.clone());
        info!("Processing {} ...", repo);
        total += builder.collect(repo, |triple| writer.append(triple))?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "{} {} chains appended to {}",
        style("✓").green(),
        total,
        out.display()
    );
    Ok(())
}
