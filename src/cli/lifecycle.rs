//! `lifecycle` command: fix-period and commit-size statistics

use crate::config::Config;
use crate::dataset::{self, LifecycleWriter};
use crate::github::GithubClient;
use crate::mining::collect_lifecycle;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

pub fn run(triples_path: &Path, out: &Path) -> Result<()> {
    let config = Config::from_env()?;
    let client = GithubClient::new(&config);

    let triples = dataset::read_triples(triples_path)?;
    println!("Collecting lifecycle information for {} chains\n", triples.len());

    let bar = ProgressBar::new(triples.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓▒░  "),
    );

    let mut writer = LifecycleWriter::open(out)?;
    let mut written = 0usize;

    for triple in &triples {
        bar.set_message(triple.repo.clone());
        if let Some(record) = collect_lifecycle(&client, triple, &config.tracked_language)? {
            writer.append(&record)?;
            written += 1;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "{} {} lifecycle rows written to {}",
        style("✓").green(),
        written,
        out.display()
    );
    Ok(())
}
