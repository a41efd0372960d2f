//! `filter` command: structural validation of regression triples

use crate::config::Config;
use crate::dataset::{self, TripleWriter};
use crate::github::GithubClient;
use crate::mining::StructuralFilter;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

pub fn run(triples_path: &Path, out: &Path) -> Result<()> {
    let config = Config::from_env()?;
    let client = GithubClient::new(&config);
    let filter = StructuralFilter::new(
        &client,
        &config.tracked_extension,
        config.max_commit_changes,
    );

    let triples = dataset::read_triples(triples_path)?;
    println!("Filtering {} triples\n", triples.len());

    let bar = ProgressBar::new(triples.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓▒░  "),
    );

    let mut writer = TripleWriter::open(out)?;
    let mut kept = 0usize;

    for triple in &triples {
        bar.set_message(triple.repo.clone());
        if filter.admit(triple)? {
            writer.append(triple)?;
            kept += 1;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "{} kept {} of {} triples ({})",
        style("✓").green(),
        kept,
        triples.len(),
        out.display()
    );
    Ok(())
}
