//! `classify` command: label BICs with memory-safety bug categories

use crate::config::Config;
use crate::dataset::{self, ClassifiedWriter};
use crate::github::{CommitSource, GithubClient};
use crate::mining::{classify_bug_types, resolve_linked_issue_text};
use crate::models::ClassifiedRegression;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

pub fn run(triples_path: &Path, out: &Path) -> Result<()> {
    let config = Config::from_env()?;
    let client = GithubClient::new(&config);

    let triples = dataset::read_triples(triples_path)?;
    println!("Classifying {} BICs\n", triples.len());

    let bar = ProgressBar::new(triples.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓▒░  "),
    );

    let mut writer = ClassifiedWriter::open(out)?;
    let mut matched_rows = 0usize;

    for triple in &triples {
        bar.set_message(format!("{} {}", triple.repo, triple.bic_sha));

        let commit = match client.fetch_commit(&triple.repo, &triple.bic_sha) {
            Ok(commit) => commit,
            Err(e) if e.is_skip() => {
                info!("Skipping {} {}: {}", triple.repo, triple.bic_sha, e);
                bar.inc(1);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        // The linked issue or PR often carries the real bug report
        let linked_text = resolve_linked_issue_text(&client, &triple.repo, &commit.message)?;
        let combined = format!("{}\n{}", commit.message, linked_text);

        let bug_types = classify_bug_types(&combined);
        if !bug_types.is_empty() {
            info!(
                "{} {} matched {:?}",
                triple.repo,
                triple.bic_sha,
                bug_types.iter().map(|b| b.name()).collect::<Vec<_>>()
            );
            writer.append(&ClassifiedRegression {
                repo: triple.repo.clone(),
                bic_sha: triple.bic_sha.clone(),
                bug_types,
            })?;
            matched_rows += 1;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "{} {} of {} BICs matched at least one bug type ({})",
        style("✓").green(),
        matched_rows,
        triples.len(),
        out.display()
    );
    Ok(())
}
