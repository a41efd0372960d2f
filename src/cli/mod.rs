//! CLI command definitions and handlers

mod classify;
mod collect;
mod dedup;
mod filter;
mod lifecycle;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// regrminer - Regression-chain dataset mining
///
/// Mines public GitHub history for regression chains: commits whose
/// messages point back at the commit that introduced the bug they fix.
#[derive(Parser, Debug)]
#[command(name = "regrminer")]
#[command(
    version,
    about = "Mine GitHub history for regression chains and label them with a memory-safety bug taxonomy",
    long_about = "regrminer walks the commit listings of cataloged repositories looking for \
bug-fixing commits that name the commit which introduced the defect, validates the \
resulting (BFC, BIC) pairs structurally, and classifies the underlying bug into a \
fixed memory-safety taxonomy.\n\n\
The output is CSV rows for an offline research pipeline; results are heuristic and \
noisy by construction, meant for downstream statistical analysis rather than \
authoritative bug diagnosis.\n\n\
All network commands need a GITHUB_TOKEN environment variable.",
    after_help = "\
Examples:
  regrminer collect --projects filtered_projects.csv       Mine chains from cataloged repos
  regrminer filter --triples regression_commits.csv        Keep small, surgical C commits
  regrminer classify --triples filtered_regression_commits.csv   Label memory bug types
  regrminer lifecycle --triples filtered_regression_commits.csv  Fix-period and size stats
  regrminer dedup --input regression_commits.csv --out deduped.csv

Pipeline order: collect -> dedup -> filter -> classify / lifecycle"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mine regression chains from each cataloged repository's history
    #[command(after_help = "\
Examples:
  regrminer collect --projects filtered_projects.csv
  regrminer collect --projects filtered_projects.csv --max-chains 50
  regrminer collect --projects filtered_projects.csv -o chains.csv

The catalog CSV comes from an external project-catalog builder; only the
first column (owner/repo) is read. Accepted triples are appended to the
output as they are found, so an interrupted run keeps its progress.")]
    Collect {
        /// Project catalog CSV (first column: owner/repo, header skipped)
        #[arg(long)]
        projects: PathBuf,

        /// Output CSV for regression triples (appended)
        #[arg(long, short = 'o', default_value = "regression_commits.csv")]
        out: PathBuf,

        /// Accepted chains per repository before moving to the next
        #[arg(long)]
        max_chains: Option<usize>,
    },

    /// Keep only triples where both commits are small and touch tracked source files
    #[command(after_help = "\
Examples:
  regrminer filter --triples regression_commits.csv
  regrminer filter --triples regression_commits.csv -o filtered.csv

Both the BIC and the BFC must touch at least one tracked-extension file
(default .c) and change at most 100 lines in total. Large commits are
poor candidates for precise fault attribution.")]
    Filter {
        /// Input triple CSV
        #[arg(long)]
        triples: PathBuf,

        /// Output CSV for admitted triples (appended)
        #[arg(long, short = 'o', default_value = "filtered_regression_commits.csv")]
        out: PathBuf,
    },

    /// Label each BIC with matching memory-safety bug categories
    #[command(after_help = "\
Examples:
  regrminer classify --triples filtered_regression_commits.csv
  regrminer classify --triples filtered_regression_commits.csv -o bugs.csv

Classification reads the BIC commit message plus the text of the first
linked issue or PR, if any. Rows with no matching category are dropped.")]
    Classify {
        /// Input triple CSV
        #[arg(long)]
        triples: PathBuf,

        /// Output CSV for classified rows (appended)
        #[arg(long, short = 'o', default_value = "memory_related_bugs.csv")]
        out: PathBuf,
    },

    /// Collect fix-period and commit-size statistics for each chain
    #[command(after_help = "\
Examples:
  regrminer lifecycle --triples filtered_regression_commits.csv
  regrminer lifecycle --triples filtered_regression_commits.csv -o info.csv")]
    Lifecycle {
        /// Input triple CSV
        #[arg(long)]
        triples: PathBuf,

        /// Output CSV for lifecycle rows (appended)
        #[arg(long, short = 'o', default_value = "regression_information.csv")]
        out: PathBuf,
    },

    /// Drop duplicate triples (same BIC and BFC), keeping first occurrences
    Dedup {
        /// Input triple CSV
        #[arg(long)]
        input: PathBuf,

        /// Output CSV (appended)
        #[arg(long, short = 'o')]
        out: PathBuf,
    },

    /// Probe the commit count of one repository via contributor stats
    #[command(after_help = "\
The stats endpoint may answer 202 while GitHub generates the numbers;
the probe retries a few times and then gives up.")]
    Stats {
        /// Repository full name (owner/repo)
        repo: String,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Collect {
            projects,
            out,
            max_chains,
        } => collect::run(&projects, &out, max_chains),
        Commands::Filter { triples, out } => filter::run(&triples, &out),
        Commands::Classify { triples, out } => classify::run(&triples, &out),
        Commands::Lifecycle { triples, out } => lifecycle::run(&triples, &out),
        Commands::Dedup { input, out } => dedup::run(&input, &out),
        Commands::Stats { repo } => stats::run(&repo),
    }
}
