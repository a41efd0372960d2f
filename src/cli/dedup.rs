//! `dedup` command: drop duplicate triples from a collected CSV

use crate::dataset;
use anyhow::Result;
use console::style;
use std::path::Path;

pub fn run(input: &Path, out: &Path) -> Result<()> {
    let (kept, dropped) = dataset::dedup_triples(input, out)?;
    println!(
        "{} kept {} triples, dropped {} duplicates ({})",
        style("✓").green(),
        kept,
        dropped,
        out.display()
    );
    Ok(())
}
