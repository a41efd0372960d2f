//! CSV dataset layer
//!
//! Row schemas for every pipeline stage, plus append-mode writers that
//! emit the header once and flush per row, so an interrupted run keeps
//! everything collected so far. Concurrent runs against the same output
//! file are not supported; serialize externally.

use crate::models::{ClassifiedRegression, LifecycleRecord, RegressionTriple};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::path::Path;

pub const TRIPLE_HEADER: [&str; 3] = ["repo", "BIC_sha", "BFC_sha"];
pub const CLASSIFIED_HEADER: [&str; 3] = ["repo", "BIC_sha", "bug_types"];
pub const LIFECYCLE_HEADER: [&str; 11] = [
    "repo",
    "fix_period",
    "BIC_sha",
    "BIC_time",
    "BIC_files_count",
    "BIC_file_changes",
    "BFC_sha",
    "BFC_time",
    "BFC_files_count",
    "BFC_file_changes",
    "LOC",
];

fn needs_header(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    }
}

/// Append-mode CSV writer: header only when the file is new or empty,
/// one flush per row.
struct AppendWriter {
    inner: csv::Writer<File>,
}

impl AppendWriter {
    fn open(path: &Path, header: &[&str]) -> Result<Self> {
        let write_header = needs_header(path);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {:?} for appending", path))?;
        let mut inner = WriterBuilder::new().has_headers(false).from_writer(file);
        if write_header {
            inner.write_record(header)?;
            inner.flush()?;
        }
        Ok(Self { inner })
    }

    fn append(&mut self, fields: &[String]) -> Result<()> {
        self.inner.write_record(fields)?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Writes `repo,BIC_sha,BFC_sha` rows (raw and filtered triples share
/// the schema).
pub struct TripleWriter(AppendWriter);

impl TripleWriter {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self(AppendWriter::open(path, &TRIPLE_HEADER)?))
    }

    pub fn append(&mut self, triple: &RegressionTriple) -> Result<()> {
        self.0.append(&[
            triple.repo.clone(),
            triple.bic_sha.clone(),
            triple.bfc_sha.clone(),
        ])
    }
}

/// Writes `repo,BIC_sha,bug_types` rows.
pub struct ClassifiedWriter(AppendWriter);

impl ClassifiedWriter {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self(AppendWriter::open(path, &CLASSIFIED_HEADER)?))
    }

    pub fn append(&mut self, row: &ClassifiedRegression) -> Result<()> {
        self.0.append(&[
            row.repo.clone(),
            row.bic_sha.clone(),
            row.bug_types_column(),
        ])
    }
}

/// Writes the 11-column lifecycle rows.
pub struct LifecycleWriter(AppendWriter);

impl LifecycleWriter {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self(AppendWriter::open(path, &LIFECYCLE_HEADER)?))
    }

    pub fn append(&mut self, record: &LifecycleRecord) -> Result<()> {
        self.0.append(&[
            record.repo.clone(),
            record.fix_period.to_string(),
            record.bic_sha.clone(),
            record.bic_time.clone(),
            record.bic_files_count.to_string(),
            record.bic_file_changes.to_string(),
            record.bfc_sha.clone(),
            record.bfc_time.clone(),
            record.bfc_files_count.to_string(),
            record.bfc_file_changes.to_string(),
            record.loc.to_string(),
        ])
    }
}

/// Read triples from a CSV. Column positions are taken from the header
/// when the sha columns are named, falling back to positional
/// `repo,BIC_sha,BFC_sha` otherwise. Blank and short rows are skipped.
pub fn read_triples(path: &Path) -> Result<Vec<RegressionTriple>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {:?}", path))?;

    let headers = reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);
    let (repo_idx, bic_idx, bfc_idx) = match (
        position("repo"),
        position("BIC_sha"),
        position("BFC_sha"),
    ) {
        (Some(r), Some(bic), Some(bfc)) => (r, bic, bfc),
        _ => (0, 1, 2),
    };

    let mut triples = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() < 3 {
            continue;
        }
        let repo = record.get(repo_idx).unwrap_or("").trim().to_string();
        let bic_sha = record.get(bic_idx).unwrap_or("").trim().to_string();
        let bfc_sha = record.get(bfc_idx).unwrap_or("").trim().to_string();
        if repo.is_empty() {
            continue;
        }
        triples.push(RegressionTriple {
            repo,
            bfc_sha,
            bic_sha,
        });
    }
    Ok(triples)
}

/// Read repository full names from a project-catalog CSV (first column,
/// header skipped). Produced by an external catalog builder.
pub fn read_projects(path: &Path) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {:?}", path))?;

    let mut projects = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(name) = record.get(0) else { continue };
        let name = name.trim();
        if !name.is_empty() {
            projects.push(name.to_string());
        }
    }
    Ok(projects)
}

/// Copy a triple CSV dropping rows whose `(BIC_sha, BFC_sha)` pair was
/// already seen; first occurrence wins and input order is preserved.
/// Returns `(kept, dropped)`.
pub fn dedup_triples(input: &Path, output: &Path) -> Result<(usize, usize)> {
    let triples = read_triples(input)?;
    let mut seen = std::collections::HashSet::new();
    let mut writer = TripleWriter::open(output)?;
    let mut kept = 0usize;
    let mut dropped = 0usize;

    for triple in &triples {
        if seen.insert((triple.bic_sha.clone(), triple.bfc_sha.clone())) {
            writer.append(triple)?;
            kept += 1;
        } else {
            dropped += 1;
        }
    }
    Ok((kept, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BugCategory;

    #[test]
    fn test_triple_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triples.csv");

        let triple = RegressionTriple {
            repo: "owner/repo".to_string(),
            bfc_sha: "bfc1234".to_string(),
            bic_sha: "bic1234".to_string(),
        };
        let mut writer = TripleWriter::open(&path).unwrap();
        writer.append(&triple).unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("repo,BIC_sha,BFC_sha\n"));

        let triples = read_triples(&path).unwrap();
        assert_eq!(triples, vec![triple]);
    }

    #[test]
    fn test_header_written_once_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triples.csv");

        for sha in ["aaaa111", "bbbb222"] {
            let mut writer = TripleWriter::open(&path).unwrap();
            writer
                .append(&RegressionTriple {
                    repo: "o/r".to_string(),
                    bfc_sha: sha.to_string(),
                    bic_sha: "bic1234".to_string(),
                })
                .unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("repo,BIC_sha,BFC_sha").count(), 1);
        assert_eq!(read_triples(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_read_triples_with_swapped_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        // Legacy collector output named the BFC column first
        std::fs::write(&path, "repo,BFC_sha,BIC_sha\no/r,bfc1234,bic1234\n").unwrap();

        let triples = read_triples(&path).unwrap();
        assert_eq!(triples[0].bfc_sha, "bfc1234");
        assert_eq!(triples[0].bic_sha, "bic1234");
    }

    #[test]
    fn test_classified_row_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classified.csv");

        let row = ClassifiedRegression {
            repo: "o/r".to_string(),
            bic_sha: "bic1234".to_string(),
            bug_types: vec![BugCategory::Overflow, BugCategory::MemoryLeak],
        };
        let mut writer = ClassifiedWriter::open(&path).unwrap();
        writer.append(&row).unwrap();
        drop(writer);

        let mut reader = ReaderBuilder::new().from_path(&path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.get(2).unwrap(), "Overflow; Memory leak");
        assert_eq!(
            ClassifiedRegression::parse_bug_types(record.get(2).unwrap()),
            row.bug_types
        );
    }

    #[test]
    fn test_lifecycle_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifecycle.csv");

        let mut writer = LifecycleWriter::open(&path).unwrap();
        writer.append(&LifecycleRecord::default()).unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(
            "repo,fix_period,BIC_sha,BIC_time,BIC_files_count,BIC_file_changes,\
             BFC_sha,BFC_time,BFC_files_count,BFC_file_changes,LOC\n"
        ));
    }

    #[test]
    fn test_read_projects_skips_header_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.csv");
        std::fs::write(&path, "name,stars,commits\nowner/one,1500,800\nowner/two,1200,600\n")
            .unwrap();

        let projects = read_projects(&path).unwrap();
        assert_eq!(projects, vec!["owner/one", "owner/two"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(
            &input,
            "repo,BIC_sha,BFC_sha\n\
             o/r,bic1,bfc1\n\
             o/r,bic1,bfc1\n\
             o/r,bic2,bfc2\n",
        )
        .unwrap();

        let (kept, dropped) = dedup_triples(&input, &output).unwrap();
        assert_eq!((kept, dropped), (2, 1));

        let triples = read_triples(&output).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].bic_sha, "bic1");
        assert_eq!(triples[1].bic_sha, "bic2");
    }
}
