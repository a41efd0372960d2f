//! CLI contract tests
//!
//! Exercises the binary for the offline command surface: help output,
//! dedup, and the fatal missing-token error every network command shares.

use std::path::Path;
use std::process::Command;

fn regrminer_bin() -> &'static str {
    env!("CARGO_BIN_EXE_regrminer")
}

fn run(args: &[&str], cwd: &Path, strip_token: bool) -> (i32, String, String) {
    let mut cmd = Command::new(regrminer_bin());
    cmd.args(args).current_dir(cwd);
    if strip_token {
        cmd.env_remove("GITHUB_TOKEN");
    }
    let output = cmd.output().expect("failed to run regrminer");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_help_lists_pipeline_commands() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(&["--help"], dir.path(), false);
    assert_eq!(code, 0);
    for command in ["collect", "filter", "classify", "lifecycle", "dedup"] {
        assert!(stdout.contains(command), "missing {} in help", command);
    }
}

#[test]
fn test_dedup_runs_offline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    std::fs::write(
        &input,
        "repo,BIC_sha,BFC_sha\n\
         o/r,bic1,bfc1\n\
         o/r,bic1,bfc1\n\
         o/r,bic2,bfc2\n",
    )
    .unwrap();

    let (code, stdout, stderr) = run(
        &["dedup", "--input", "in.csv", "--out", "out.csv"],
        dir.path(),
        true, // no token needed for local commands
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("kept 2"));
    assert!(stdout.contains("dropped 1"));

    let content = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(content.lines().count(), 3); // header + 2 rows
}

#[test]
fn test_network_commands_require_token() {
    let dir = tempfile::tempdir().unwrap();
    let projects = dir.path().join("projects.csv");
    std::fs::write(&projects, "name,stars,commits\nowner/repo,1000,900\n").unwrap();

    let (code, _, stderr) = run(
        &["collect", "--projects", "projects.csv"],
        dir.path(),
        true,
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("GITHUB_TOKEN"), "stderr: {}", stderr);
}
