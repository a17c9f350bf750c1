//! CLI integration tests
//!
//! Every URL used here is rejected before any request is sent, so the suite
//! never touches the network.
use std::fs::File;

use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("folio")
}

fn run_dirs(root: &std::path::Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(root).unwrap().map(|e| e.unwrap().path()).filter(|p| p.is_dir()).collect()
}

fn archive_names(path: &std::path::Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--mode"))
        .stdout(predicate::str::contains("--keep-runs"));
}

#[test]
fn test_cli_empty_stdin() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["-o", tmp.path().to_str().unwrap()])
        .write_stdin("\n   \n")
        .assert()
        .success()
        .stderr(predicate::str::contains("No URLs given"));

    let runs = run_dirs(tmp.path());
    assert_eq!(runs.len(), 1);
    assert_eq!(archive_names(&runs[0].join("articles.zip")), vec!["report.txt"]);
}

#[test]
fn test_cli_invalid_urls_are_reported() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["-o", tmp.path().to_str().unwrap(), "-"])
        .write_stdin("not a url\nftp://files.example/story\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("not a url: Article extraction error: Invalid URL"))
        .stderr(predicate::str::contains("ftp://files.example/story"));

    let runs = run_dirs(tmp.path());
    let report = std::fs::read_to_string(runs[0].join("report.txt")).unwrap();
    assert!(report.contains("Total URLs submitted: 2\n"));
    assert!(report.contains("Failed: 2\n"));
}

#[test]
fn test_cli_json_summary() {
    let tmp = TempDir::new().unwrap();

    let output = cmd()
        .args(["--json", "-o", tmp.path().to_str().unwrap()])
        .write_stdin("mailto:someone@example.com\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"]["total_submitted"], 1);
    assert_eq!(json["result"]["total_completed"], 0);
    assert_eq!(json["result"]["failed"][0]["url"], "mailto:someone@example.com");
    assert!(json["archive_path"].as_str().unwrap().ends_with("articles.zip"));
}

#[test]
fn test_cli_file_input_combined() {
    let tmp = TempDir::new().unwrap();
    let list = tmp.path().join("urls.txt");
    std::fs::write(&list, "not-a-url\n").unwrap();
    let out = tmp.path().join("out");

    cmd()
        .args(["--mode", "combined", "-o", out.to_str().unwrap(), list.to_str().unwrap()])
        .assert()
        .success();

    let runs = run_dirs(&out);
    assert_eq!(
        archive_names(&runs[0].join("articles.zip")),
        vec!["articles.docx", "articles.pdf", "report.txt"]
    );
}

#[test]
fn test_cli_archive_out() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("copy.zip");

    cmd()
        .args(["-o", tmp.path().join("runs").to_str().unwrap(), "--archive-out", target.to_str().unwrap()])
        .write_stdin("")
        .assert()
        .success();

    assert_eq!(archive_names(&target), vec!["report.txt"]);
}

#[test]
fn test_cli_keep_runs() {
    let tmp = TempDir::new().unwrap();

    for _ in 0..3 {
        cmd()
            .args(["-o", tmp.path().to_str().unwrap(), "--keep-runs", "2"])
            .write_stdin("")
            .assert()
            .success();
        std::thread::sleep(std::time::Duration::from_millis(20));
    }

    assert_eq!(run_dirs(tmp.path()).len(), 2);
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent-urls.txt").assert().failure().stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_invalid_mode() {
    cmd().args(["--mode", "zip"]).write_stdin("").assert().failure();
}

#[test]
fn test_cli_output_dir_is_a_file() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();

    cmd()
        .args(["-o", blocker.to_str().unwrap()])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Batch processing failed"));
}

#[test]
fn test_cli_verbose() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["-v", "-o", tmp.path().to_str().unwrap()])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("Folio"));
}
