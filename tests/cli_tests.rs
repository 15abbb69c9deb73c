//! Command-line tests for the chapter-reconciler binary

use assert_cmd::Command;
use predicates::prelude::*;

fn reconciler() -> Command {
    Command::cargo_bin("chapter-reconciler").expect("binary should build")
}

/// Scratch directory laid out the way the splitters leave it
fn default_layout() -> tempfile::TempDir {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(root.path().join("chapters_txt(epub)")).unwrap();
    std::fs::create_dir(root.path().join("chapters_txt(txt)")).unwrap();
    root
}

#[test]
fn test_reconcile_default_layout() {
    let root = default_layout();
    std::fs::write(
        root.path().join("chapters_txt(epub)/001.txt"),
        "Chapter 1\nEPUB text",
    )
    .unwrap();
    std::fs::write(
        root.path().join("chapters_txt(txt)/001.txt"),
        "Chapter 1\nTXT text",
    )
    .unwrap();
    std::fs::write(
        root.path().join("chapters_txt(txt)/002.txt"),
        "Afterword\nThanks",
    )
    .unwrap();

    reconciler()
        .current_dir(root.path())
        .arg("reconcile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mismatched (index skipped): 1"))
        .stdout(predicate::str::contains("Unmatched (copied): 1"))
        .stdout(predicate::str::contains("Errors logged in: rename_errors.log"));

    assert!(!root.path().join("chapters_txt/chapter_0001.txt").exists());
    assert_eq!(
        std::fs::read_to_string(root.path().join("chapters_txt/chapter_0002.txt")).unwrap(),
        "Afterword\nThanks"
    );
    assert!(root.path().join("merge_log.json").exists());
    assert!(root.path().join("rename_log.json").exists());
}

#[test]
fn test_reconcile_missing_directory_fails() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("chapters_txt(txt)")).unwrap();

    reconciler()
        .current_dir(root.path())
        .arg("reconcile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input directory"));

    assert!(!root.path().join("chapters_txt").exists());
    assert!(!root.path().join("merge_log.json").exists());
    assert!(!root.path().join("rename_log.json").exists());
    assert!(!root.path().join("rename_errors.log").exists());
}

#[test]
fn test_reconcile_json_summary_with_flags() {
    let root = tempfile::tempdir().unwrap();
    let epub = root.path().join("epub");
    let txt = root.path().join("txt");
    let out = root.path().join("out");
    std::fs::create_dir(&epub).unwrap();
    std::fs::create_dir(&txt).unwrap();
    std::fs::write(epub.join("a.txt"), "Chapter 1\nx").unwrap();
    std::fs::write(txt.join("a.txt"), "CHAPTER 1\ny").unwrap();

    let output = reconciler()
        .current_dir(root.path())
        .args(["--format", "json", "reconcile"])
        .arg("--epub-dir")
        .arg(&epub)
        .arg("--txt-dir")
        .arg(&txt)
        .arg("--output-dir")
        .arg(&out)
        .args(["--merge-threshold", "0.5"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["merged"], 1);
    assert_eq!(report["chapters_written"], 1);
    assert!(report["error_log"].is_null());
    assert!(out.join("chapter_0001.txt").exists());
}

#[test]
fn test_reconcile_output_dir_is_a_file_fails() {
    let root = default_layout();
    std::fs::write(root.path().join("chapters_txt(txt)/a.txt"), "Prologue\nhello").unwrap();
    std::fs::write(root.path().join("chapters_txt"), "in the way").unwrap();

    reconciler()
        .current_dir(root.path())
        .arg("reconcile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write reconciled chapters"))
        .stderr(predicate::str::contains("chapters_txt"));

    assert!(!root.path().join("merge_log.json").exists());
    assert!(!root.path().join("rename_log.json").exists());
}

#[test]
fn test_reconcile_with_config_file() {
    let root = default_layout();
    std::fs::write(root.path().join("chapters_txt(txt)/x.txt"), "Prologue\nhello").unwrap();
    std::fs::write(
        root.path().join("book.toml"),
        "output_dir = \"final\"\nrename_log = \"logs/renames.json\"\n",
    )
    .unwrap();

    reconciler()
        .current_dir(root.path())
        .args(["reconcile", "--config", "book.toml"])
        .assert()
        .success();

    assert!(root.path().join("final/chapter_0001.txt").exists());
    assert!(root.path().join("logs/renames.json").exists());
}

#[test]
fn test_reconcile_rejects_bad_threshold() {
    let root = default_layout();
    reconciler()
        .current_dir(root.path())
        .args(["reconcile", "--merge-threshold", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("merge_threshold"));
}

#[test]
fn test_compare_headers() {
    reconciler()
        .args(["compare", "Chapter 1: Intro", "CHAPTER 1 - INTRO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chapter1intro"))
        .stdout(predicate::str::contains("Similarity: 100.0%"))
        .stdout(predicate::str::contains("Same index key: yes"));
}

#[test]
fn test_compare_files_tsv() {
    let root = tempfile::tempdir().unwrap();
    let a = root.path().join("a.txt");
    let b = root.path().join("b.txt");
    std::fs::write(&a, "\n\nChapter 2\nbody").unwrap();
    std::fs::write(&b, "Chapter 3\nbody").unwrap();

    reconciler()
        .args(["--format", "tsv", "compare", "--files"])
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("chapter2\tchapter3\t0.8750\tfalse"));
}
