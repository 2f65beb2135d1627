//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `svmflow` binary to verify argument
//! parsing, exit codes, and the end-to-end train/save/classify flow.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn cmd() -> Command {
    Command::cargo_bin("svmflow").unwrap()
}

/// Linearly separable labeled training set: positives at x0 > 0, negatives
/// at x0 < 0.
fn labeled_content(n_per_class: usize) -> String {
    let mut out = String::new();
    for i in 0..n_per_class {
        let offset = i as f64 * 0.25;
        out.push_str(&format!("1 0:{} 1:0.5\n", 2.0 + offset));
        out.push_str(&format!("-1 0:{} 1:-0.5\n", -2.0 - offset));
    }
    out
}

fn unlabeled_content() -> String {
    "0:2.5 1:0.5\n0:-2.5 1:-0.5\n0:3.0 1:0.5\n".to_string()
}

/// Train on a fresh tempdir with `--save` so the model lands at
/// ./model_out.dat inside the dir.
fn train_and_save(dir: &Path) {
    std::fs::write(dir.join("train.dat"), labeled_content(10)).unwrap();
    cmd()
        .current_dir(dir)
        .args(["-t", "-s", "--kernel", "linear", "train.dat"])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// Usage and mode selection
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_usage_and_exits_zero() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--train"))
        .stdout(predicate::str::contains("--classify"));
}

#[test]
fn version_flag() {
    cmd().arg("--version").assert().success();
}

#[test]
fn tc_without_train_is_a_configuration_error() {
    cmd()
        .args(["--tc", "train.dat"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--tc"));
}

#[test]
fn save_without_train_is_a_configuration_error() {
    cmd()
        .args(["-c", "-s", "model.dat"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn train_and_classify_together_are_rejected() {
    cmd()
        .args(["-t", "-c", "file.dat"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn invalid_gamma_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("train.dat"), labeled_content(5)).unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-t", "--gamma", "0", "train.dat"])
        .assert()
        .failure()
        .code(2);
}

// ---------------------------------------------------------------------------
// Missing-file failures
// ---------------------------------------------------------------------------

#[test]
fn classify_without_any_dat_file_exits_model_code() {
    cmd()
        .arg("-c")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("model"));
}

#[test]
fn classify_nonexistent_model_exits_model_code() {
    cmd()
        .args(["-c", "/nonexistent/model.dat", "/nonexistent/data.dat"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn train_nonexistent_file_exits_dataset_code() {
    cmd()
        .args(["-t", "/nonexistent/train.dat"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn train_with_only_non_dat_arguments_exits_dataset_code() {
    cmd()
        .args(["-t", "train.txt"])
        .assert()
        .failure()
        .code(3);
}

// ---------------------------------------------------------------------------
// End-to-end train / save / classify
// ---------------------------------------------------------------------------

#[test]
fn train_prints_model_summary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("train.dat"), labeled_content(10)).unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-t", "--kernel", "linear", "train.dat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model parameters summary"))
        .stdout(predicate::str::contains("number of classes     2"));
}

#[test]
fn train_with_save_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    train_and_save(dir.path());
    assert!(dir.path().join("train_out.dat").exists());
    assert!(dir.path().join("model_out.dat").exists());
}

#[test]
fn classify_saved_model_without_data_exits_missing_data_code() {
    let dir = tempfile::tempdir().unwrap();
    train_and_save(dir.path());
    cmd()
        .current_dir(dir.path())
        .args(["-c", "model_out.dat"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("data file"));
}

#[test]
fn classify_saved_model_against_labeled_data_reports_accuracy() {
    let dir = tempfile::tempdir().unwrap();
    train_and_save(dir.path());
    std::fs::write(dir.path().join("test.dat"), labeled_content(5)).unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-c", "model_out.dat", "test.dat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("number of positive samples"))
        .stdout(predicate::str::contains("Accuracy (classification)"));
}

#[test]
fn classify_unlabeled_data_skips_the_test() {
    let dir = tempfile::tempdir().unwrap();
    train_and_save(dir.path());
    std::fs::write(dir.path().join("test.dat"), unlabeled_content()).unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-c", "model_out.dat", "test.dat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("classification test was skipped"));
}

#[test]
fn train_then_classify_runs_both_phases() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("train.dat"), labeled_content(10)).unwrap();
    std::fs::write(dir.path().join("test.dat"), labeled_content(5)).unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-t", "--tc", "--kernel", "linear", "train.dat", "test.dat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model parameters summary"))
        .stdout(predicate::str::contains("Accuracy (classification)"));
}

#[test]
fn train_then_classify_without_second_file_exits_missing_data_code() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("train.dat"), labeled_content(10)).unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["-t", "--tc", "--kernel", "linear", "train.dat"])
        .assert()
        .failure()
        .code(5);
}
