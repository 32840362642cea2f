use std::fs;

use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;
use tempfile::TempDir;

fn pool_bench() -> Command {
    Command::cargo_bin("pool-bench").unwrap()
}

#[test]
fn cli_version() {
    pool_bench()
        .args(["-V"])
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_default_run_prints_report() {
    pool_bench()
        .args(["--threads", "2", "--work-ms", "0"])
        .assert()
        .success()
        .stdout(contains("// processed 16 inputs"))
        .stdout(contains("batch size: 8"));
}

#[test]
fn cli_repeat_and_batch_size() {
    pool_bench()
        .args([
            "--threads", "3", "--inputs", "a,b,c", "--repeat", "4", "--batch-size", "5",
            "--work-ms", "0", "--join",
        ])
        .assert()
        .success()
        .stdout(contains("// processed 12 inputs"))
        .stdout(contains("batch size: 5"));
}

#[test]
fn cli_json_report() {
    pool_bench()
        .args(["--threads", "1", "--inputs", "x,y", "--work-ms", "0", "--json"])
        .assert()
        .success()
        .stdout(contains("\"inputs\":2"))
        .stdout(contains("\"failed_batches\":0"));
}

#[test]
fn cli_input_dir() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["one.jpg", "two.jpg", "skip.txt"] {
        fs::write(temp_dir.path().join(name), b"").unwrap();
    }

    pool_bench()
        .arg("--input-dir")
        .arg(temp_dir.path())
        .args(["--ext", "jpg", "--work-ms", "0", "--threads", "2"])
        .assert()
        .success()
        .stdout(contains("// processed 2 inputs"));
}

#[test]
fn cli_zero_threads_fails() {
    pool_bench()
        .args(["--threads", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid worker count: 0"));
}

#[test]
fn cli_zero_batch_size_fails() {
    pool_bench()
        .args(["--batch-size", "0", "--threads", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid batch size: 0"));
}
