//! Exercises the compiled `infodemics` binary end to end.

use std::fs;
use std::process::{Command, Output};

use rstest::rstest;
use tempfile::TempDir;

fn infodemics(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_infodemics"))
        .args(args)
        .env("RUST_LOG", "info")
        .env_remove("INFODEMICS_LOG_FORMAT")
        .output()
        .expect("binary must start")
}

fn data_dir() -> TempDir {
    let dir = TempDir::new().expect("temporary directory must be created");
    fs::write(
        dir.path().join("nodes.csv"),
        "id,label,followers\n1,5G_Conspiracy,5\n2,Other,1\n3,Non_Conspiracy,2\n",
    )
    .expect("nodes.csv must be writable");
    fs::write(dir.path().join("edges.csv"), "source,target\n1,2\n2,3\n")
        .expect("edges.csv must be writable");
    dir
}

#[rstest]
fn run_writes_json_report_to_stdout() {
    let dir = data_dir();
    let path = dir.path().to_str().expect("temporary path is UTF-8");
    let output = infodemics(&[
        "run",
        "--data-dir",
        path,
        "--beta",
        "1",
        "--gamma",
        "0",
        "--time-steps",
        "3",
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "{output:?}");

    let document: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout must hold one JSON document");
    assert_eq!(document["command"], "run");
    assert_eq!(document["final_states"]["infected"], 3);
    // Diagnostics stay on stderr.
    assert!(String::from_utf8_lossy(&output.stderr).contains("command completed"));
}

#[rstest]
fn missing_tables_exit_with_failure() {
    let dir = TempDir::new().expect("temporary directory must be created");
    let path = dir.path().to_str().expect("temporary path is UTF-8");
    let output = infodemics(&["stats", "--data-dir", path]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("command execution failed"), "{stderr}");
    assert!(stderr.contains("INFODEMICS_CSV_OPEN"), "{stderr}");
}

#[rstest]
fn invalid_log_format_fails_before_running() {
    let dir = data_dir();
    let path = dir.path().to_str().expect("temporary path is UTF-8");
    let output = Command::new(env!("CARGO_BIN_EXE_infodemics"))
        .args(["stats", "--data-dir", path])
        .env("INFODEMICS_LOG_FORMAT", "xml")
        .output()
        .expect("binary must start");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported log format"));
}

#[rstest]
fn log_format_flag_switches_stderr_to_json() {
    let dir = data_dir();
    let path = dir.path().to_str().expect("temporary path is UTF-8");
    let output = infodemics(&["stats", "--data-dir", path, "--log-format", "json"]);
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let events: Vec<serde_json::Value> = stderr
        .lines()
        .map(|line| serde_json::from_str(line).expect("each diagnostic line is JSON"))
        .collect();
    assert!(
        events
            .iter()
            .any(|event| event["fields"]["message"] == "command completed"),
        "{stderr}"
    );
}
