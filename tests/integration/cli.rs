//! Tests for the `blux` binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

use super::common::run_dir::RunDir;

/// `blux` with an isolated data directory so user config never leaks in.
fn blux(data_dir: &RunDir) -> Command {
    let mut cmd = Command::cargo_bin("blux").expect("blux binary");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

#[test]
fn view_subcommand_renders_run_directory() {
    let data = RunDir::new();
    let run = RunDir::new().with_json("intent.json", json!({"goal": "x"}));

    blux(&data)
        .arg("view")
        .arg("--root")
        .arg(run.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "\n== Intent ==\n{\n  \"goal\": \"x\"\n}\n",
        ))
        .stdout(predicate::str::contains("== Harness Report ==\n(missing) "));
}

#[test]
fn input_dir_flag_matches_view_subcommand() {
    let data = RunDir::new();
    let run = RunDir::complete();

    let via_view = blux(&data)
        .arg("view")
        .arg("--root")
        .arg(run.path())
        .output()
        .unwrap();
    let via_flag = blux(&data)
        .arg("--input-dir")
        .arg(run.path())
        .output()
        .unwrap();

    assert!(via_view.status.success());
    assert!(via_flag.status.success());
    assert_eq!(via_view.stdout, via_flag.stdout);
}

#[test]
fn empty_directory_exits_cleanly() {
    let data = RunDir::new();
    let run = RunDir::new();

    blux(&data)
        .arg("--input-dir")
        .arg(run.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(missing) ").count(9));
}

#[test]
fn missing_directory_fails_with_message() {
    let data = RunDir::new();
    let run = RunDir::new();

    blux(&data)
        .arg("--input-dir")
        .arg(run.path().join("does-not-exist"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Input directory does not exist"));
}

#[test]
fn run_directory_is_required() {
    let data = RunDir::new();
    blux(&data).assert().failure().stderr(predicate::str::contains(
        "a run directory is required",
    ));
}

#[test]
fn strict_flag_rejects_malformed_json() {
    let data = RunDir::new();
    let run = RunDir::new().with_raw("intent.json", "{oops");

    blux(&data)
        .arg("--input-dir")
        .arg(run.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("== Intent ==\n(unreadable) "));

    blux(&data)
        .arg("--strict")
        .arg("--input-dir")
        .arg(run.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn config_file_sets_indent_and_cli_overrides_it() {
    let data = RunDir::new().with_raw("config.toml", "[view]\nindent = 4\nraw_json = false\n");
    let run = RunDir::new()
        .with_json("intent.json", json!({"goal": "x"}))
        .with_json("extra.json", json!({"k": 1}));

    blux(&data)
        .arg("--input-dir")
        .arg(run.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("{\n    \"goal\": \"x\"\n}"))
        .stdout(predicate::str::contains("Raw JSON: extra.json").not());

    blux(&data)
        .arg("--indent")
        .arg("2")
        .arg("--input-dir")
        .arg(run.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("{\n  \"goal\": \"x\"\n}"));
}

#[test]
fn no_raw_flag_skips_unknown_files() {
    let data = RunDir::new();
    let run = RunDir::new().with_json("extra.json", json!({"k": 1}));

    blux(&data)
        .arg("--input-dir")
        .arg(run.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("== Raw JSON: extra.json =="));

    blux(&data)
        .arg("--no-raw")
        .arg("--input-dir")
        .arg(run.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Raw JSON").not());
}
