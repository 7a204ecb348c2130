//! End-to-end transcript tests for the mimiq binary.
//!
//! Every test drives the real binary through a hidden `--mode` option that
//! swaps the system shell provider for a canned one, so the console
//! transcript and exit code of each scenario are byte-deterministic without
//! `xcrun` or `ffmpeg` installed. `MIMIQ_HOME` points at a scratch
//! directory to keep the working tree (`log/`, `temp/`) hermetic.

use assert_cmd::Command;
use predicates::prelude::*;

fn mimiq(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mimiq").expect("binary builds");
    cmd.env("MIMIQ_HOME", home.path());
    cmd
}

#[test]
fn record_no_homebrew() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["--mode", "no-homebrew"])
        .assert()
        .failure()
        .code(1)
        .stdout("💥 Missing Homebrew, please install Homebrew, for more visit https://brew.sh\n");
}

#[test]
fn record_no_ffmpeg() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["--mode", "no-ffmpeg"])
        .assert()
        .failure()
        .code(1)
        .stdout("💥 Missing FFMpeg, please install FFMpeg, by executing `brew install ffmpeg`\n");
}

#[test]
fn record_no_simulator() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["--mode", "no-simulator"])
        .assert()
        .failure()
        .code(1)
        .stdout("💥 No Available Simulator to mimiq\n");
}

#[test]
fn record_fail_record() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["--mode", "fail-record"])
        .assert()
        .failure()
        .code(1)
        .stdout("💥 Record Failed, Please Try Again\n");
}

#[test]
fn record_fail_make_output() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["--mode", "fail-make-output"])
        .assert()
        .failure()
        .code(1)
        .stdout("⚙️ Creating output...\n💥 Failed on Creating output, Please Try Again\n");
}

#[test]
fn record_success() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["--mode", "success"])
        .assert()
        .success()
        .stdout("⚙️ Creating output...\n✅ Grab your output at ~/Desktop/mimiq.gif\n");
}

#[test]
fn record_success_respects_output_kind() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["--mode", "success", "--output", "mp4"])
        .assert()
        .success()
        .stdout("⚙️ Creating output...\n✅ Grab your output at ~/Desktop/mimiq.mp4\n");
}

#[test]
fn record_success_via_explicit_subcommand() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["record", "--mode", "success"])
        .assert()
        .success()
        .stdout("⚙️ Creating output...\n✅ Grab your output at ~/Desktop/mimiq.gif\n");
}

#[test]
fn record_success_leaves_temp_empty() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home).args(["--mode", "success"]).assert().success();
    assert!(!home.path().join("temp").exists());
}

#[test]
fn record_failure_leaves_temp_empty() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home).args(["--mode", "fail-record"]).assert().failure();
    assert!(!home.path().join("temp").exists());
}

#[test]
fn record_writes_an_invocation_log() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home).args(["--mode", "success"]).assert().success();

    let logs: Vec<_> = std::fs::read_dir(home.path().join("log"))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].file_name().to_string_lossy().ends_with(".log"));
}

#[test]
fn list_with_simulators() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["list", "--mode", "available"])
        .assert()
        .success()
        .stdout(
            "Available Simulator to mimiq: \n\
             ✅ 00000000-0000-0000-0000-000000000000 Mimiq Simulator\n\
             ✅ 11111111-1111-1111-1111-111111111111 Mimiq Simulator #2\n",
        );
}

#[test]
fn list_without_simulators() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["list", "--mode", "none"])
        .assert()
        .success()
        .stdout("💥 No Available Simulator to mimiq\n");
}

#[test]
fn list_json_with_simulators() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["list", "--mode", "available", "--json"])
        .assert()
        .success()
        .stdout(
            "[{\"udid\":\"00000000-0000-0000-0000-000000000000\",\"name\":\"Mimiq Simulator\"},\
             {\"udid\":\"11111111-1111-1111-1111-111111111111\",\"name\":\"Mimiq Simulator #2\"}]\n",
        );
}

#[test]
fn list_json_without_simulators() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["list", "--mode", "none", "--json"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn version_prints_fixed_string() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(format!("current version {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn quality_lists_all_levels() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .arg("quality")
        .assert()
        .success()
        .stdout("Available Quality\n- low\n- medium\n- high\n");
}

#[test]
fn output_type_lists_all_kinds() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .arg("output-type")
        .assert()
        .success()
        .stdout("Available Output Type\n- gif\n- mov\n- mp4\n");
}

#[test]
fn clear_cache_is_idempotent() {
    let home = tempfile::tempdir().unwrap();

    // With a leftover artifact.
    let temp = home.path().join("temp");
    std::fs::create_dir_all(&temp).unwrap();
    std::fs::write(temp.join("leftover.mov"), b"x").unwrap();

    mimiq(&home).arg("clear-cache").assert().success();
    assert!(!temp.exists());

    // And again with nothing to remove.
    mimiq(&home).arg("clear-cache").assert().success();
    assert!(!temp.exists());
}

#[test]
fn verbose_flag_mirrors_log_to_stderr() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["--mode", "success", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("session state"));
}

#[test]
fn non_verbose_keeps_stderr_quiet() {
    let home = tempfile::tempdir().unwrap();
    mimiq(&home)
        .args(["--mode", "success"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
