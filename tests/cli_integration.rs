//! Runs the `waste-sim` binary with scenario files, presets, and overrides.

use std::process::{Command, Output};

fn waste_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_waste-sim"))
        .args(args)
        .output()
        .expect("waste-sim process should run")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

#[test]
fn scenario_file_prints_every_section() {
    let output = waste_sim(&["--scenario", "scenarios/baseline.toml"]);
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = stdout_of(&output);
    for section in [
        "--- Waste Hours ---",
        "--- Waste Report ---",
        "--- Waste by Device ---",
        "--- Peak Hours ---",
    ] {
        assert!(stdout.contains(section), "missing {section} in:\n{stdout}");
    }
    assert!(stdout.contains("Waste hours:      "));
    assert!(stdout.contains(" of 168"));
    assert!(stdout.contains("Top waste device: "), "stdout:\n{stdout}");
    assert!(
        stdout
            .lines()
            .last()
            .is_some_and(|l| l.starts_with("Reduction applied: 50%. Estimated savings: "))
    );
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = waste_sim(&["--preset", "single_day", "--seed", "9"]);
    let b = waste_sim(&["--preset", "single_day", "--seed", "9"]);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
    assert!(stdout_of(&a).contains(" of 24"));
}

#[test]
fn overrides_apply_on_top_of_scenario() {
    let output = waste_sim(&[
        "--scenario",
        "scenarios/month_full_reduction.toml",
        "--days",
        "2",
        "--reduction",
        "25",
    ]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains(" of 48"));
    assert!(stdout.contains("Reduction applied: 25%."));
}

#[test]
fn export_writes_csv() {
    let path = std::env::temp_dir().join("waste_sim_cli_export_test.csv");
    let path_str = path.to_str().expect("temp path should be UTF-8");
    let output = waste_sim(&["--days", "3", "--seed", "4", "--export", path_str]);
    assert!(output.status.success());

    let csv = std::fs::read_to_string(&path).expect("export file should exist");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("timestamp,total_kwh,is_waste,adjusted_kwh")
    );
    assert_eq!(lines.next().map(|l| l.starts_with("2025-01-01 00:00:00,")), Some(true));
    assert_eq!(csv.lines().count(), 73);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn out_of_range_days_fail() {
    let output = waste_sim(&["--days", "31"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation.days"), "stderr={stderr}");
}

#[test]
fn out_of_range_reduction_fails() {
    let output = waste_sim(&["--reduction", "150"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation.reduction_percent"), "stderr={stderr}");
}

#[test]
fn unknown_argument_fails_with_usage() {
    let output = waste_sim(&["--verbose"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown argument: --verbose"));
    assert!(stderr.contains("Usage: waste-sim"));
}

#[test]
fn unknown_preset_fails() {
    let output = waste_sim(&["--preset", "decade"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}
