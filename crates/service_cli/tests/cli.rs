//! End-to-end tests of the `lattice-sweep` binary.
//!
//! Each test runs the compiled binary inside its own temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn lattice_sweep(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lattice-sweep"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("LATTICE_SWEEP_OUTPUT_DIR")
        .env_remove("LATTICE_SWEEP_LOG_LEVEL")
        .output()
        .expect("failed to run lattice-sweep")
}

fn data_lines(path: &Path) -> Vec<(usize, f64)> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| {
            let (steps, npv) = line.split_once(' ').unwrap();
            (steps.parse().unwrap(), npv.parse().unwrap())
        })
        .collect()
}

#[test]
fn test_default_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let output = lattice_sweep(dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    for name in ["data_cpp4.txt", "data_cpp2.txt"] {
        let lines = data_lines(&dir.path().join(name));
        assert_eq!(lines.len(), 597);
        let steps: Vec<usize> = lines.iter().map(|(s, _)| *s).collect();
        assert_eq!(steps, (3..600).collect::<Vec<_>>());
        assert!(lines.iter().all(|(_, npv)| *npv > 4.0 && *npv < 4.3));
    }

    let stdout = String::from_utf8(output.stdout).unwrap();
    let oscillating = stdout.find("Binomial Tree with oscillations resolution scheme").unwrap();
    let plain = stdout.find("Binomial Tree without oscillations resolution scheme").unwrap();
    assert!(oscillating < plain);
    assert_eq!(stdout.matches("| Time Step  | Value | Elapsed Time ").count(), 2);
    assert_eq!(stdout.lines().filter(|l| l.ends_with(" s")).count(), 2 * 597);
}

#[test]
fn test_short_sweep_with_summary() {
    let dir = tempfile::tempdir().unwrap();
    let output = lattice_sweep(
        dir.path(),
        &[
            "sweep",
            "--min-steps",
            "5",
            "--max-steps",
            "15",
            "--output-dir",
            "out",
            "--summary",
            "summary.csv",
            "--quiet",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let out = dir.path().join("out");
    let oscillating = data_lines(&out.join("data_cpp4.txt"));
    let plain = data_lines(&out.join("data_cpp2.txt"));
    assert_eq!(oscillating.len(), 10);
    assert_eq!(plain.len(), 10);
    assert_eq!(oscillating.first().map(|l| l.0), Some(5));
    assert_eq!(plain.last().map(|l| l.0), Some(14));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 11);
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lattice-sweep.toml"),
        r#"
        [sweep]
        max_steps = 8
        tree = "crr"

        [output]
        plain_file = "plain.txt"
        table = false
        "#,
    )
    .unwrap();

    let output = lattice_sweep(dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(data_lines(&dir.path().join("plain.txt")).len(), 5);
    assert_eq!(data_lines(&dir.path().join("data_cpp4.txt")).len(), 5);
}

#[test]
fn test_malformed_scenario_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.toml"),
        r#"
        [scenario]
        volatilities = [
            { months = 6, value = 0.25 },
            { months = 3, value = 0.20 },
        ]
        "#,
    )
    .unwrap();

    let output = lattice_sweep(dir.path(), &["--config", "bad.toml", "sweep", "--quiet"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
    assert!(!dir.path().join("data_cpp4.txt").exists());
}

#[test]
fn test_missing_config_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = lattice_sweep(dir.path(), &["--config", "absent.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.toml"));
}

#[test]
fn test_invalid_step_range_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = lattice_sweep(dir.path(), &["sweep", "--min-steps", "2", "--quiet"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("min_steps"));
}

#[test]
fn test_price_command() {
    let dir = tempfile::tempdir().unwrap();
    let output = lattice_sweep(dir.path(), &["price", "--steps", "101", "--tree", "leisen-reimer"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 6);
    assert!(stdout.contains("American leisen-reimer (none)"));
    assert!(stdout.contains("European Black-Scholes"));
}
