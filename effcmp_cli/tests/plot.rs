#![allow(missing_docs)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::{path, str};

#[test]
fn stdout() {
    Command::cargo_bin("effcmp")
        .unwrap()
        .args(["plot", "--stdout", "tests/data/config.yaml"])
        .assert()
        .success()
        .stdout(str::contains("ylog = False"))
        .stdout(str::contains("ylog = True"))
        .stdout(str::contains("ratio_ylim = (7e-1, 1.3e0)"))
        .stdout(str::contains("\"eff_vs_eta.pdf\""))
        .stdout(str::contains("\"pt.pdf\""))
        .stdout(str::contains("\"v\", \"#0000ff\""));
}

#[test]
fn output_directory() {
    let output = TempDir::new().unwrap();

    Command::cargo_bin("effcmp")
        .unwrap()
        .args([
            "plot",
            "--threads=2",
            "-o",
            output.path().to_str().unwrap(),
            "tests/data/config.yaml",
        ])
        .assert()
        .success()
        .stdout("");

    output.child("eff_vs_eta.py").assert(path::exists());
    output
        .child("pt.py")
        .assert(str::contains("\"label\": \"Reference\""));
}

#[test]
fn failing_plot() {
    let output = TempDir::new().unwrap();

    Command::cargo_bin("effcmp")
        .unwrap()
        .args([
            "plot",
            "-o",
            output.path().to_str().unwrap(),
            "tests/data/broken.yaml",
        ])
        .assert()
        .failure()
        .stderr(str::contains("does not contain 'tracks/missing'"));

    output.child("eff_vs_eta.py").assert(path::exists());
    output.child("missing.py").assert(path::missing());
}

#[test]
fn missing_configuration() {
    Command::cargo_bin("effcmp")
        .unwrap()
        .args(["plot", "tests/data/does-not-exist.yaml"])
        .assert()
        .failure()
        .stderr(str::contains("unable to open 'tests/data/does-not-exist.yaml'"));
}
