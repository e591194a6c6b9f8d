#![allow(missing_docs)]

use assert_cmd::Command;
use predicates::str;

const BINNED_ROWS: [&str; 3] = [
    "0    0     1  1.000e0 7.071e-1",
    "1    1     2 2.500e-1 1.398e-1",
    "2    2     4  4.000e0 8.944e-1",
];

#[test]
fn binned() {
    let mut assert = Command::cargo_bin("effcmp")
        .unwrap()
        .args([
            "ratio",
            "tests/data/reference.yaml",
            "tests/data/test.yaml",
            "tracks/pt",
        ])
        .assert()
        .success();

    for row in BINNED_ROWS {
        assert = assert.stdout(str::contains(row));
    }
}

#[test]
fn sampled_with_outliers() {
    Command::cargo_bin("effcmp")
        .unwrap()
        .args([
            "ratio",
            "--range=0.7,1.3",
            "--digits=2",
            "tests/data/reference.yaml",
            "tests/data/test.yaml",
            "tracks/eff_vs_eta",
        ])
        .assert()
        .success()
        .stdout(str::contains("5.00e-1"))
        .stdout(str::contains("1.10e0"))
        .stdout(str::contains("-3.00e0 below"));
}

#[test]
fn empty_range() {
    Command::cargo_bin("effcmp")
        .unwrap()
        .args([
            "ratio",
            "--range=1.3,0.7",
            "tests/data/reference.yaml",
            "tests/data/test.yaml",
            "tracks/pt",
        ])
        .assert()
        .failure()
        .stderr(str::contains("range [1.3, 0.7] is empty"));
}

#[test]
fn missing_curve() {
    Command::cargo_bin("effcmp")
        .unwrap()
        .args([
            "ratio",
            "tests/data/reference.yaml",
            "tests/data/test.yaml",
            "tracks/missing",
        ])
        .assert()
        .failure()
        .stderr(str::contains(
            "'tests/data/reference.yaml' does not contain 'tracks/missing'",
        ));
}
