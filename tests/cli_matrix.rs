use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn command_matrix() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("bgcdist")?;
    let output = cmd
        .arg("matrix")
        .arg("tests/bgc/annotation.tsv")
        .arg("tests/bgc/identity.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 4);
    assert_eq!(
        stdout,
        ",P1,P2,P3\nP1,0,,\nP2,0.560107,0,\nP3,0.848367,0.820867,0\n"
    );

    Ok(())
}

#[test]
fn command_matrix_tree() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let matrix = temp.path().join("distance.csv");
    let tree = temp.path().join("upgma.nwk");

    let mut cmd = Command::cargo_bin("bgcdist")?;
    cmd.arg("matrix")
        .arg("tests/bgc/annotation.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("-o")
        .arg(&matrix)
        .arg("--tree")
        .arg(&tree)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&matrix)?;
    assert!(csv.starts_with(",P1,P2,P3\n"));

    // P1 and P2 merge first at half their distance
    let nwk = std::fs::read_to_string(&tree)?;
    assert!(nwk.starts_with("(P3:0.41"));
    assert!(nwk.contains("(P1:0.28"));
    assert!(nwk.contains("P2:0.28"));
    assert!(nwk.trim_end().ends_with(");"));

    Ok(())
}

#[test]
fn command_matrix_weights() -> anyhow::Result<()> {
    // Jaccard only
    let mut cmd = Command::cargo_bin("bgcdist")?;
    let output = cmd
        .arg("matrix")
        .arg("tests/bgc/annotation.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("--jaccard")
        .arg("1")
        .arg("--dds")
        .arg("0")
        .arg("--gk")
        .arg("0")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("P2,0.500000,0,\n"));
    assert!(stdout.contains("P3,1.000000,1.000000,0\n"));

    Ok(())
}

#[test]
fn command_matrix_single_norm() -> anyhow::Result<()> {
    // DDS only: P2 vs P1 is exp(-1.1 / 2)
    let mut cmd = Command::cargo_bin("bgcdist")?;
    let output = cmd
        .arg("matrix")
        .arg("tests/bgc/annotation.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("--jaccard")
        .arg("0")
        .arg("--dds")
        .arg("1")
        .arg("--gk")
        .arg("0")
        .arg("--single-norm")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("P2,0.423050,0,\n"));

    Ok(())
}

#[test]
fn command_matrix_missing() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("bgcdist")?;
    let output = cmd
        .arg("matrix")
        .arg("tests/bgc/missing.tsv")
        .arg("tests/bgc/identity.tsv")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert!(stdout.contains("P4,NA,0\n"));
    assert!(stderr.contains("P4|c1"));

    let mut cmd = Command::cargo_bin("bgcdist")?;
    let output = cmd
        .arg("matrix")
        .arg("tests/bgc/missing.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("--missing")
        .arg("skip")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("P4,0.250000,0\n"));

    Ok(())
}

#[test]
fn command_matrix_missing_tree() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let tree = temp.path().join("upgma.nwk");

    let mut cmd = Command::cargo_bin("bgcdist")?;
    cmd.arg("matrix")
        .arg("tests/bgc/missing.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("--tree")
        .arg(&tree)
        .assert()
        .failure();

    Ok(())
}

#[test]
fn command_matrix_invalid_args() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("bgcdist")?;
    cmd.arg("matrix")
        .arg("tests/bgc/annotation.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("--nbhood")
        .arg("1")
        .assert()
        .failure();

    let mut cmd = Command::cargo_bin("bgcdist")?;
    cmd.arg("matrix")
        .arg("tests/bgc/annotation.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("--missing")
        .arg("zero")
        .assert()
        .failure();

    for (flag, value) in [
        ("--jaccard", "-2"),
        ("--dds", "inf"),
        ("--gk", "NaN"),
        ("--scale", "NaN"),
        ("--scale", "0"),
    ] {
        let mut cmd = Command::cargo_bin("bgcdist")?;
        cmd.arg("matrix")
            .arg("tests/bgc/annotation.tsv")
            .arg("tests/bgc/identity.tsv")
            .arg(format!("{}={}", flag, value))
            .assert()
            .failure()
            .stderr(predicate::str::contains(flag));
    }

    Ok(())
}
