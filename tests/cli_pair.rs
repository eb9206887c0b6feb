use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn command_pair() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("bgcdist")?;
    let output = cmd
        .arg("pair")
        .arg("tests/bgc/annotation.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("P2")
        .arg("P1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 1);
    assert_eq!(
        stdout,
        "P2\tP1\t0.500000\t0.759572\t0.000000\t0.439893\t0.560107\n"
    );

    Ok(())
}

#[test]
fn command_pair_symmetric() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("bgcdist")?;
    let output = cmd
        .arg("pair")
        .arg("tests/bgc/annotation.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("P1")
        .arg("P3")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.starts_with("P1\tP3\t0.000000\t"));
    assert!(stdout.trim_end().ends_with("\t0.848367"));

    Ok(())
}

#[test]
fn command_pair_unknown() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("bgcdist")?;
    cmd.arg("pair")
        .arg("tests/bgc/annotation.tsv")
        .arg("tests/bgc/identity.tsv")
        .arg("P1")
        .arg("P9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown cluster: P9"));

    Ok(())
}
