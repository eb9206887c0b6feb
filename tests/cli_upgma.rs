use assert_cmd::prelude::*;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn command_upgma() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("bgcdist")?;
    let output = cmd.arg("upgma").arg("tests/bgc/distance.csv").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 1);
    // P1 and P2 merge at 0.560107 / 2
    assert!(stdout.contains("(P1:0.28005"));
    assert!(stdout.contains(",P2:0.28005"));
    assert!(stdout.starts_with("(P3:0.4173"));

    Ok(())
}

#[test]
fn command_upgma_from_phylip_like() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("input.csv");
    let output = temp.path().join("output.nwk");

    // upper triangle is ignored
    let content = ",A,B,C,D
A,0,7,11,14
B,7,0,6,9
C,11,6,0,7
D,14,9,7,0
";
    std::fs::write(&input, content)?;

    let mut cmd = Command::cargo_bin("bgcdist")?;
    cmd.arg("upgma")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let nwk = std::fs::read_to_string(&output)?;
    // B-C=6 (min), so B and C merge first at height 3.
    // Then D merges with (B,C) at height 4.
    // Finally A merges with ((B,C),D) at height 5.333.
    assert!(nwk.contains("(B:3,C:3)"));
    assert!(nwk.contains("D:4"));
    assert!(nwk.contains("A:5.33"));

    Ok(())
}

#[test]
fn command_upgma_na() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("input.csv");
    std::fs::write(&input, ",P1,P4\nP1,0,\nP4,NA,0\n")?;

    let mut cmd = Command::cargo_bin("bgcdist")?;
    let output = cmd.arg("upgma").arg(&input).output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(!output.status.success());
    assert!(stderr.contains("no value for (P4, P1)"));

    Ok(())
}
