use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("sample.txt");

    cmd.assert().success().stdout(str::contains("visit 41 position(s)"));
}

#[test]
fn part1_fails_on_missing_file() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("no_such_lab.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to read laboratory"));
}

#[test]
fn part1_fails_on_trapped_guard() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("trapped.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("patrols in a loop and never leaves"));
}
