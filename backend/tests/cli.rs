use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn matrixops() -> Command {
    Command::cargo_bin("matrixops").unwrap()
}

#[test]
fn run_transpose_prints_result() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("matrix.csv");
    fs::write(&input, "1,2,3\n4,5,6\n7,8,9").unwrap();

    matrixops()
        .arg("run")
        .arg("transpose")
        .arg(&input)
        .assert()
        .success()
        .stdout("1,4,7\n2,5,8\n3,6,9\n");
}

#[test]
fn run_accepts_invert_alias() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("matrix.csv");
    fs::write(&input, "1,2\n3,4").unwrap();

    matrixops()
        .args(["run", "invert"])
        .arg(&input)
        .assert()
        .success()
        .stdout("1,3\n2,4\n");
}

#[test]
fn run_writes_output_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("matrix.tsv");
    let output = dir.path().join("sum.txt");
    fs::write(&input, "1\t2\n3\t4").unwrap();

    matrixops()
        .args(["run", "sum"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "10");
}

#[test]
fn run_reports_core_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("matrix.csv");
    fs::write(&input, "1,2,3\n4,5,6").unwrap();

    matrixops()
        .args(["run", "sum"])
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must be square"));
}

#[test]
fn run_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("matrix.txt");
    fs::write(&input, "1").unwrap();

    matrixops()
        .args(["run", "echo"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
fn run_rejects_unknown_operation() {
    matrixops()
        .args(["run", "divide", "matrix.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown operation"));
}

#[test]
fn formats_lists_registered_parsers() {
    matrixops()
        .arg("formats")
        .assert()
        .success()
        .stdout("CSV\nTSV\n");
}

#[test]
fn operations_lists_all_five() {
    matrixops()
        .arg("operations")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("echo")
                .and(predicate::str::contains("transpose"))
                .and(predicate::str::contains("flatten"))
                .and(predicate::str::contains("sum"))
                .and(predicate::str::contains("multiply")),
        );
}
