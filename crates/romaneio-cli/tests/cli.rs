//! End-to-end tests for the romaneio binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn romaneio() -> Command {
    Command::cargo_bin("romaneio").unwrap()
}

#[test]
fn help_lists_subcommands() {
    romaneio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn extract_reads_a_token_dump() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("manifesto.json");
    std::fs::write(
        &dump,
        r#"[
            {"text": "PLACA", "x": 10.0, "y": 20.0, "page": 1},
            {"text": "ABC-1234", "x": 60.0, "y": 20.0, "page": 1},
            {"text": "MODELO", "x": 10.0, "y": 40.0, "page": 1},
            {"text": "GOL", "x": 60.0, "y": 40.0, "page": 1},
            {"text": "(11) 98765-4321", "x": 10.0, "y": 60.0, "page": 1}
        ]"#,
    )
    .unwrap();

    romaneio()
        .args(["extract", dump.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC1234"))
        .stdout(predicate::str::contains("GOL"))
        .stdout(predicate::str::contains("11987654321"));
}

#[test]
fn extract_csv_carries_header_and_row() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("manifesto.json");
    std::fs::write(
        &dump,
        r#"[{"text": "ABC1D23 contato (21) 4002-8922", "x": 0.0, "y": 0.0, "page": 1}]"#,
    )
    .unwrap();

    romaneio()
        .args(["extract", dump.to_str().unwrap(), "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plate,model,origin"))
        .stdout(predicate::str::contains("ABC1D23"));
}

#[test]
fn extract_rejects_missing_input() {
    romaneio()
        .args(["extract", "/nonexistent/never-*.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn run_no_dispatch_persists_records() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("manifesto.json");
    std::fs::write(
        &dump,
        r#"[{"text": "Placa XYZ1A23 contato (11) 98765-4321", "x": 0.0, "y": 0.0, "page": 1}]"#,
    )
    .unwrap();
    let store = dir.path().join("records.jsonl");
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        format!(r#"{{"store": {{"path": {:?}}}}}"#, store.to_str().unwrap()),
    )
    .unwrap();

    romaneio()
        .args([
            "--config",
            config.to_str().unwrap(),
            "run",
            dump.to_str().unwrap(),
            "--no-dispatch",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("XYZ1A23"));

    let contents = std::fs::read_to_string(&store).unwrap();
    assert!(contents.contains("\"plate\":\"XYZ1A23\""));
    assert!(contents.contains("\"status\":\"collect\""));
    assert!(contents.contains("\"liberation\":\"pending\""));

    // a second run finds the plate already persisted and appends nothing
    romaneio()
        .args([
            "--config",
            config.to_str().unwrap(),
            "run",
            dump.to_str().unwrap(),
            "--no-dispatch",
        ])
        .assert()
        .success();
    let again = std::fs::read_to_string(&store).unwrap();
    assert_eq!(again.lines().count(), contents.lines().count());
}
