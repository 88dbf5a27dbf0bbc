//! End-to-end tests for the `archocr` binary.

use std::fs;
use std::io::Read;

use assert_cmd::Command;
use predicates::prelude::*;

fn archocr() -> Command {
    let mut cmd = Command::cargo_bin("archocr").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_extract_from_stdin() {
    let output = archocr()
        .arg("extract")
        .write_stdin("Ф. 25, оп. 3, д. 117\nИванов Петр Сергеевич\n15 марта 1925")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["dates"], serde_json::json!(["15 марта 1925"]));
    assert_eq!(value["names"], serde_json::json!(["Иванов Петр Сергеевич"]));
    assert_eq!(
        value["archive_codes"],
        serde_json::json!(["Ф. 25", "оп. 3", "д. 117"])
    );
    assert_eq!(value["places"], serde_json::json!([]));
}

#[test]
fn test_extract_empty_input() {
    archocr()
        .arg("extract")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""dates": []"#))
        .stdout(predicate::str::contains(r#""places": []"#));
}

#[test]
fn test_extract_matches_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.txt");
    fs::write(&input, "1941 г. началась война").unwrap();

    archocr()
        .args(["extract", "--matches"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""pattern": "date_year""#))
        .stdout(predicate::str::contains(r#""text": "1941 г.""#));
}

#[test]
fn test_extract_clean_drops_noise_lines() {
    archocr()
        .args(["extract", "--clean", "--matches"])
        .write_stdin("Ф.\n  д. 5  \n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""start": 0"#))
        .stdout(predicate::str::contains(r#""text": "д. 5""#));
}

#[test]
fn test_export_writes_docx() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.docx");

    archocr()
        .args(["export", "--title", "Опись 3", "-o"])
        .arg(&output)
        .write_stdin("Первая строка\n\nВторая строка\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Document written to"));

    let file = fs::File::open(&output).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut document = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut document)
        .unwrap();

    assert!(document.contains(">Опись 3</w:t>"));
    assert!(document.contains(">Первая строка</w:t>"));
    assert!(document.contains(">Вторая строка</w:t>"));
}

#[test]
fn test_export_requires_output() {
    archocr()
        .arg("export")
        .write_stdin("text")
        .assert()
        .failure();
}

#[test]
fn test_config_init_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("config.json");

    archocr()
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    archocr()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "ocr.language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rus\""));

    archocr()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "server.port", "9001"])
        .assert()
        .success();

    archocr()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "server.port"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9001"));

    archocr()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "server.nope"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();

    archocr()
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_extra_patterns_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"extraction": {"extra_patterns": [{"category": "place", "pattern": "г\\.\\s*[А-ЯЁ][а-яё]+"}]}}"#,
    )
    .unwrap();

    archocr()
        .arg("-c")
        .arg(&config)
        .arg("extract")
        .write_stdin("Протокол, г. Тверь")
        .assert()
        .success()
        .stdout(predicate::str::contains("г. Тверь"));
}

#[test]
fn test_process_missing_file() {
    archocr()
        .args(["process", "does-not-exist.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}
