use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const WORDS: &str = "i go will the cat sat on mat here is\n";

/// A scratch directory with a word list and isolated config/data dirs.
fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("words.txt"), WORDS).unwrap();
    dir
}

fn spellfix(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spellfix").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("XDG_DATA_HOME", dir.join("data"))
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn check_reports_misspellings_and_fails() {
    let dir = workspace();
    fs::write(dir.path().join("note.txt"), "I wil go\n").unwrap();

    spellfix(dir.path())
        .args(["--dictionary", "words.txt", "note.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1:3 wil"))
        .stdout(predicate::str::contains("→ will"))
        .stdout(predicate::str::contains("1 error found in 1 input"));
}

#[test]
fn check_with_no_fail_succeeds() {
    let dir = workspace();
    fs::write(dir.path().join("note.txt"), "I wil go\n").unwrap();

    spellfix(dir.path())
        .args(["--no-fail", "-d", "words.txt", "note.txt"])
        .assert()
        .success();
}

#[test]
fn check_clean_text() {
    let dir = workspace();

    spellfix(dir.path())
        .args(["-d", "words.txt", "--text", "The cat sat on the mat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No spelling errors found"));
}

#[test]
fn json_output() {
    let dir = workspace();

    let output = spellfix(dir.path())
        .args(["-d", "words.txt", "-o", "json", "--text", "Teh cat"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["total_errors"], 1);
    assert_eq!(report["errors"][0]["word"], "Teh");
    assert_eq!(report["errors"][0]["suggestions"][0], "the");
}

#[test]
fn fix_inline_text() {
    let dir = workspace();

    spellfix(dir.path())
        .args(["--fix", "-d", "words.txt", "--text", "I wil go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("I will go"))
        .stdout(predicate::str::contains("1 correction applied"));
}

#[test]
fn fix_file_in_place() {
    let dir = workspace();
    let note = dir.path().join("note.txt");
    fs::write(&note, "Teh cat sat on teh mat.\n").unwrap();

    spellfix(dir.path())
        .args(["--fix", "-d", "words.txt", "note.txt"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&note).unwrap(), "The cat sat on the mat.\n");
}

#[test]
fn local_config_selects_dictionary() {
    let dir = workspace();
    fs::write(dir.path().join(".spellfix.toml"), "dictionary = \"words.txt\"\n").unwrap();

    spellfix(dir.path())
        .args(["--text", "I will go here"])
        .assert()
        .success();
}

#[test]
fn personal_dictionary_adds_words() {
    let dir = workspace();
    fs::write(dir.path().join("personal.txt"), "# team words\nspellfix\n").unwrap();

    spellfix(dir.path())
        .args([
            "-d",
            "words.txt",
            "--personal-dict",
            "personal.txt",
            "--text",
            "I will go spellfix",
        ])
        .assert()
        .success();
}

#[test]
fn missing_dictionary_file() {
    let dir = workspace();

    spellfix(dir.path())
        .args(["-d", "nope.txt", "--text", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read dictionary"));
}

#[test]
fn interactive_requires_fix() {
    let dir = workspace();

    spellfix(dir.path())
        .args(["--interactive", "--text", "hello"])
        .assert()
        .failure();
}

#[test]
fn no_input_is_an_error() {
    let dir = workspace();

    spellfix(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files specified"));
}

#[test]
fn shell_completion() {
    let dir = workspace();

    spellfix(dir.path())
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spellfix"));
}
