use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cargo_bin() -> Command {
    Command::cargo_bin("bft").unwrap()
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn tokens_are_rewritten_to_generated_labels() {
    let dir = TempDir::new().unwrap();
    let map = write_file(
        &dir,
        "map.json",
        r#"{
  ">": "inc p\n",
  "<": "dec p\n",
  "+": "inc *p\n",
  "-": "dec *p\n",
  ".": "output\n",
  ",": "input\n",
  "[": "openlabel:\n",
  "]": "goto closelabel\n"
}"#,
    );
    let src = write_file(&dir, "program.bf", "[+]");

    cargo_bin()
        .arg("--label")
        .arg("-m")
        .arg(&map)
        .arg(&src)
        .assert()
        .success()
        .stdout("LB1:\ninc *p\ngoto LE1\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn every_token_occurrence_is_replaced() {
    let dir = TempDir::new().unwrap();
    let map = write_file(
        &dir,
        "map.json",
        r#"{
  "[": "openlabel: ; loop openlabel runs until closelabel\n",
  "]": "jnz openlabel\ncloselabel:\n"
}"#,
    );
    let src = write_file(&dir, "program.bf", "[]");

    cargo_bin()
        .arg("--label")
        .arg("-m")
        .arg(&map)
        .arg(&src)
        .assert()
        .success()
        .stdout(
            "LB1: ; loop LB1 runs until LE1\n\
             jnz LB1\n\
             LE1:\n",
        );
}

#[test]
fn no_standalone_label_lines_are_emitted() {
    // Map values without tokens come through untouched; the mode adds nothing.
    let dir = TempDir::new().unwrap();
    let map = write_file(&dir, "map.json", r#"{"[": "begin\n", "]": "end\n"}"#);
    let src = write_file(&dir, "program.bf", "[]");

    cargo_bin()
        .arg("--label")
        .arg("-m")
        .arg(&map)
        .arg(&src)
        .assert()
        .success()
        .stdout("begin\nend\n");
}

#[test]
fn matching_brackets_share_labels_across_nesting() {
    let dir = TempDir::new().unwrap();
    let map = write_file(
        &dir,
        "map.json",
        r#"{"[": "openlabel>\n", "]": "<closelabel\n"}"#,
    );
    let src = write_file(&dir, "program.bf", "[[]][]");

    cargo_bin()
        .arg("--label")
        .arg("-m")
        .arg(&map)
        .arg(&src)
        .assert()
        .success()
        .stdout(
            "LB1>\n\
             LB1_1>\n\
             <LE1_1\n\
             <LE1\n\
             LB2>\n\
             <LE2\n",
        );
}
