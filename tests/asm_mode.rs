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

/// The built-in table plus assembly-style bracket values using ']'/'[' as
/// jump-target placeholders.
fn asm_map(dir: &TempDir) -> PathBuf {
    write_file(
        dir,
        "asm.json",
        r#"{
  ">": "inc p\n",
  "<": "dec p\n",
  "+": "inc *p\n",
  "-": "dec *p\n",
  ".": "output\n",
  ",": "input\n",
  "[": "while *p\n  goto ]\n",
  "]": "[\n  goto wend\n"
}"#,
    )
}

#[test]
fn brackets_get_label_lines_and_jump_targets() {
    let dir = TempDir::new().unwrap();
    let map = asm_map(&dir);
    let src = write_file(&dir, "program.bf", "[-]");

    cargo_bin()
        .arg("--asm")
        .arg("-m")
        .arg(&map)
        .arg(&src)
        .assert()
        .success()
        .stdout(
            "LB1:\n\
             while *p\n\
             \x20 goto LE1\n\
             dec *p\n\
             LB1\n\
             \x20 goto wend\n\
             LE1:\n",
        )
        .stderr(predicate::str::is_empty());
}

#[test]
fn sibling_loops_count_up_and_nested_loops_extend_the_parent() {
    let dir = TempDir::new().unwrap();
    let map = write_file(&dir, "map.json", r#"{"[": "jz ]\n", "]": "jnz [\n"}"#);
    let src = write_file(&dir, "program.bf", "[[][]]");

    cargo_bin()
        .arg("--asm")
        .arg("-m")
        .arg(&map)
        .arg(&src)
        .assert()
        .success()
        .stdout(
            "LB1:\njz LE1\n\
             LB1_1:\njz LE1_1\n\
             jnz LB1_1\nLE1_1:\n\
             LB1_2:\njz LE1_2\n\
             jnz LB1_2\nLE1_2:\n\
             jnz LB1\nLE1:\n",
        );
}

#[test]
fn asm_mode_applies_no_indentation() {
    let dir = TempDir::new().unwrap();
    let map = asm_map(&dir);
    let src = write_file(&dir, "program.bf", "[+]");

    cargo_bin()
        .arg("--asm")
        .arg("-m")
        .arg(&map)
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("\ninc *p\n"))
        .stdout(predicate::str::contains("    ").not());
}

#[test]
fn no_brackets_means_no_labels() {
    let dir = TempDir::new().unwrap();
    let map = asm_map(&dir);
    let src = write_file(&dir, "program.bf", "+.-");

    cargo_bin()
        .arg("--asm")
        .arg("-m")
        .arg(&map)
        .arg(&src)
        .assert()
        .success()
        .stdout("inc *p\noutput\ndec *p\n");
}

#[test]
fn default_mapping_works_in_asm_mode() {
    // Without placeholders in the map values, only the label lines are added.
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "program.bf", "[-]");

    cargo_bin()
        .arg("--asm")
        .arg(&src)
        .assert()
        .success()
        .stdout("LB1:\nwhile *p\ndec *p\nwend\nLE1:\n");
}

#[test]
fn asm_and_label_flags_conflict() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "program.bf", "+");

    cargo_bin()
        .arg("--asm")
        .arg("--label")
        .arg(&src)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
