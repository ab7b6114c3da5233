//! End-to-end tests for the `org` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const DOC: &str = "* TODO Plan :work:\n** Step one\n** Step two :x:\n* Old :ARCHIVE:\n* Home :home:\n";

fn org_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".org")
        .tempfile()
        .expect("temp file");
    write!(file, "{content}").expect("write document");
    file
}

fn org() -> Command {
    let mut cmd = Command::cargo_bin("org").expect("binary to build");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_parse_prints_org() {
    let file = org_file("* A :t:\nbody\n");
    org()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("* A "))
        .stdout(predicate::str::contains(":t:\nbody\n"));
}

#[test]
fn test_parse_treeviz() {
    let file = org_file(DOC);
    org()
        .args(["parse", "--format", "treeviz"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("⧉ Document (5 nodes)"))
        .stdout(predicate::str::contains("│ └─ § Step two :x:"));
}

#[test]
fn test_query_subtree_and_reject() {
    let file = org_file(DOC);
    org()
        .args(["query", "--subtree", "Plan", "--reject-tag", "x", "--format", "json"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Step one"))
        .stdout(predicate::str::contains("Step two").not());
}

#[test]
fn test_query_no_archived_first() {
    let file = org_file(DOC);
    org()
        .args(["query", "--no-archived", "--sort", "headline", "--first"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("* Home"))
        .stdout(predicate::str::contains("Old").not());
}

#[test]
fn test_query_unknown_subtree() {
    let file = org_file(DOC);
    org()
        .args(["query", "--subtree", "Missing"])
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no heading named"));
}

#[test]
fn test_tags() {
    let file = org_file(DOC);
    org()
        .arg("tags")
        .arg(file.path())
        .assert()
        .success()
        .stdout("ARCHIVE\nhome\nwork\nx\n");
}

#[test]
fn test_keywords_override() {
    let file = org_file("* NEXT call back\n");
    org()
        .args(["parse", "--keywords", "NEXT,DONE", "--format", "yaml"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("todo: NEXT"));
}

#[test]
fn test_config_file_sets_default_format() {
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(config, "[format]\ndefault_format = \"treeviz\"").expect("write config");
    let file = org_file("* A\n");
    org()
        .arg("--config")
        .arg(config.path())
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("⧉ Document"));
}

#[test]
fn test_parse_error_exit_code() {
    let file = org_file("* A\n:LOGBOOK:\n");
    org()
        .arg("parse")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("drawer :LOGBOOK: found but :END: missed"));
}

#[test]
fn test_unknown_format() {
    let file = org_file("* A\n");
    org()
        .args(["parse", "--format", "docx"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format 'docx' not found"));
}

#[test]
fn test_formats_listing() {
    org()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("treeviz"))
        .stdout(predicate::str::contains("json"));
}
