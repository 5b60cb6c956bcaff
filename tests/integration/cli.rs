//! `list` and `validate` through the binary.

use debdata::test_utils::SourceTree;
use predicates::prelude::*;

use crate::common::debdata_cmd;

fn sample_tree() -> SourceTree {
    let tree = SourceTree::new().unwrap();
    tree.file("dist/bin/tool", "#!/bin/sh").unwrap();
    tree.descriptor(
        r#"
        [[data]]
        type = "directory"
        src = "dist"

        [[data]]
        type = "link"
        link_name = "usr/bin/tool"
        link_target = "/opt/tool/bin/tool"
        "#,
    )
    .unwrap();
    tree
}

#[test]
fn test_list_text() {
    let tree = sample_tree();

    debdata_cmd()
        .arg("list")
        .arg(tree.join("debdata.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 directory"))
        .stdout(predicate::str::contains("dir      0755 root/root        0 bin"))
        .stdout(predicate::str::contains("bin/tool"))
        .stdout(predicate::str::contains("usr/bin/tool -> /opt/tool/bin/tool"));
}

#[test]
fn test_list_json() {
    let tree = sample_tree();

    let output = debdata_cmd()
        .args(["list", "--format", "json"])
        .arg(tree.join("debdata.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sources = json.as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["type"], "directory");
    assert_eq!(sources[0]["entries"].as_array().unwrap().len(), 2);
    assert_eq!(sources[1]["entries"][0]["kind"], "symlink");
    assert_eq!(sources[1]["entries"][0]["target"], "/opt/tool/bin/tool");
}

#[test]
fn test_list_missing_source_fails() {
    let tree = SourceTree::new().unwrap();
    tree.descriptor("[[data]]\ntype = \"file\"\nsrc = \"absent.conf\"\n").unwrap();

    debdata_cmd()
        .arg("list")
        .arg(tree.join("debdata.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Data source not found"));
}

#[test]
fn test_validate_reports_every_invalid_table() {
    let tree = SourceTree::new().unwrap();
    tree.descriptor(
        r#"
        [[data]]
        type = "tarball"

        [[data]]
        type = "template"
        paths = ["var/lib/app"]

        [[data]]
        type = "dependency"
        artifact = "org.example"
        "#,
    )
    .unwrap();

    debdata_cmd()
        .arg("validate")
        .arg(tree.join("debdata.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ #1 Unknown type 'tarball'"))
        .stdout(predicate::str::contains("✓ #2 template"))
        .stdout(predicate::str::contains("✗ #3"))
        .stderr(predicate::str::contains("2 of 3 data sources"));
}

#[test]
fn test_validate_success() {
    let tree = sample_tree();

    debdata_cmd()
        .arg("validate")
        .arg(tree.join("debdata.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("2 data sources are valid"));
}

#[test]
fn test_missing_descriptor() {
    let tree = SourceTree::new().unwrap();

    debdata_cmd()
        .arg("validate")
        .arg(tree.join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.toml"));
}
