//! Whole descriptors loaded from disk.

use debdata::config::PackageDescriptor;
use debdata::core::DebdataError;
use debdata::producer::{EntryKind, ResolvedEntry};
use debdata::source::validate_all;
use debdata::test_utils::SourceTree;

fn produce_all(descriptor: &PackageDescriptor) -> anyhow::Result<Vec<ResolvedEntry>> {
    let artifacts = descriptor.artifact_set();
    let mut entries: Vec<ResolvedEntry> = Vec::new();
    for source in validate_all(&descriptor.data)? {
        source.produce(&artifacts, &mut entries)?;
    }
    Ok(entries)
}

#[test]
fn test_full_descriptor() {
    let tree = SourceTree::new().unwrap();
    tree.file("dist/bin/app", "#!/bin/sh\nexec java -jar app.jar\n").unwrap();
    tree.file("dist/README.md", "docs").unwrap();
    tree.file("target/app-server-1.4.0.jar", "jar").unwrap();
    let path = tree
        .descriptor(
            r#"
            [[data]]
            type = "directory"
            src = "dist"
            excludes = "*.md"

            [data.mapper]
            type = "perm"
            prefix = "/opt/app"
            user = "app"
            filemode = "0755"

            [[data]]
            type = "dependency"
            artifact = "org.example:app-server"
            dst = "opt/app/lib/app-server.jar"

            [[data]]
            type = "file"
            src = "packaging/app.service"
            missingSrc = "IGNORE"

            [[data]]
            type = "link"
            linkName = "usr/bin/app"
            linkTarget = "/opt/app/bin/app"

            [[data]]
            type = "template"
            paths = ["var/log/app"]

            [[artifact]]
            groupId = "org.example"
            artifactId = "app-server"
            file = "target/app-server-1.4.0.jar"
            "#,
        )
        .unwrap();

    let descriptor = PackageDescriptor::load(&path).unwrap();
    let entries = produce_all(&descriptor).unwrap();

    let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "/opt/app/bin",
            "/opt/app/bin/app",
            "opt/app/lib/app-server.jar",
            "usr/bin/app",
            "var/log/app"
        ]
    );

    assert_eq!(entries[1].user, "app");
    assert_eq!(entries[1].mode, 0o755);
    assert_eq!(entries[2].user, "root");
    assert_eq!(entries[2].mode, 0o644);
    assert!(matches!(entries[3].kind, EntryKind::Link { symbolic: true, .. }));
}

#[test]
fn test_invalid_table_stops_before_any_production() {
    let tree = SourceTree::new().unwrap();
    let path = tree
        .descriptor(
            r#"
            [[data]]
            type = "template"
            paths = ["var/lib/app"]

            [[data]]
            type = "link"
            link_name = "usr/bin/app"
            "#,
        )
        .unwrap();

    let descriptor = PackageDescriptor::load(&path).unwrap();
    let err = produce_all(&descriptor).unwrap_err();
    let err = err.downcast_ref::<DebdataError>().unwrap();

    assert!(matches!(err, DebdataError::ConfigurationError { .. }));
    assert!(err.to_string().contains("data source #2"));
    assert!(err.to_string().contains("link_target is not set"));
}

#[test]
fn test_empty_src_goes_through_missing_source_policy() {
    let tree = SourceTree::new().unwrap();
    tree.file("secret.txt", "do not package").unwrap();
    let path = tree
        .descriptor("[[data]]\ntype = \"directory\"\nsrc = \"\"\nmissing_src = \"ignore\"\n")
        .unwrap();

    let descriptor = PackageDescriptor::load(&path).unwrap();
    assert!(produce_all(&descriptor).unwrap().is_empty());

    let path = tree.descriptor("[[data]]\ntype = \"directory\"\nsrc = \"\"\n").unwrap();
    let descriptor = PackageDescriptor::load(&path).unwrap();
    let err = produce_all(&descriptor).unwrap_err();
    assert!(matches!(err.downcast_ref::<DebdataError>(), Some(DebdataError::SourceNotFound { .. })));
}

#[test]
fn test_unknown_descriptor_field_is_parse_error() {
    let tree = SourceTree::new().unwrap();
    let path = tree.descriptor("[[data]]\ntype = \"file\"\nsource = \"x\"\n").unwrap();

    let err = PackageDescriptor::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
