//! Source types resolved through the built-in producers.

use debdata::artifact::{ArtifactRecord, ArtifactSet};
use debdata::config::DataConfig;
use debdata::core::DebdataError;
use debdata::producer::{EntryContent, EntryKind};
use debdata::test_utils::{SourceTree, init_test_logging};

use crate::common::{names, produce};

#[test]
fn test_directory_source_with_filters() {
    init_test_logging(None);
    let tree = SourceTree::new().unwrap();
    tree.file("dist/bin/server", "#!/bin/sh").unwrap();
    tree.file("dist/lib/server.jar", "jar").unwrap();
    tree.file("dist/lib/server.jar.sha1", "abc").unwrap();
    tree.file("dist/.gitignore", "*.log").unwrap();
    tree.dir("dist/logs").unwrap();

    let config = DataConfig::of_type("directory")
        .with_src(tree.join("dist"))
        .with_filters(Some("bin/**, lib/**"), Some("**/*.sha1"));
    let entries = produce(&config, &ArtifactSet::default()).unwrap();

    assert_eq!(names(&entries), vec!["bin", "bin/server", "lib", "lib/server.jar"]);
}

#[test]
fn test_archive_source() {
    let tree = SourceTree::new().unwrap();
    let archive = tree
        .zip("web.zip", &[("static/", ""), ("static/index.html", "<html/>"), ("LICENSE", "MIT")])
        .unwrap();

    let config = DataConfig::of_type("ARCHIVE").with_src(&archive).with_filters(None, Some("LICENSE"));
    let entries = produce(&config, &ArtifactSet::default()).unwrap();

    assert_eq!(names(&entries), vec!["static", "static/index.html"]);
    assert_eq!(entries[1].kind, EntryKind::File(EntryContent::Bytes(b"<html/>".to_vec())));
}

#[test]
fn test_file_source_named_by_dst() {
    let tree = SourceTree::new().unwrap();
    let src = tree.file("packaging/app.service", "[Unit]").unwrap();

    let config = DataConfig::of_type("file").with_src(&src).with_dst("lib/systemd/system/app.service");
    let entries = produce(&config, &ArtifactSet::default()).unwrap();

    assert_eq!(names(&entries), vec!["lib/systemd/system/app.service"]);
    assert_eq!(entries[0].kind, EntryKind::File(EntryContent::Path(src)));
}

#[test]
fn test_dependency_source_resolves_first_matching_artifact() {
    let tree = SourceTree::new().unwrap();
    let first = tree.file("repo/app-1.0.jar", "first").unwrap();
    let second = tree.file("repo/app-2.0.jar", "second").unwrap();
    let artifacts = ArtifactSet::new(vec![
        ArtifactRecord::new("org.example", "app", &first),
        ArtifactRecord::new("org.example", "app", &second),
    ]);

    let config = DataConfig::of_type("dependency").with_artifact("org.example:app");
    let entries = produce(&config, &artifacts).unwrap();

    assert_eq!(names(&entries), vec!["app-1.0.jar"]);
    assert_eq!(entries[0].size, 5);
}

#[test]
fn test_dependency_unknown_artifact() {
    let err = produce(
        &DataConfig::of_type("dependency").with_artifact("org.example:absent"),
        &ArtifactSet::default(),
    )
    .unwrap_err();

    let err = err.downcast_ref::<DebdataError>().unwrap();
    assert!(matches!(err, DebdataError::ConfigurationError { .. }));
    assert!(err.to_string().contains("did you include it as a dependency?"));
}

#[test]
fn test_missing_sources_follow_policy() {
    let tree = SourceTree::new().unwrap();
    let absent = tree.join("nothing-here");

    for tag in ["file", "archive", "directory"] {
        let ignored = DataConfig::of_type(tag).with_src(&absent).with_missing_src("ignore");
        assert!(produce(&ignored, &ArtifactSet::default()).unwrap().is_empty(), "{tag}");

        let failing = DataConfig::of_type(tag).with_src(&absent);
        let err = produce(&failing, &ArtifactSet::default()).unwrap_err();
        assert!(
            matches!(err.downcast_ref::<DebdataError>(), Some(DebdataError::SourceNotFound { .. })),
            "{tag}"
        );
    }
}

#[test]
fn test_link_and_template_need_no_filesystem() {
    let link = DataConfig::of_type("link").with_link("usr/bin/app", "/opt/app/bin/app", false);
    let entries = produce(&link, &ArtifactSet::default()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind.label(), "hardlink");

    let template = DataConfig::of_type("template").with_paths(["var/log/app", "var/lib/app"]);
    let entries = produce(&template, &ArtifactSet::default()).unwrap();
    assert_eq!(names(&entries), vec!["var/log/app", "var/lib/app"]);
}

#[test]
fn test_unsupported_type() {
    let err = produce(&DataConfig::of_type("tarball"), &ArtifactSet::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DebdataError>(),
        Some(DebdataError::UnsupportedType { source_type }) if source_type == "tarball"
    ));
}
