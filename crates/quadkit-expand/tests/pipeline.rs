//! End-to-end expansion runs over temporary N-Quads files.

use std::path::Path;

use quadkit_core::config::ExpandConfig;
use quadkit_core::OUTPUT_GRAPH;
use quadkit_expand::error::ExpandError;
use quadkit_expand::run_expansion;

const HAS_TECH: &str = "<http://w3id.org/bodi#hasTechnicalMetadata>";

fn setup(existing: &str, source: &str) -> (tempfile::TempDir, ExpandConfig) {
    let dir = tempfile::tempdir().unwrap();
    let existing_path = dir.path().join("revision_safe.nq");
    let source_path = dir.path().join("full_export_dedup.nq");
    std::fs::write(&existing_path, existing).unwrap();
    std::fs::write(&source_path, source).unwrap();

    let config = ExpandConfig {
        existing_path,
        source_path,
        ..Default::default()
    };
    (dir, config)
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_direct_and_inverse_quads_are_appended() {
    let existing = "<http://e/A> <http://e/p1> <http://e/B> <http://e/g0> .\n";
    let source = format!(
        "<http://e/B> <http://e/p2> <http://e/C> <http://e/g1> .\n\
         <http://e/D> {HAS_TECH} <http://e/A> <http://e/g1> .\n"
    );
    let (_dir, config) = setup(existing, &source);

    let report = run_expansion(&config).unwrap();

    assert_eq!(report.linked_resources, 0);
    assert_eq!(report.extract.direct, 1);
    assert_eq!(report.extract.inverse, 1);

    let lines = read_lines(&config.existing_path);
    assert_eq!(
        lines,
        vec![
            "<http://e/A> <http://e/p1> <http://e/B> <http://e/g0> .".to_string(),
            format!("<http://e/B> <http://e/p2> <http://e/C> {OUTPUT_GRAPH} ."),
            format!("<http://e/D> {HAS_TECH} <http://e/A> {OUTPUT_GRAPH} ."),
        ]
    );
}

#[test]
fn test_second_run_appends_nothing() {
    let existing = "<http://e/A> <http://e/p1> <http://e/B> <http://e/g0> .\n";
    let source = format!(
        "<http://e/B> <http://e/p2> <http://e/C> <http://e/g1> .\n\
         <http://e/D> {HAS_TECH} <http://e/A> <http://e/g1> .\n"
    );
    let (_dir, config) = setup(existing, &source);

    let first = run_expansion(&config).unwrap();
    assert_eq!(first.added(), 2);
    let after_first = std::fs::read_to_string(&config.existing_path).unwrap();

    let second = run_expansion(&config).unwrap();
    assert_eq!(second.added(), 0);
    assert_eq!(second.extract.skipped_duplicates, 2);
    assert_eq!(
        std::fs::read_to_string(&config.existing_path).unwrap(),
        after_first
    );
}

#[test]
fn test_extract_without_trailing_newline_stays_idempotent() {
    let existing = "<http://e/A> <http://e/p> <http://e/B> <http://e/g0> .";
    let source = "<http://e/A> <http://e/q> <http://e/C> <http://e/g1> .\n";
    let (_dir, config) = setup(existing, source);

    let first = run_expansion(&config).unwrap();
    assert_eq!(first.added(), 1);
    assert_eq!(
        read_lines(&config.existing_path),
        vec![
            existing.to_string(),
            format!("<http://e/A> <http://e/q> <http://e/C> {OUTPUT_GRAPH} ."),
        ]
    );
    let after_first = std::fs::read_to_string(&config.existing_path).unwrap();

    let second = run_expansion(&config).unwrap();
    assert_eq!(second.existing_triples, 2);
    assert_eq!(second.added(), 0);
    assert_eq!(
        std::fs::read_to_string(&config.existing_path).unwrap(),
        after_first
    );
}

#[test]
fn test_linked_resource_properties_are_pulled_in() {
    let existing = "<http://e/Rec> <http://e/title> <http://e/T> <http://e/g0> .\n";
    let source = format!(
        "<http://e/Rec> {HAS_TECH} <http://e/TM> <http://e/g1> .\n\
         <http://e/TM> <http://e/format> \"application/pdf\" <http://e/g1> .\n\
         <http://e/Other> <http://e/format> \"image/tiff\" <http://e/g1> .\n"
    );
    let (_dir, config) = setup(existing, &source);

    let report = run_expansion(&config).unwrap();

    assert_eq!(report.linked_resources, 1);
    assert_eq!(report.extract.direct, 2);
    assert_eq!(report.extract.inverse, 0);

    let lines = read_lines(&config.existing_path);
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[2],
        format!("<http://e/TM> <http://e/format> \"application/pdf\" {OUTPUT_GRAPH} .")
    );
}

#[test]
fn test_existing_triple_in_other_graph_is_skipped() {
    let existing = "<http://e/A> <http://e/p> <http://e/B> <http://e/g0> .\n";
    let source = "<http://e/A> <http://e/p> <http://e/B> <http://e/other> .\n";
    let (_dir, config) = setup(existing, source);

    let report = run_expansion(&config).unwrap();

    assert_eq!(report.added(), 0);
    assert_eq!(report.extract.skipped_duplicates, 1);
    assert_eq!(read_lines(&config.existing_path).len(), 1);
}

#[test]
fn test_malformed_lines_are_ignored() {
    let existing = "# header\n<http://e/A> <http://e/p> <http://e/B> <http://e/g0> .\n\n";
    let source = "broken <http://e/A> line\n<http://e/A> <http://e/q> <http://e/C> <http://e/g> .\n";
    let (_dir, config) = setup(existing, source);

    let report = run_expansion(&config).unwrap();

    assert_eq!(report.existing_triples, 1);
    assert_eq!(report.added(), 1);
    assert_eq!(report.extract.lines, 2);
}

#[test]
fn test_missing_source_aborts_without_output() {
    let existing = "<http://e/A> <http://e/p> <http://e/B> <http://e/g0> .\n";
    let (dir, mut config) = setup(existing, "");
    config.source_path = dir.path().join("absent.nq");

    let result = run_expansion(&config);

    assert!(matches!(result, Err(ExpandError::Open { ref path, .. }) if path == &config.source_path));
    assert_eq!(std::fs::read_to_string(&config.existing_path).unwrap(), existing);
}

#[test]
fn test_missing_existing_extract_is_fatal() {
    let (dir, mut config) = setup("", "");
    config.existing_path = dir.path().join("absent.nq");

    assert!(matches!(
        run_expansion(&config),
        Err(ExpandError::Open { .. })
    ));
    assert!(!config.existing_path.exists());
}
