//! Phase 3: append every source quad that touches a safe node.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::Serialize;

use quadkit_core::config::ProgressConfig;
use quadkit_core::{extract_spo, replace_graph, NodeSet, Scan, Triple};

use crate::error::{ExpandError, Result};
use crate::input::for_each_line;

/// Counters for one extraction pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    /// Emitted because the subject is safe.
    pub direct: u64,
    /// Emitted because only the object is safe.
    pub inverse: u64,
    /// Matched a safe node but was already in the extract.
    pub skipped_duplicates: u64,
    /// Source lines scanned.
    pub lines: u64,
}

impl ExtractStats {
    pub fn added(&self) -> u64 {
        self.direct + self.inverse
    }
}

/// True when `file` has content whose last byte is not a newline.
fn lacks_trailing_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Stream `source` and append to `output` every quad whose subject, or IRI
/// object, is in `safe`, unless its triple is in `seen`.
///
/// `seen` is a snapshot taken before the pass and is not updated while
/// appending, so a triple repeated across source lines is appended once
/// per occurrence. If `output` does not end with a newline, one is written
/// before the first appended quad.
pub fn extract_safe(
    source: &Path,
    output: &Path,
    safe: &NodeSet,
    seen: &HashSet<Triple>,
    output_graph: &str,
    progress: &ProgressConfig,
) -> Result<ExtractStats> {
    progress.validate()?;

    tracing::info!(
        source = %source.display(),
        output = %output.display(),
        safe_nodes = safe.len(),
        "Extracting direct and inverse quads"
    );

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(output)
        .map_err(|source| ExpandError::Open {
            path: output.to_path_buf(),
            source,
        })?;
    let mut needs_newline =
        lacks_trailing_newline(&mut file).map_err(|source| ExpandError::Read {
            path: output.to_path_buf(),
            source,
        })?;
    let mut out = BufWriter::new(file);
    let write_err = |source| ExpandError::Write {
        path: output.to_path_buf(),
        source,
    };

    let mut stats = ExtractStats::default();

    for_each_line(source, |line| {
        stats.lines += 1;

        if let Scan::Spo(spo) = extract_spo(line) {
            let subject_safe = safe.contains(spo.subject);
            let object_safe = spo.object_is_iri() && safe.contains(spo.object);

            if subject_safe || object_safe {
                if seen.contains(&spo.to_triple()) {
                    stats.skipped_duplicates += 1;
                } else {
                    if needs_newline {
                        out.write_all(b"\n").map_err(write_err)?;
                        needs_newline = false;
                    }
                    out.write_all(replace_graph(line, output_graph).as_bytes())
                        .map_err(write_err)?;

                    if subject_safe {
                        stats.direct += 1;
                    } else {
                        stats.inverse += 1;
                    }

                    if stats.added() % progress.extract_interval == 0 {
                        tracing::info!(
                            added = stats.added(),
                            direct = stats.direct,
                            inverse = stats.inverse,
                            "Extract progress"
                        );
                    }
                }
            }
        }

        if stats.lines % progress.line_interval == 0 {
            tracing::info!(lines = stats.lines, "Source lines processed");
        }
        Ok(())
    })?;

    out.flush().map_err(write_err)?;

    tracing::info!(
        direct = stats.direct,
        inverse = stats.inverse,
        skipped_duplicates = stats.skipped_duplicates,
        "Extraction complete"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadkit_core::OUTPUT_GRAPH;

    fn set(items: &[&str]) -> NodeSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_direct_inverse_and_duplicate_counts() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.nq");
        let output = dir.path().join("out.nq");
        std::fs::write(
            &source,
            "<S> <p> <X> <g> .\n\
             <Y> <p> <S> <g> .\n\
             <S> <p> <S> <g> .\n\
             <S> <q> <Z> <g> .\n\
             <N> <p> <M> <g> .\n\
             garbage\n",
        )
        .unwrap();
        std::fs::write(&output, "").unwrap();

        let seen: HashSet<Triple> = [Triple::new("<S>", "<q>", "<Z>")].into_iter().collect();
        let stats = extract_safe(
            &source,
            &output,
            &set(&["<S>"]),
            &seen,
            OUTPUT_GRAPH,
            &ProgressConfig::default(),
        )
        .unwrap();

        assert_eq!(stats.direct, 2);
        assert_eq!(stats.inverse, 1);
        assert_eq!(stats.skipped_duplicates, 1);
        assert_eq!(stats.lines, 6);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert!(written
            .lines()
            .all(|l| l.ends_with(&format!("{OUTPUT_GRAPH} ."))));
    }

    #[test]
    fn test_missing_output_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.nq");
        std::fs::write(&source, "<S> <p> <X> <g> .\n").unwrap();

        let result = extract_safe(
            &source,
            &dir.path().join("absent.nq"),
            &set(&["<S>"]),
            &HashSet::new(),
            OUTPUT_GRAPH,
            &ProgressConfig::default(),
        );
        assert!(matches!(result, Err(ExpandError::Open { .. })));
    }

    #[test]
    fn test_repeated_source_triple_is_emitted_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.nq");
        let output = dir.path().join("out.nq");
        std::fs::write(&source, "<S> <p> <X> <g1> .\n<S> <p> <X> <g2> .\n").unwrap();
        std::fs::write(&output, "").unwrap();

        let stats = extract_safe(
            &source,
            &output,
            &set(&["<S>"]),
            &HashSet::new(),
            OUTPUT_GRAPH,
            &ProgressConfig::default(),
        )
        .unwrap();

        assert_eq!(stats.direct, 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_unterminated_last_line_gets_newline_before_append() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.nq");
        let output = dir.path().join("out.nq");
        std::fs::write(&source, "<S> <q> <C> <g1> .\n").unwrap();
        std::fs::write(&output, "<S> <p> <B> <g0> .").unwrap();

        let stats = extract_safe(
            &source,
            &output,
            &set(&["<S>"]),
            &HashSet::new(),
            OUTPUT_GRAPH,
            &ProgressConfig::default(),
        )
        .unwrap();

        assert_eq!(stats.direct, 1);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            format!("<S> <p> <B> <g0> .\n<S> <q> <C> {OUTPUT_GRAPH} .\n")
        );
    }

    #[test]
    fn test_unterminated_output_untouched_when_nothing_matches() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.nq");
        let output = dir.path().join("out.nq");
        std::fs::write(&source, "<N> <q> <C> <g1> .\n").unwrap();
        std::fs::write(&output, "<S> <p> <B> <g0> .").unwrap();

        extract_safe(
            &source,
            &output,
            &set(&["<S>"]),
            &HashSet::new(),
            OUTPUT_GRAPH,
            &ProgressConfig::default(),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "<S> <p> <B> <g0> ."
        );
    }

    #[test]
    fn test_literal_quad_counts_as_inverse_via_graph_tag() {
        // The scanner reads the graph tag of a literal quad as its object.
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.nq");
        let output = dir.path().join("out.nq");
        std::fs::write(&source, "<Z> <label> \"unrelated\" <g0> .\n").unwrap();
        std::fs::write(&output, "").unwrap();

        let stats = extract_safe(
            &source,
            &output,
            &set(&["<g0>"]),
            &HashSet::new(),
            OUTPUT_GRAPH,
            &ProgressConfig::default(),
        )
        .unwrap();

        assert_eq!(stats.direct, 0);
        assert_eq!(stats.inverse, 1);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            format!("<Z> <label> \"unrelated\" {OUTPUT_GRAPH} .\n")
        );
    }

    #[test]
    fn test_zero_interval_is_rejected_before_output_is_opened() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.nq");
        std::fs::write(&source, "<S> <p> <X> <g> .\n").unwrap();

        let result = extract_safe(
            &source,
            &dir.path().join("absent.nq"),
            &set(&["<S>"]),
            &HashSet::new(),
            OUTPUT_GRAPH,
            &ProgressConfig {
                line_interval: 10,
                extract_interval: 0,
            },
        );
        assert!(matches!(result, Err(ExpandError::Config(_))));
    }
}
