//! Graph namespace validation over the first lines of a file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;

use quadkit_core::graph_tag;

use crate::error::{Result, UploadError};

/// At most this many offending lines are kept per file for reporting.
const MAX_EXAMPLES: usize = 10;

/// A sampled line whose graph tag is outside the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// 1-based line number.
    pub line: usize,
    /// The graph tag found, if any.
    pub graph: Option<String>,
}

/// Outcome of validating one file.
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceReport {
    pub path: PathBuf,
    pub lines_checked: usize,
    pub mismatches: usize,
    pub examples: Vec<Mismatch>,
}

impl NamespaceReport {
    pub fn is_valid(&self) -> bool {
        self.mismatches == 0
    }
}

/// Check that the graph tag of each of the first `sample_lines` lines of
/// `path` starts with `namespace`. Blank lines and `#` comments are skipped
/// but still count towards the sample.
pub fn validate_namespace(
    path: &Path,
    namespace: &str,
    sample_lines: usize,
) -> Result<NamespaceReport> {
    let read_err = |source| UploadError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;

    let mut report = NamespaceReport {
        path: path.to_path_buf(),
        lines_checked: 0,
        mismatches: 0,
        examples: Vec::new(),
    };

    for (idx, line) in BufReader::new(file).lines().take(sample_lines).enumerate() {
        let line = line.map_err(read_err)?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        report.lines_checked += 1;
        let tag = graph_tag(trimmed);
        if !tag.is_some_and(|t| in_namespace(t, namespace)) {
            report.mismatches += 1;
            if report.examples.len() < MAX_EXAMPLES {
                report.examples.push(Mismatch {
                    line: idx + 1,
                    graph: tag.map(String::from),
                });
            }
        }
    }

    if report.is_valid() {
        tracing::debug!(path = %path.display(), lines = report.lines_checked, "Namespace check passed");
    } else {
        tracing::warn!(
            path = %path.display(),
            lines = report.lines_checked,
            mismatches = report.mismatches,
            "Namespace check failed"
        );
    }

    Ok(report)
}

/// `tag` is a bracketed IRI; `namespace` is a bare IRI prefix.
fn in_namespace(tag: &str, namespace: &str) -> bool {
    tag.strip_prefix('<')
        .is_some_and(|iri| iri.starts_with(namespace))
}
