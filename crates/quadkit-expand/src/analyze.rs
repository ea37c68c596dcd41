//! Phase 1: index the existing extract.

use std::collections::HashSet;
use std::path::Path;

use quadkit_core::{extract_spo, NodeSet, Scan, Triple};

use crate::error::Result;
use crate::input::for_each_line;

/// Everything already present in the extract before the run.
#[derive(Debug, Default)]
pub struct ExistingExtract {
    /// Subjects of every parseable line.
    pub subjects: NodeSet,
    /// IRI-valued objects of every parseable line.
    pub objects: NodeSet,
    /// Statements already present, regardless of graph.
    pub seen: HashSet<Triple>,
}

/// Stream the existing extract once and collect its subjects, IRI objects
/// and triples. Malformed lines are skipped.
pub fn analyze_existing(path: &Path) -> Result<ExistingExtract> {
    tracing::info!(path = %path.display(), "Analyzing existing extract");

    let mut existing = ExistingExtract::default();
    let lines = for_each_line(path, |line| {
        let spo = match extract_spo(line) {
            Scan::Spo(spo) => spo,
            Scan::Malformed => return Ok(()),
        };

        existing.subjects.insert(spo.subject.to_string());
        if spo.object_is_iri() {
            existing.objects.insert(spo.object.to_string());
        }
        existing.seen.insert(spo.to_triple());
        Ok(())
    })?;

    tracing::info!(
        lines,
        subjects = existing.subjects.len(),
        objects = existing.objects.len(),
        triples = existing.seen.len(),
        "Existing extract analyzed"
    );

    Ok(existing)
}
