//! Phase 2: find resources one allow-listed hop away from existing subjects.

use std::path::Path;

use quadkit_core::config::ProgressConfig;
use quadkit_core::{extract_spo, AllowList, NodeSet, Scan};

use crate::error::Result;
use crate::input::for_each_line;

/// Linked resources found in the source, plus the number of lines scanned.
#[derive(Debug, Default)]
pub struct Discovery {
    pub linked: NodeSet,
    pub lines: u64,
}

/// Stream `source` once and collect the IRI objects of every quad whose
/// subject is an existing subject and whose predicate is allow-listed.
pub fn discover_linked(
    source: &Path,
    existing_subjects: &NodeSet,
    allow_list: &AllowList,
    progress: &ProgressConfig,
) -> Result<Discovery> {
    progress.validate()?;

    tracing::info!(
        path = %source.display(),
        predicates = allow_list.len(),
        "Discovering linked resources"
    );

    let mut linked = NodeSet::new();
    let mut processed = 0u64;

    let lines = for_each_line(source, |line| {
        processed += 1;

        if let Scan::Spo(spo) = extract_spo(line) {
            if existing_subjects.contains(spo.subject)
                && allow_list.contains(spo.predicate)
                && spo.object_is_iri()
            {
                linked.insert(spo.object.to_string());
            }
        }

        if processed % progress.line_interval == 0 {
            tracing::info!(lines = processed, linked = linked.len(), "Discover progress");
        }
        Ok(())
    })?;

    tracing::info!(lines, linked = linked.len(), "Linked resources discovered");

    Ok(Discovery { linked, lines })
}
