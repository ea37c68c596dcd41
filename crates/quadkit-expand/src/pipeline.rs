//! End-to-end expansion run: analyze → discover → extract.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use quadkit_core::config::ExpandConfig;
use quadkit_core::{AllowList, NodeSet};

use crate::analyze::{analyze_existing, ExistingExtract};
use crate::discover::discover_linked;
use crate::error::Result;
use crate::extract::{extract_safe, ExtractStats};

/// Summary of a completed expansion run.
#[derive(Debug, Clone, Serialize)]
pub struct ExpansionReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub existing_subjects: usize,
    pub existing_objects: usize,
    pub existing_triples: usize,
    /// Resources reached through an allow-listed predicate.
    pub linked_resources: usize,
    pub safe_nodes: usize,
    pub extract: ExtractStats,
}

impl ExpansionReport {
    pub fn added(&self) -> u64 {
        self.extract.added()
    }
}

/// Union of existing subjects, existing IRI objects and linked resources.
pub fn assemble_safe_nodes(existing: &ExistingExtract, linked: &NodeSet) -> NodeSet {
    let mut safe = NodeSet::with_capacity(existing.subjects.len() + linked.len());
    safe.extend(existing.subjects.iter().cloned());
    safe.extend(existing.objects.iter().cloned());
    safe.extend(linked.iter().cloned());
    safe
}

/// Run all three phases against `config`, appending to `config.existing_path`.
///
/// Both inputs are read before the output is opened, so a missing file
/// aborts the run without writing anything.
pub fn run_expansion(config: &ExpandConfig) -> Result<ExpansionReport> {
    config.validate()?;

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    tracing::info!(
        run_id = %run_id,
        existing = %config.existing_path.display(),
        source = %config.source_path.display(),
        "Starting expansion run"
    );

    let existing = analyze_existing(&config.existing_path)?;

    let allow_list = AllowList::standard();
    let discovery = discover_linked(
        &config.source_path,
        &existing.subjects,
        &allow_list,
        &config.progress,
    )?;

    let safe = assemble_safe_nodes(&existing, &discovery.linked);
    tracing::info!(safe_nodes = safe.len(), "Safe node set assembled");

    let extract = extract_safe(
        &config.source_path,
        &config.existing_path,
        &safe,
        &existing.seen,
        &config.output_graph,
        &config.progress,
    )?;

    let report = ExpansionReport {
        run_id,
        started_at,
        completed_at: Utc::now(),
        existing_subjects: existing.subjects.len(),
        existing_objects: existing.objects.len(),
        existing_triples: existing.seen.len(),
        linked_resources: discovery.linked.len(),
        safe_nodes: safe.len(),
        extract,
    };

    tracing::info!(
        run_id = %run_id,
        added = report.added(),
        direct = extract.direct,
        inverse = extract.inverse,
        skipped_duplicates = extract.skipped_duplicates,
        "Expansion run complete"
    );

    Ok(report)
}
