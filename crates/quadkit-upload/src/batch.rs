//! Multi-file upload: validate → (optionally) clear namespace → load.
//!
//! Validation and graph listing failures stop the batch before anything
//! is changed on the endpoint. Once loading starts, each file succeeds or
//! fails on its own.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use quadkit_core::config::UploadConfig;
use quadkit_sparql::SparqlClient;

use crate::confirm::Confirm;
use crate::error::{Result, UploadError};
use crate::files::list_nq_files;
use crate::loader::{upload_file, LoadOutcome};
use crate::namespace::validate_namespace;

/// Summary of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub namespace: String,
    pub files: Vec<PathBuf>,
    pub graphs_dropped: usize,
    pub drop_failures: usize,
    pub loaded: usize,
    pub failed: usize,
    pub outcomes: Vec<LoadOutcome>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.drop_failures == 0
    }
}

/// Upload every `.nq` file in `config.folder`.
pub async fn run_batch(
    client: &SparqlClient,
    config: &UploadConfig,
    confirm: &mut dyn Confirm,
) -> Result<BatchReport> {
    config.validate()?;

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    tracing::info!(
        run_id = %run_id,
        folder = %config.folder.display(),
        namespace = %config.namespace,
        endpoint = client.endpoint(),
        "Starting batch upload"
    );

    let files = list_nq_files(&config.folder)?;

    let mut violations = Vec::new();
    for file in &files {
        let report = validate_namespace(file, &config.namespace, config.sample_lines)?;
        if !report.is_valid() {
            violations.push(report);
        }
    }
    if !violations.is_empty() {
        return Err(UploadError::NamespaceViolation {
            reports: violations,
        });
    }
    tracing::info!(files = files.len(), "All files passed namespace validation");

    let (graphs_dropped, drop_failures) = if config.clear_namespace {
        clear_namespace(client, &config.namespace, confirm).await?
    } else {
        (0, 0)
    };

    if !confirm.confirm(&format!(
        "Load {} file(s) into {}?",
        files.len(),
        client.endpoint()
    ))? {
        return Err(UploadError::Aborted);
    }

    let mut outcomes = Vec::with_capacity(files.len());
    for (idx, file) in files.iter().enumerate() {
        tracing::info!(file = %file.display(), n = idx + 1, of = files.len(), "Uploading");
        outcomes.push(upload_file(client, file, None, config.base_uri.as_deref()).await);
    }

    let loaded = outcomes.iter().filter(|o| o.success).count();
    let report = BatchReport {
        run_id,
        started_at,
        completed_at: Utc::now(),
        namespace: config.namespace.clone(),
        files,
        graphs_dropped,
        drop_failures,
        loaded,
        failed: outcomes.len() - loaded,
        outcomes,
    };

    tracing::info!(
        run_id = %run_id,
        loaded = report.loaded,
        failed = report.failed,
        graphs_dropped,
        "Batch upload complete"
    );

    Ok(report)
}

/// Drop every graph under `namespace` after confirmation.
/// Returns (dropped, failed).
async fn clear_namespace(
    client: &SparqlClient,
    namespace: &str,
    confirm: &mut dyn Confirm,
) -> Result<(usize, usize)> {
    let graphs = client.list_graphs(namespace).await?;
    if graphs.is_empty() {
        tracing::info!(namespace, "No graphs to drop");
        return Ok((0, 0));
    }

    for graph in &graphs {
        tracing::info!(graph = %graph, "Scheduled for drop");
    }
    if !confirm.confirm(&format!(
        "Drop {} graph(s) under {namespace}?",
        graphs.len()
    ))? {
        return Err(UploadError::Aborted);
    }

    let mut dropped = 0;
    let mut failed = 0;
    for graph in &graphs {
        match client.drop_graph(graph).await {
            Ok(_) => dropped += 1,
            Err(e) => {
                tracing::error!(graph = %graph, error = %e, "Drop failed");
                failed += 1;
            }
        }
    }
    Ok((dropped, failed))
}
