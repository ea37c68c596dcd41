//! Single-file `LOAD`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use quadkit_sparql::SparqlClient;

use crate::files::file_uri;

/// Result of loading one file. Failures are reported here, never raised.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub file: PathBuf,
    pub file_uri: Option<String>,
    pub success: bool,
    /// HTTP status, when the endpoint answered.
    pub status: Option<u16>,
    /// Response body on success, error text otherwise.
    pub message: String,
    pub duration_ms: u64,
}

/// Issue `LOAD <file-uri>` (or `LOAD ... INTO GRAPH <graph>`) for `path`.
pub async fn upload_file(
    client: &SparqlClient,
    path: &Path,
    graph: Option<&str>,
    base_uri: Option<&str>,
) -> LoadOutcome {
    let start = Instant::now();

    let uri = match file_uri(path, base_uri) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(file = %path.display(), error = %e, "Cannot resolve file URI");
            return LoadOutcome {
                file: path.to_path_buf(),
                file_uri: None,
                success: false,
                status: None,
                message: e.to_string(),
                duration_ms: start.elapsed().as_millis() as u64,
            };
        }
    };

    let result = client.load(&uri, graph).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(body) => {
            tracing::info!(file = %path.display(), duration_ms, "Loaded");
            LoadOutcome {
                file: path.to_path_buf(),
                file_uri: Some(uri),
                success: true,
                status: Some(200),
                message: body,
                duration_ms,
            }
        }
        Err(e) => {
            tracing::error!(file = %path.display(), error = %e, duration_ms, "Load failed");
            LoadOutcome {
                file: path.to_path_buf(),
                file_uri: Some(uri),
                success: false,
                status: e.status(),
                message: e.to_string(),
                duration_ms,
            }
        }
    }
}
