//! Error types for the quadkit-upload crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::namespace::NamespaceReport;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Folder not found: {path}")]
    FolderNotFound { path: PathBuf },

    #[error("No .nq files found in {path}")]
    NoFiles { path: PathBuf },

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Namespace validation failed for {} file(s)", .reports.len())]
    NamespaceViolation { reports: Vec<NamespaceReport> },

    #[error("Aborted by operator")]
    Aborted,

    #[error("SPARQL error: {0}")]
    Sparql(#[from] quadkit_sparql::SparqlError),

    #[error("Config error: {0}")]
    Config(#[from] quadkit_core::CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, UploadError>;
