//! Error types for the quadkit-expand crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Read failed on {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write failed on {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(#[from] quadkit_core::CoreError),
}

pub type Result<T> = std::result::Result<T, ExpandError>;
