//! Configuration management for quadkit tools.
//!
//! Configuration is loaded from (in priority order):
//! 1. Command-line flags (applied by each binary)
//! 2. Environment variables (`QUADKIT__` prefix, `__` separator)
//! 3. Config file (`quadkit.toml`, optional)
//! 4. Defaults

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{CoreError, Result};
use crate::types::is_iri;
use crate::vocab::OUTPUT_GRAPH;

/// All sections of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub expand: ExpandConfig,

    #[serde(default)]
    pub sparql: SparqlConfig,

    #[serde(default)]
    pub upload: UploadConfig,
}

/// Inputs and tuning for one expansion run.
///
/// The output file is always `existing_path`, opened in append mode.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpandConfig {
    /// The curated extract being expanded.
    #[serde(default = "default_existing_path")]
    pub existing_path: PathBuf,

    /// The full source dump, read twice.
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,

    /// Bracketed IRI every emitted quad is moved into.
    #[serde(default = "default_output_graph")]
    pub output_graph: String,

    #[serde(default)]
    pub progress: ProgressConfig,
}

/// How often the long scans report progress.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Report every this many source lines.
    #[serde(default = "default_line_interval")]
    pub line_interval: u64,

    /// Report every this many extracted quads.
    #[serde(default = "default_extract_interval")]
    pub extract_interval: u64,
}

/// Connection settings for a SPARQL 1.1 endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlConfig {
    /// Endpoint URL accepting both queries and updates.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Basic-auth user; no auth header is sent when unset.
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Multi-file upload settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory scanned for `*.nq` files.
    #[serde(default = "default_folder")]
    pub folder: PathBuf,

    /// Graph IRI prefix every uploaded quad must carry (without brackets).
    #[serde(default)]
    pub namespace: String,

    /// Drop every graph under `namespace` before loading.
    #[serde(default)]
    pub clear_namespace: bool,

    /// Number of leading lines checked per file during validation.
    #[serde(default = "default_sample_lines")]
    pub sample_lines: usize,

    /// Location of `folder` as seen by the endpoint; `file://` + local
    /// absolute path is used when unset.
    #[serde(default)]
    pub base_uri: Option<String>,

    /// Skip interactive confirmation.
    #[serde(default)]
    pub assume_yes: bool,
}

impl ExpandConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_iri(&self.output_graph) {
            return Err(CoreError::InvalidSetting {
                key: "expand.output_graph".to_string(),
                reason: format!("expected a bracketed IRI, got {}", self.output_graph),
            });
        }
        self.progress.validate()
    }
}

impl ProgressConfig {
    /// Both intervals are used as divisors, so neither may be zero.
    pub fn validate(&self) -> Result<()> {
        if self.line_interval == 0 || self.extract_interval == 0 {
            return Err(CoreError::InvalidSetting {
                key: "expand.progress".to_string(),
                reason: "intervals must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl SparqlConfig {
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(CoreError::InvalidSetting {
                key: "sparql.endpoint".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::InvalidSetting {
                key: "sparql.timeout_secs".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl UploadConfig {
    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(CoreError::InvalidSetting {
                key: "upload.namespace".to_string(),
                reason: "a namespace prefix is required".to_string(),
            });
        }
        if self.sample_lines == 0 {
            return Err(CoreError::InvalidSetting {
                key: "upload.sample_lines".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from `<file_prefix>.{toml,yaml,json,...}` and the environment.
pub fn load_settings(file_prefix: &str) -> Result<Settings> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("QUADKIT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = cfg.try_deserialize::<Settings>()?;
    tracing::debug!(file_prefix, "Loaded settings");
    Ok(settings)
}

fn default_existing_path() -> PathBuf {
    PathBuf::from("revision_safe.nq")
}

fn default_source_path() -> PathBuf {
    PathBuf::from("full_export_dedup.nq")
}

fn default_output_graph() -> String {
    OUTPUT_GRAPH.to_string()
}

fn default_line_interval() -> u64 {
    5_000_000
}

fn default_extract_interval() -> u64 {
    50_000
}

fn default_endpoint() -> String {
    "http://localhost:8890/sparql".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_folder() -> PathBuf {
    PathBuf::from(".")
}

fn default_sample_lines() -> usize {
    1000
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            existing_path: default_existing_path(),
            source_path: default_source_path(),
            output_graph: default_output_graph(),
            progress: ProgressConfig::default(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            line_interval: default_line_interval(),
            extract_interval: default_extract_interval(),
        }
    }
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            namespace: String::new(),
            clear_namespace: false,
            sample_lines: default_sample_lines(),
            base_uri: None,
            assume_yes: false,
        }
    }
}
