use thiserror::Error;

/// Top-level error type for shared quadkit functionality.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
