//! Error types for compile-triage.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Cannot read compiler log {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read configuration {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TriageError {
    /// Short machine-readable code, used in JSON error output and logs.
    pub fn code(&self) -> &'static str {
        match self {
            TriageError::InputUnavailable { .. } => "input_unavailable",
            TriageError::ConfigIo { .. } => "config_io",
            TriageError::Config(_) => "config",
        }
    }
}

impl From<toml::de::Error> for TriageError {
    fn from(err: toml::de::Error) -> Self {
        TriageError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TriageError>;
