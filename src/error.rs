use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PmseError {
    #[error("IO Error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ground Truth Error in '{}': {reason}", path.display())]
    GroundTruth { path: PathBuf, reason: String },

    #[error("Posterior Error at line {line}: {reason}")]
    Posterior { line: usize, reason: String },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

impl PmseError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn posterior(line: usize, reason: impl Into<String>) -> Self {
        Self::Posterior {
            line,
            reason: reason.into(),
        }
    }
}

pub type PmseResult<T> = Result<T, PmseError>;
