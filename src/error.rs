use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadsmithError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("File error: {path:?} - {message}")]
    FileError {
        path: PathBuf,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<anyhow::Error> for LeadsmithError {
    fn from(error: anyhow::Error) -> Self {
        LeadsmithError::UnexpectedError(error.to_string())
    }
}

pub type LeadsmithResult<T> = std::result::Result<T, LeadsmithError>;
