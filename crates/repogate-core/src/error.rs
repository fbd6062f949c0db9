use crate::PublishStep;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoGateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Repository sync failed: {0}")]
    Sync(String),

    #[error("Publish failed during {step}: {message}")]
    Publish { step: PublishStep, message: String },

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, RepoGateError>;
