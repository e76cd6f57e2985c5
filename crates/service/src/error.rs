use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Strategy not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Failed to persist strategies: {0}")]
    Persistence(#[from] DbError),

    #[error("Persistence task did not complete: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
