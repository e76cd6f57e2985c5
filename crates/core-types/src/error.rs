use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown strategy status: {0}")]
    UnknownStatus(String),
}
