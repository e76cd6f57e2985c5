use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("The account data provider is unavailable: {0}")]
    Unavailable(String),
}
