use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid network configuration: {0}")]
    Config(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
