use tf_device::DeviceError;
use tf_network::NetworkError;
use tf_path::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("path error: {0}")]
    Path(#[from] PathError),

    #[error("fleet error: {0}")]
    Device(#[from] DeviceError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
