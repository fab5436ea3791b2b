use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("fleet configuration error: {0}")]
    Config(String),
}

pub type DeviceResult<T> = Result<T, DeviceError>;
