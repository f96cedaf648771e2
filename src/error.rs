use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid entity snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("card is not configured; call `set_config` first")]
    NotConfigured,
}
