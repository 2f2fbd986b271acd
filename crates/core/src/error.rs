use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrokerError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Signing failed: {0}")]
    Signing(String),
}

pub type Result<T> = std::result::Result<T, BrokerError>;
