//! Error types for model loading and key handling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreakerError {
    #[error("failed to read n-gram table: {0}")]
    ModelRead(#[from] std::io::Error),

    #[error("n-gram table contains no valid records")]
    EmptyModel,

    #[error("invalid substitution key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, BreakerError>;
