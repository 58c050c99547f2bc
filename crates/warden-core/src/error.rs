//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] warden_storage::StorageError),

    #[error("Risk policy error: {0}")]
    Risk(#[from] warden_risk::RiskError),

    #[error("Interception error: {0}")]
    Intercept(#[from] warden_intercept::InterceptError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
