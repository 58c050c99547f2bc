//! Risk policy error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Storage error: {0}")]
    Storage(#[from] warden_storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
