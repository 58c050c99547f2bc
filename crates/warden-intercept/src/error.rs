//! Interception error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterceptError {
    #[error("Download action failed: {0}")]
    Action(String),

    #[error("Alert delivery failed: {0}")]
    Alert(String),
}
