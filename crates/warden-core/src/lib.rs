//! Warden Core
//!
//! Wiring layer for the download risk interception engine. Embedders
//! construct a [`Guard`] with their platform's download-action and alert
//! ports, feed it download-created and action-selected events, and expose
//! the whitelist/history surface to their settings UI.

mod config;
mod error;
mod guard;

pub use config::Config;
pub use error::CoreError;
pub use guard::Guard;

// Re-export core components
pub use warden_intercept::{
    AlertSink, Coordinator, Decision, DecisionRouter, DownloadActions, InterceptError,
    InterceptionState, RiskAlert, ALERT_ACTIONS,
};
pub use warden_risk::{
    DownloadDescriptor, HistoryEntry, HistoryLog, RiskAssessment, RiskError, WhitelistStore,
    HISTORY_CAPACITY, RISK_THRESHOLD,
};
pub use warden_storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
