//! Warden Interception
//!
//! The state machine between a download-created event and its outcome:
//! record, score, then release the download or pause it behind an alert
//! until the user decides. Platform side effects (pause/resume/cancel,
//! raising and dismissing alerts) go through ports so the engine never
//! touches the platform directly.

mod coordinator;
mod error;
mod event;
mod ports;
mod router;
mod state;

pub use coordinator::Coordinator;
pub use error::InterceptError;
pub use event::Decision;
pub use ports::{AlertSink, DownloadActions, RiskAlert, ALERT_ACTIONS};
pub use router::DecisionRouter;
pub use state::InterceptionState;

pub type Result<T> = std::result::Result<T, InterceptError>;
