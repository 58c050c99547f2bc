//! Warden Risk Policy
//!
//! Pure risk scoring plus the two stores that feed it: the trusted-domain
//! whitelist and the bounded download history. The scorer itself is a pure
//! function over snapshots; the stores serialize their own mutations so a
//! read-modify-write against the persistence layer is never interleaved.

mod download;
mod error;
mod history;
mod scorer;
mod whitelist;

pub use download::DownloadDescriptor;
pub use error::RiskError;
pub use history::{safe_download_count, HistoryEntry, HistoryLog, HISTORY_CAPACITY};
pub use scorer::{
    assess, has_dangerous_extension, is_suspicious_url, RiskAssessment, RISK_THRESHOLD,
};
pub use whitelist::{WhitelistStore, DEFAULT_WHITELIST};

pub type Result<T> = std::result::Result<T, RiskError>;
