//! Interception State Machine
//!
//! Per-download lifecycle:
//! ```text
//! New
//!   ↓ record          ↘ malformed URL
//! Recorded              Unexamined
//!   ↓ score
//! Scored
//!   ↓ < 50        ↓ ≥ 50
//! Released        Paused
//!                   ↓ allow      ↓ cancel
//!                 Resumed      Cancelled
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterceptionState {
    /// Event received, nothing done yet
    New,
    /// History entry written
    Recorded,
    /// Risk score computed
    Scored,
    /// Below threshold, download proceeds normally
    Released,
    /// Transfer suspended, alert pending a user decision
    Paused,
    /// User allowed the download
    Resumed,
    /// User cancelled the download
    Cancelled,
    /// Source URL did not parse; the download proceeds unexamined
    Unexamined,
}

impl InterceptionState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: InterceptionState) -> bool {
        match (self, target) {
            // A fresh event is either recorded or abandoned unexamined
            (InterceptionState::New, InterceptionState::Recorded) => true,
            (InterceptionState::New, InterceptionState::Unexamined) => true,
            // Recorded events are always scored
            (InterceptionState::Recorded, InterceptionState::Scored) => true,
            // The score decides between release and pause
            (InterceptionState::Scored, InterceptionState::Released) => true,
            (InterceptionState::Scored, InterceptionState::Paused) => true,
            // Only a user decision leaves Paused; there is no timeout
            (InterceptionState::Paused, InterceptionState::Resumed) => true,
            (InterceptionState::Paused, InterceptionState::Cancelled) => true,
            // Same state is always valid (no-op)
            (a, b) if *a == b => true,
            // All other transitions are invalid
            _ => false,
        }
    }

    /// Returns true if no further transition can occur
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InterceptionState::Released
                | InterceptionState::Resumed
                | InterceptionState::Cancelled
                | InterceptionState::Unexamined
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterceptionState::New => "new",
            InterceptionState::Recorded => "recorded",
            InterceptionState::Scored => "scored",
            InterceptionState::Released => "released",
            InterceptionState::Paused => "paused",
            InterceptionState::Resumed => "resumed",
            InterceptionState::Cancelled => "cancelled",
            InterceptionState::Unexamined => "unexamined",
        }
    }
}

impl std::fmt::Display for InterceptionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
