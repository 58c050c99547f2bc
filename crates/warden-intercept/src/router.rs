//! Decision router
//!
//! Maps an action-selected event from the alert surface back to the paused
//! download it concerns, issues the matching resume or cancel, and clears
//! the alert. The association is an explicit table shared with the
//! coordinator; nothing is parsed out of the alert identifier itself.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::event::Decision;
use crate::ports::{AlertSink, DownloadActions};
use crate::state::InterceptionState;

pub struct DecisionRouter {
    actions: Arc<dyn DownloadActions>,
    alerts: Arc<dyn AlertSink>,
    pending: Arc<Mutex<HashMap<String, String>>>,
}

impl DecisionRouter {
    pub(crate) fn new(
        actions: Arc<dyn DownloadActions>,
        alerts: Arc<dyn AlertSink>,
        pending: Arc<Mutex<HashMap<String, String>>>,
    ) -> Self {
        Self {
            actions,
            alerts,
            pending,
        }
    }

    /// Handles one user decision. Returns the terminal state reached, or
    /// `None` when the event was dropped (unknown alert or action index).
    ///
    /// Action failures are logged, never escalated: the user has decided,
    /// and a resume call on an already-finished download changes nothing.
    /// The alert is dismissed regardless of the action outcome.
    pub fn on_action_selected(
        &self,
        alert_id: &str,
        action_index: usize,
    ) -> Option<InterceptionState> {
        let Some(decision) = Decision::from_index(action_index) else {
            tracing::warn!(alert_id = %alert_id, action_index, "Ignoring unknown alert action");
            return None;
        };

        let Some(download_id) = self.pending.lock().remove(alert_id) else {
            tracing::warn!(alert_id = %alert_id, "Ignoring decision for unknown alert");
            self.dismiss(alert_id);
            return None;
        };

        let (result, state) = match decision {
            Decision::Allow => (
                self.actions.resume(&download_id),
                InterceptionState::Resumed,
            ),
            Decision::Cancel => (
                self.actions.cancel(&download_id),
                InterceptionState::Cancelled,
            ),
        };

        if let Err(e) = result {
            tracing::error!(
                download_id = %download_id,
                decision = %decision,
                error = %e,
                "Download action failed"
            );
        }

        self.dismiss(alert_id);

        tracing::info!(
            download_id = %download_id,
            alert_id = %alert_id,
            decision = %decision,
            "User decision processed"
        );

        Some(state)
    }

    fn dismiss(&self, alert_id: &str) {
        if let Err(e) = self.alerts.dismiss(alert_id) {
            tracing::error!(alert_id = %alert_id, error = %e, "Failed to dismiss alert");
        }
    }
}
