//! Interception coordinator

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use warden_risk::{
    assess, has_dangerous_extension, DownloadDescriptor, HistoryEntry, HistoryLog, WhitelistStore,
};

use crate::ports::{AlertSink, DownloadActions, RiskAlert};
use crate::router::DecisionRouter;
use crate::state::InterceptionState;

/// Drives a download-created event through the interception state machine.
///
/// The coordinator owns the association between raised alerts and the
/// downloads they suspend. An alert the user never answers keeps its entry
/// indefinitely; the table is bounded by the platform's own download
/// identifier space.
pub struct Coordinator {
    whitelist: Arc<WhitelistStore>,
    history: Arc<HistoryLog>,
    actions: Arc<dyn DownloadActions>,
    alerts: Arc<dyn AlertSink>,
    /// Alert id -> download id for downloads paused awaiting a decision
    pending: Arc<Mutex<HashMap<String, String>>>,
}

impl Coordinator {
    pub fn new(
        whitelist: Arc<WhitelistStore>,
        history: Arc<HistoryLog>,
        actions: Arc<dyn DownloadActions>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            whitelist,
            history,
            actions,
            alerts,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Router for the user-action side of the machine, sharing this
    /// coordinator's ports and association table.
    pub fn router(&self) -> DecisionRouter {
        DecisionRouter::new(
            Arc::clone(&self.actions),
            Arc::clone(&self.alerts),
            Arc::clone(&self.pending),
        )
    }

    /// Handles one download-created event and returns the state it reached.
    ///
    /// A source URL that does not yield a hostname aborts the event before
    /// anything is recorded or scored: the download proceeds unexamined.
    pub fn on_download_created(&self, descriptor: &DownloadDescriptor) -> InterceptionState {
        let Some(domain) = descriptor.source_domain() else {
            tracing::warn!(
                download_id = %descriptor.id,
                url = %descriptor.url,
                "Source URL has no parseable host, download proceeds unexamined"
            );
            return InterceptionState::Unexamined;
        };

        let dangerous = has_dangerous_extension(&descriptor.file_name);
        let entry =
            HistoryEntry::new(descriptor.file_name.clone(), descriptor.url.clone(), dangerous);
        if let Err(e) = self.history.append(entry) {
            // The in-memory entry stands; only the write-back failed
            tracing::error!(
                download_id = %descriptor.id,
                error = %e,
                "Failed to persist history entry"
            );
        }

        // The snapshot includes the entry just recorded, so a safe download
        // counts toward its own domain's reputation
        let assessment = assess(
            descriptor,
            &domain,
            &self.whitelist.snapshot(),
            &self.history.snapshot(),
        );

        if !assessment.requires_interception() {
            tracing::info!(
                download_id = %descriptor.id,
                score = assessment.score,
                "Download released"
            );
            return InterceptionState::Released;
        }

        if let Err(e) = self.actions.pause(&descriptor.id) {
            tracing::error!(
                download_id = %descriptor.id,
                error = %e,
                "Failed to pause download, no alert raised"
            );
            return InterceptionState::Scored;
        }

        let alert = RiskAlert::new(&descriptor.file_name, &domain, &assessment);
        self.pending
            .lock()
            .insert(alert.id.clone(), descriptor.id.clone());

        if let Err(e) = self.alerts.raise(&alert) {
            tracing::error!(alert_id = %alert.id, error = %e, "Failed to raise alert");
        }

        tracing::info!(
            download_id = %descriptor.id,
            alert_id = %alert.id,
            score = assessment.score,
            "Download paused pending user decision"
        );

        InterceptionState::Paused
    }

    /// Number of downloads currently paused awaiting a decision.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}
