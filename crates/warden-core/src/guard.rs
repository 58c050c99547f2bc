//! Guard facade
//!
//! Owns the whitelist and history stores and the interception machinery,
//! and is the single entry point embedders talk to: platform events in,
//! port calls out, plus the read/replace surface the settings UI uses.

use std::sync::Arc;

use warden_intercept::{
    AlertSink, Coordinator, DecisionRouter, DownloadActions, InterceptionState,
};
use warden_risk::{DownloadDescriptor, HistoryEntry, HistoryLog, WhitelistStore};
use warden_storage::{KeyValueStore, SqliteStore};

use crate::config::Config;
use crate::Result;

pub struct Guard {
    whitelist: Arc<WhitelistStore>,
    history: Arc<HistoryLog>,
    coordinator: Coordinator,
    router: DecisionRouter,
}

impl Guard {
    /// Opens the SQLite store at the configured path and wires the engine
    /// to the given platform ports.
    pub fn new(
        config: &Config,
        actions: Arc<dyn DownloadActions>,
        alerts: Arc<dyn AlertSink>,
    ) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let store = Arc::new(SqliteStore::open(&config.database_path)?);
        Ok(Self::with_store(store, actions, alerts))
    }

    /// Wires the engine against any key-value store. Used for embedding
    /// and in-memory testing.
    pub fn with_store(
        store: Arc<dyn KeyValueStore>,
        actions: Arc<dyn DownloadActions>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let whitelist = Arc::new(WhitelistStore::new(Arc::clone(&store)));
        let history = Arc::new(HistoryLog::new(store));
        let coordinator = Coordinator::new(
            Arc::clone(&whitelist),
            Arc::clone(&history),
            actions,
            alerts,
        );
        let router = coordinator.router();

        Self {
            whitelist,
            history,
            coordinator,
            router,
        }
    }

    /// Loads persisted state: merges the default whitelist with the
    /// persisted user set and restores the download history. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        self.whitelist.initialize()?;
        self.history.load()?;

        tracing::info!("Guard initialized");

        Ok(())
    }

    // === Platform events ===

    pub fn on_download_created(&self, descriptor: &DownloadDescriptor) -> InterceptionState {
        self.coordinator.on_download_created(descriptor)
    }

    pub fn on_action_selected(
        &self,
        alert_id: &str,
        action_index: usize,
    ) -> Option<InterceptionState> {
        self.router.on_action_selected(alert_id, action_index)
    }

    /// Downloads currently paused awaiting a decision.
    pub fn pending_count(&self) -> usize {
        self.coordinator.pending_count()
    }

    // === Settings / history surface ===

    /// Wholesale whitelist replacement, persisted immediately. The settings
    /// UI computes add/remove client-side and submits the full set.
    pub fn update_whitelist(&self, new_set: Vec<String>) -> Result<()> {
        self.whitelist.replace(new_set)?;
        Ok(())
    }

    /// Sorted trusted domains, for display.
    pub fn whitelist(&self) -> Vec<String> {
        let mut domains: Vec<String> = self.whitelist.snapshot().into_iter().collect();
        domains.sort();
        domains
    }

    /// Recorded download attempts, oldest first, for display.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use warden_intercept::{InterceptError, RiskAlert};
    use warden_storage::MemoryStore;

    #[derive(Default)]
    struct RecordingActions {
        paused: Mutex<Vec<String>>,
        resumed: Mutex<Vec<String>>,
        cancelled: Mutex<Vec<String>>,
    }

    impl DownloadActions for RecordingActions {
        fn pause(&self, id: &str) -> std::result::Result<(), InterceptError> {
            self.paused.lock().push(id.to_string());
            Ok(())
        }

        fn resume(&self, id: &str) -> std::result::Result<(), InterceptError> {
            self.resumed.lock().push(id.to_string());
            Ok(())
        }

        fn cancel(&self, id: &str) -> std::result::Result<(), InterceptError> {
            self.cancelled.lock().push(id.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingAlerts {
        raised: Mutex<Vec<RiskAlert>>,
        dismissed: Mutex<Vec<String>>,
    }

    impl AlertSink for RecordingAlerts {
        fn raise(&self, alert: &RiskAlert) -> std::result::Result<(), InterceptError> {
            self.raised.lock().push(alert.clone());
            Ok(())
        }

        fn dismiss(&self, alert_id: &str) -> std::result::Result<(), InterceptError> {
            self.dismissed.lock().push(alert_id.to_string());
            Ok(())
        }
    }

    struct Fixture {
        guard: Guard,
        store: Arc<MemoryStore>,
        actions: Arc<RecordingActions>,
        alerts: Arc<RecordingAlerts>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let actions = Arc::new(RecordingActions::default());
        let alerts = Arc::new(RecordingAlerts::default());
        let guard = Guard::with_store(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            Arc::clone(&actions) as Arc<dyn DownloadActions>,
            Arc::clone(&alerts) as Arc<dyn AlertSink>,
        );

        Fixture {
            guard,
            store,
            actions,
            alerts,
        }
    }

    fn risky_descriptor() -> DownloadDescriptor {
        DownloadDescriptor::new(
            "11".to_string(),
            "setup.exe".to_string(),
            "https://files.example.com/setup.exe".to_string(),
        )
    }

    #[test]
    fn test_initialize_merges_persisted_whitelist() {
        let f = fixture();
        f.store.set("whitelist", r#"["a.com"]"#).unwrap();

        f.guard.initialize().unwrap();

        let domains = f.guard.whitelist();
        assert!(domains.contains(&"a.com".to_string()));
        assert!(domains.contains(&"github.com".to_string()));
    }

    #[test]
    fn test_intercept_and_allow_roundtrip() {
        let f = fixture();
        f.guard.initialize().unwrap();

        let state = f.guard.on_download_created(&risky_descriptor());
        assert_eq!(state, InterceptionState::Paused);
        assert_eq!(f.guard.pending_count(), 1);

        let alert_id = f.alerts.raised.lock()[0].id.clone();
        let state = f.guard.on_action_selected(&alert_id, 0);

        assert_eq!(state, Some(InterceptionState::Resumed));
        assert_eq!(*f.actions.resumed.lock(), vec!["11".to_string()]);
        assert!(f.actions.cancelled.lock().is_empty());
        assert_eq!(*f.alerts.dismissed.lock(), vec![alert_id]);
        assert_eq!(f.guard.pending_count(), 0);
        assert_eq!(f.guard.history().len(), 1);
    }

    #[test]
    fn test_update_whitelist_changes_the_verdict() {
        let f = fixture();
        f.guard.initialize().unwrap();

        assert_eq!(
            f.guard.on_download_created(&risky_descriptor()),
            InterceptionState::Paused
        );

        f.guard
            .update_whitelist(vec!["files.example.com".to_string()])
            .unwrap();

        // Same file, now from a trusted domain: 20 < 50
        assert_eq!(
            f.guard.on_download_created(&risky_descriptor()),
            InterceptionState::Released
        );
        assert_eq!(f.actions.paused.lock().len(), 1);

        // Replacement was persisted
        let persisted = f.store.get("whitelist").unwrap().unwrap();
        assert_eq!(persisted, r#"["files.example.com"]"#);
    }

    #[test]
    fn test_state_survives_reload() {
        let f = fixture();
        f.guard.initialize().unwrap();
        f.guard.on_download_created(&risky_descriptor());

        let reloaded = Guard::with_store(
            Arc::clone(&f.store) as Arc<dyn KeyValueStore>,
            Arc::new(RecordingActions::default()),
            Arc::new(RecordingAlerts::default()),
        );
        reloaded.initialize().unwrap();

        assert_eq!(reloaded.history().len(), 1);
        assert_eq!(reloaded.history()[0].filename, "setup.exe");
        assert!(reloaded.whitelist().contains(&"github.com".to_string()));
    }
}
