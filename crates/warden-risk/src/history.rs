//! Download attempt history
//!
//! Append-only log of past download attempts, bounded to the most recent
//! 100 entries. Feeds the domain-reputation signal back into scoring.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use warden_storage::KeyValueStore;

use crate::Result;

/// Maximum number of entries retained; the oldest are dropped on overflow.
pub const HISTORY_CAPACITY: usize = 100;

const HISTORY_KEY: &str = "downloadHistory";

/// One observed download attempt. Immutable once recorded.
///
/// `dangerous` is the dangerous-extension signal captured at observation
/// time, not the final risk score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub filename: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub dangerous: bool,
}

impl HistoryEntry {
    pub fn new(filename: String, url: String, dangerous: bool) -> Self {
        Self {
            filename,
            url,
            timestamp: Utc::now(),
            dangerous,
        }
    }
}

/// Counts entries whose URL contains `domain` as a substring and whose
/// dangerous flag is unset. Substring containment, not hostname equality:
/// a domain that happens to be a substring of an unrelated longer hostname
/// also counts.
pub fn safe_download_count(entries: &[HistoryEntry], domain: &str) -> usize {
    entries
        .iter()
        .filter(|e| e.url.contains(domain) && !e.dangerous)
        .count()
}

pub struct HistoryLog {
    entries: Mutex<Vec<HistoryEntry>>,
    store: Arc<dyn KeyValueStore>,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            store,
        }
    }

    /// Loads the persisted log. A missing or unreadable value starts empty.
    pub fn load(&self) -> Result<()> {
        let loaded = match self.store.get(HISTORY_KEY)? {
            Some(json) => match serde_json::from_str::<Vec<HistoryEntry>>(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable persisted history");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut entries = self.entries.lock();
        *entries = loaded;
        truncate_to_capacity(&mut entries);

        tracing::info!(entries = entries.len(), "Download history loaded");

        Ok(())
    }

    /// Appends an entry, dropping the oldest past capacity, and writes the
    /// whole log back. Push, truncate and persist all happen under one lock
    /// so concurrent appends cannot overwrite each other's entry. A persist
    /// failure leaves the in-memory append in place.
    pub fn append(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.push(entry);
        truncate_to_capacity(&mut entries);

        let json = serde_json::to_string(&*entries)?;
        self.store.set(HISTORY_KEY, &json)?;
        Ok(())
    }

    /// Safe-download count for the current log; see [`safe_download_count`].
    pub fn count_safe_from_domain(&self, domain: &str) -> usize {
        safe_download_count(&self.entries.lock(), domain)
    }

    /// Read-only copy, oldest first, for the scorer and the history surface.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

fn truncate_to_capacity(entries: &mut Vec<HistoryEntry>) {
    if entries.len() > HISTORY_CAPACITY {
        let excess = entries.len() - HISTORY_CAPACITY;
        entries.drain(..excess);
    }
}
