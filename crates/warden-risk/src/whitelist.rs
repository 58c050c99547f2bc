//! Trusted-domain whitelist
//!
//! Membership is an exact, case-insensitive string match. There is no
//! suffix or subdomain matching: `mail.google.com` is not trusted because
//! `google.com` is.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

use warden_storage::KeyValueStore;

use crate::Result;

/// Domains every installation trusts out of the box. `initialize` unions
/// these with whatever the user has persisted, so they are a permanent
/// lower bound of the set.
pub const DEFAULT_WHITELIST: &[&str] = &[
    "microsoft.com",
    "adobe.com",
    "mozilla.org",
    "google.com",
    "apple.com",
    "oracle.com",
    "python.org",
    "github.com",
];

const WHITELIST_KEY: &str = "whitelist";

pub struct WhitelistStore {
    domains: Mutex<HashSet<String>>,
    store: Arc<dyn KeyValueStore>,
}

impl WhitelistStore {
    /// Creates a store seeded with the default domains. Call `initialize`
    /// to merge in the persisted user set.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let domains = DEFAULT_WHITELIST.iter().map(|d| d.to_string()).collect();
        Self {
            domains: Mutex::new(domains),
            store,
        }
    }

    /// Merges the persisted set with the defaults (set union) and persists
    /// the result. Idempotent: re-running against the same persisted input
    /// yields the same merged set.
    pub fn initialize(&self) -> Result<()> {
        let persisted = match self.store.get(WHITELIST_KEY)? {
            Some(json) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(domains) => domains,
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable persisted whitelist");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut domains = self.domains.lock();
        *domains = DEFAULT_WHITELIST
            .iter()
            .map(|d| d.to_string())
            .chain(persisted.into_iter().map(|d| d.to_lowercase()))
            .collect();
        self.persist(&domains)?;

        tracing::info!(domains = domains.len(), "Whitelist initialized");

        Ok(())
    }

    /// Exact membership test against the current set.
    pub fn is_trusted(&self, domain: &str) -> bool {
        self.domains.lock().contains(&domain.to_lowercase())
    }

    /// Wholesale replacement, persisted immediately. The settings surface
    /// computes add/remove client-side and submits the full set.
    pub fn replace(&self, new_set: Vec<String>) -> Result<()> {
        let mut domains = self.domains.lock();
        *domains = new_set.into_iter().map(|d| d.to_lowercase()).collect();
        self.persist(&domains)?;

        tracing::info!(domains = domains.len(), "Whitelist replaced");

        Ok(())
    }

    /// Read-only copy for the scorer and the settings surface.
    pub fn snapshot(&self) -> HashSet<String> {
        self.domains.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.domains.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.lock().is_empty()
    }

    // Caller holds the domain lock, so the read-compute-write against the
    // store cannot interleave with another mutation.
    fn persist(&self, domains: &HashSet<String>) -> Result<()> {
        let mut sorted: Vec<&String> = domains.iter().collect();
        sorted.sort();
        let json = serde_json::to_string(&sorted)?;
        self.store.set(WHITELIST_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_storage::MemoryStore;

    fn store_with_persisted(domains: &[&str]) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        let json = serde_json::to_string(domains).unwrap();
        store.set(WHITELIST_KEY, &json).unwrap();
        store
    }

    #[test]
    fn test_initialize_merges_defaults_with_persisted() {
        let store = store_with_persisted(&["a.com"]);
        let whitelist = WhitelistStore::new(store);
        whitelist.initialize().unwrap();

        let snapshot = whitelist.snapshot();
        assert_eq!(snapshot.len(), DEFAULT_WHITELIST.len() + 1);
        assert!(snapshot.contains("a.com"));
        for default in DEFAULT_WHITELIST {
            assert!(snapshot.contains(*default), "missing default {default}");
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let store = store_with_persisted(&["a.com"]);
        let whitelist = WhitelistStore::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);

        whitelist.initialize().unwrap();
        let first = store.get(WHITELIST_KEY).unwrap();

        whitelist.initialize().unwrap();
        let second = store.get(WHITELIST_KEY).unwrap();

        assert_eq!(first, second);
        assert_eq!(whitelist.len(), DEFAULT_WHITELIST.len() + 1);
    }

    #[test]
    fn test_initialize_without_persisted_set() {
        let whitelist = WhitelistStore::new(Arc::new(MemoryStore::new()));
        whitelist.initialize().unwrap();
        assert_eq!(whitelist.len(), DEFAULT_WHITELIST.len());
    }

    #[test]
    fn test_is_trusted_exact_match_only() {
        let whitelist = WhitelistStore::new(Arc::new(MemoryStore::new()));

        assert!(whitelist.is_trusted("google.com"));
        assert!(whitelist.is_trusted("GOOGLE.COM"));
        // No subdomain semantics
        assert!(!whitelist.is_trusted("mail.google.com"));
        assert!(!whitelist.is_trusted("notgoogle.com"));
    }

    #[test]
    fn test_replace_persists_and_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let whitelist = WhitelistStore::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);

        whitelist
            .replace(vec!["One.com".to_string(), "two.com".to_string()])
            .unwrap();
        let first = store.get(WHITELIST_KEY).unwrap();
        assert_eq!(first.as_deref(), Some(r#"["one.com","two.com"]"#));

        whitelist
            .replace(vec!["one.com".to_string(), "two.com".to_string()])
            .unwrap();
        let second = store.get(WHITELIST_KEY).unwrap();
        assert_eq!(first, second);

        // Replacement is wholesale: defaults are gone until re-initialized
        assert!(!whitelist.is_trusted("google.com"));
        assert!(whitelist.is_trusted("one.com"));
    }
}
