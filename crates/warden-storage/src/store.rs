//! Key-value store trait and the in-memory adapter

use parking_lot::Mutex;
use std::collections::HashMap;

use crate::Result;

/// Persistence boundary used by the engine.
///
/// The contract is deliberately thin: get/set by key, values are opaque
/// strings (the engine stores JSON), and two calls are never atomic as a
/// pair. Anything that reads a value, derives a new one, and writes it back
/// must hold its own lock across the sequence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// HashMap-backed store for tests and in-process embedding.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
