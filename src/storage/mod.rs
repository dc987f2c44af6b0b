//! Key-value persistence boundary.
//!
//! Every collection in the core serializes itself to JSON text and writes it
//! through this interface in the same call that mutates the in-memory state.
//! The backend is never trusted to validate content; readers recover from
//! missing or corrupt values.

pub mod json_file;

use std::collections::HashMap;
use std::sync::Mutex;

pub use json_file::JsonFileStore;

/// Abstraction over synchronous key-value backends.
///
/// `set` is infallible by contract, mirroring device-local storage APIs.
/// Backends that can fail internally log the failure and keep the previous
/// value rather than surfacing an error to mutation call sites.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory backend used by tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get("expenses"), None);
        store.set("expenses", "[]");
        assert_eq!(store.get("expenses").as_deref(), Some("[]"));
        store.set("expenses", "[1]");
        assert_eq!(store.get("expenses").as_deref(), Some("[1]"));
    }
}
