//! Key/value preference storage
//!
//! The simulation only ever persists small string preferences (the selected
//! difficulty). The browser build reads them from LocalStorage; native runs
//! and tests use an in-memory map.

use std::collections::HashMap;

/// Persisted string preferences. Reads that fail for any reason return
/// `None`; writes are best-effort.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a single key
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to persist preference {}", key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("ash:difficulty"), None);
        store.set("ash:difficulty", "Hard");
        assert_eq!(store.get("ash:difficulty").as_deref(), Some("Hard"));
        store.set("ash:difficulty", "Easy");
        assert_eq!(store.get("ash:difficulty").as_deref(), Some("Easy"));
    }
}
