//! Process-local key/value store.
//!
//! Used for ephemeral sessions (`--no-persist`) and in tests.

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}
