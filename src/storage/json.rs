//! JSON file-based key/value store.
//!
//! Keeps the whole map in memory and rewrites the file on every change using
//! write-to-temp + rename, so a crash never leaves a half-written session.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "token": "\"eyJhbGciOi...\"",
//!     "user": "{\"_id\":\"u1\",\"name\":\"Ada\",\"role\":\"user\"}"
//!   }
//! }
//! ```

use crate::domain::error::{JobBoardError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key/value backend.
///
/// `Send` but not `Sync`; the session controller serializes access behind its
/// own lock.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreFile,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file yields an empty store; nothing is written until the
    /// first change.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but is not a valid store document.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jobboard::storage::{JsonFileStore, KeyValueStore};
    ///
    /// let store = JsonFileStore::open("/tmp/jobboard/session.json")?;
    /// let token = store.get("token")?;
    /// # Ok::<(), jobboard::JobBoardError>(())
    /// ```
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening session store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load(&file_path)?
        } else {
            tracing::debug!("no session file yet, starting empty");
            StoreFile::default()
        };

        tracing::debug!(entries = data.entries.len(), "session store opened");
        Ok(Self { file_path, data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load(path: &Path) -> Result<StoreFile> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreFile = serde_json::from_str(&contents)
            .map_err(|e| JobBoardError::Storage(format!("failed to parse session file: {e}")))?;

        if data.version != FORMAT_VERSION {
            return Err(JobBoardError::Storage(format!(
                "unsupported session file version {}",
                data.version
            )));
        }
        Ok(data)
    }

    /// Persists `next` and adopts it as the in-memory state only once the
    /// rename succeeded.
    fn commit(&mut self, next: StoreFile) -> Result<()> {
        let json = serde_json::to_string_pretty(&next)
            .map_err(|e| JobBoardError::Storage(format!("failed to serialize session file: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.data = next;
        tracing::trace!(path = ?self.file_path, "session store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", count = entries.len()).entered();

        let mut next = self.data.clone();
        for (key, value) in entries {
            next.entries.insert((*key).to_string(), value.clone());
        }
        self.commit(next)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        let _span = tracing::debug_span!("json_store_remove", count = keys.len()).entered();

        if !keys.iter().any(|key| self.data.entries.contains_key(*key)) {
            return Ok(());
        }

        let mut next = self.data.clone();
        for key in keys {
            next.entries.remove(*key);
        }
        self.commit(next)
    }
}
