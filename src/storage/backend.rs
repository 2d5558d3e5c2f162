//! Key/value store abstraction for persisted client state.
//!
//! The client persists exactly what a browser would keep in local storage:
//! string keys mapping to JSON-encoded string values. This trait lets the
//! session controller run against a file on disk or an in-memory map.

use crate::domain::error::Result;

/// Abstraction over persistent string key/value backends.
///
/// Batch writes are all-or-nothing from the caller's point of view: a backend
/// either persists every entry of a `set_many` call or returns an error and
/// leaves its visible state unchanged.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): JSON file with atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local map
pub trait KeyValueStore: Send {
    /// Returns the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes every `(key, value)` pair in one operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; no entry is updated in that case.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()>;

    /// Removes every key in one operation. Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn remove_many(&mut self, keys: &[&str]) -> Result<()>;
}
