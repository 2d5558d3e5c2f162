//! Storage layer for persisted client state.
//!
//! The client persists two string-keyed entries, [`TOKEN_KEY`] and
//! [`USER_KEY`], each holding a JSON-encoded value. No expiry metadata is
//! stored alongside them.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-memory implementation

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Key holding the JSON-encoded bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON-encoded user record.
pub const USER_KEY: &str = "user";

/// File name of the session store inside the data directory.
pub const SESSION_FILE: &str = "session.json";
