//! Jobboard: a client for the job-board REST API.
//!
//! The crate covers the client side of a job board: account actions,
//! posting management and applications, profile edits, and the view state
//! behind the job detail, listing and profile pages.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  View Layer (app/, ui/)                             │
//! │  - Page state and event handling                    │
//! │  - View models and text rendering                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌─────────────────────┐
//! │ Resources     │   │ Actions (client/)   │
//! │ (resource/)   │   │ - Validate forms    │
//! │ - Ticketed    │   │ - Build requests    │
//! │   fetch hooks │   │ - Update session    │
//! └───────────────┘   └─────────────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Transport (api/)          Session (session.rs)     │
//! │  - reqwest / scripted      - Versioned, one lock    │
//! │                            - Key/value persistence  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Storage, Infrastructure, Observability     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Request types, endpoints, and transports
//! - [`app`]: Page state machines and the applicant roster
//! - [`client`]: One async operation per user intent
//! - [`domain`]: Core types (postings, profiles, session user, forms, errors)
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Tracing subscriber and trace file export
//! - [`resource`]: Fetch hooks for postings, users and the listing
//! - [`session`]: The session controller
//! - [`storage`]: Key/value persistence for the session
//! - [`ui`]: View models and renderers
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/jobboard/config.toml
//! base_url = "http://localhost:3000/api"
//! data_dir = "~/.local/share/jobboard"
//! request_timeout_secs = 30
//! trace_level = "debug"
//! trace_export = true
//! ```
//!
//! `JOBBOARD_BASE_URL` and `JOBBOARD_DATA_DIR` override the file.
//!
//! # Example
//!
//! ```no_run
//! use jobboard::domain::FormSubmission;
//! use jobboard::{initialize, Config};
//!
//! # async fn run() -> jobboard::Result<()> {
//! let client = initialize(&Config::default())?;
//! let form = FormSubmission::new()
//!     .with_text("email", "ada@example.com")
//!     .with_text("password", "s3cret");
//! let target = client.login(&form).await?;
//! println!("go to {target}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod resource;
pub mod session;
pub mod storage;
pub mod ui;

pub use api::{HttpTransport, ScriptedTransport, Transport};
pub use app::{handle_event, Action, ApplicantRoster, Event, JobDetailRuntime, JobDetailState};
pub use client::{ApplyReceipt, JobBoardClient, NavigationTarget, PostingMode};
pub use domain::{ErrorKind, JobBoardError, Result};
pub use session::SessionController;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root every endpoint path is appended to.
    pub base_url: String,

    /// Directory holding `session.json` and trace files.
    pub data_dir: PathBuf,

    /// Whole-request timeout. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,

    /// Filter directive used when `RUST_LOG` is unset. Default: `"info"`
    pub trace_level: Option<String>,

    /// Export spans as JSON lines into the data directory.
    pub trace_export: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: infrastructure::get_data_dir(),
            request_timeout_secs: None,
            trace_level: None,
            trace_export: false,
        }
    }
}

impl Config {
    /// Parses configuration from a string map, falling back to defaults for
    /// missing or unparsable values.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use jobboard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "https://jobs.example/api/".to_string());
    /// map.insert("request_timeout_secs".to_string(), "15".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.base_url, "https://jobs.example/api/");
    /// assert_eq!(config.request_timeout_secs, Some(15));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        Self {
            base_url: text("base_url").map_or(defaults.base_url, String::from),
            data_dir: text("data_dir").map_or(defaults.data_dir, infrastructure::expand_tilde),
            request_timeout_secs: text("request_timeout_secs")
                .and_then(|value| value.parse::<u64>().ok())
                .filter(|secs| *secs > 0),
            trace_level: text("trace_level").map(String::from),
            trace_export: text("trace_export")
                .is_some_and(|value| matches!(value, "true" | "1" | "yes")),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Config`] if the file cannot be read or is
    /// not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JobBoardError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let table: toml::Table = content.parse().map_err(|e| {
            JobBoardError::Config(format!("invalid TOML in {}: {e}", path.display()))
        })?;

        let map = table
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(text) => text,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();
        Ok(Self::from_map(&map))
    }

    /// Applies `JOBBOARD_BASE_URL` and `JOBBOARD_DATA_DIR` from the process
    /// environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup("JOBBOARD_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(data_dir) = lookup("JOBBOARD_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            self.data_dir = infrastructure::expand_tilde(&data_dir);
        }
        self
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join(storage::SESSION_FILE)
    }
}

/// Opens the persisted session and builds an HTTP client.
///
/// # Errors
///
/// Returns a storage error if the session file exists but cannot be read,
/// and a configuration error if the HTTP client cannot be built.
pub fn initialize(config: &Config) -> Result<JobBoardClient<HttpTransport>> {
    tracing::debug!(
        base_url = %config.base_url,
        data_dir = %config.data_dir.display(),
        "initializing jobboard client"
    );

    let store = storage::JsonFileStore::open(config.session_file())?;
    let session = SessionController::open(Box::new(store))?;
    let transport = HttpTransport::new(config.base_url.clone(), config.request_timeout())?;

    Ok(JobBoardClient::new(transport, Arc::new(session)))
}
