//! Error types for the job-board client.
//!
//! This module defines the centralized error type [`JobBoardError`], its
//! discriminant [`ErrorKind`], and a type alias [`Result`] used by every layer.
//! All errors are implemented using the `thiserror` crate.
//!
//! Every action returns a `Result`, whether it validates a form, talks to the
//! remote API or writes the session. Callers match on [`JobBoardError::kind`]
//! to decide whether to navigate, display the message, or log and move on.

use thiserror::Error;

/// The main error type for job-board client operations.
///
/// # Examples
///
/// ```
/// use jobboard::domain::{ErrorKind, JobBoardError};
///
/// let err = JobBoardError::Validation("Please type email and password.".to_string());
/// assert_eq!(err.kind(), ErrorKind::Validation);
/// assert_eq!(err.message(), "Please type email and password.");
/// ```
#[derive(Debug, Error)]
pub enum JobBoardError {
    /// Required form fields are missing or inconsistent.
    ///
    /// Raised before any network call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote API rejected the credentials, or no session is available
    /// for an operation that needs one.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A job application was refused, either pre-flight (already applied) or
    /// by the remote API.
    #[error("Application error: {0}")]
    Application(String),

    /// The remote API answered with a non-success status not otherwise
    /// classified.
    ///
    /// `payload` holds the decoded response body so callers can inspect the
    /// server's own error document.
    #[error("Remote error ({status}): {message}")]
    Remote {
        status: u16,
        message: String,
        payload: serde_json::Value,
    },

    /// Transport failure: connection refused, DNS, TLS, timeout, or a body
    /// that could not be decoded.
    #[error("Network error: {0}")]
    Network(String),

    /// Reading or writing the persisted session failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Discriminant of a [`JobBoardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Auth,
    Application,
    Remote,
    Network,
    Storage,
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Auth => "auth",
            Self::Application => "application",
            Self::Remote => "remote",
            Self::Network => "network",
            Self::Storage => "storage",
            Self::Config => "config",
        };
        f.write_str(name)
    }
}

impl JobBoardError {
    /// Returns the discriminant used by callers to route the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Application(_) => ErrorKind::Application,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::Network(_) => ErrorKind::Network,
            Self::Storage(_) | Self::Io(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns the user-facing message without the kind prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation(m)
            | Self::Auth(m)
            | Self::Application(m)
            | Self::Network(m)
            | Self::Storage(m)
            | Self::Config(m) => m.clone(),
            Self::Remote { message, .. } => message.clone(),
            Self::Io(e) => e.to_string(),
        }
    }
}

impl From<reqwest::Error> for JobBoardError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// A specialized `Result` type for job-board operations.
pub type Result<T> = std::result::Result<T, JobBoardError>;
