//! HTTP action layer.
//!
//! One async operation per user intent. Each operation validates its form
//! before touching the network, attaches the session token as a bearer
//! credential when one exists, and returns a [`Result`]: the navigation
//! target (or data) on success, a [`JobBoardError`] whose
//! [`kind`](JobBoardError::kind) tells the caller what went wrong otherwise.
//!
//! # Operations
//!
//! | Module | Operation | Success |
//! |---|---|---|
//! | `auth` | [`register`](JobBoardClient::register) | [`NavigationTarget::Login`] |
//! | `auth` | [`login`](JobBoardClient::login) | [`NavigationTarget::JobListing`] |
//! | `auth` | [`logout`](JobBoardClient::logout) | [`NavigationTarget::Login`] |
//! | `jobs` | [`save_job_posting`](JobBoardClient::save_job_posting) | [`NavigationTarget::JobListing`] |
//! | `jobs` | [`delete_job_posting`](JobBoardClient::delete_job_posting) | [`NavigationTarget::JobListing`] |
//! | `jobs` | [`apply_to_job`](JobBoardClient::apply_to_job) | [`ApplyReceipt`] |
//! | `profile` | [`edit_profile`](JobBoardClient::edit_profile) | [`NavigationTarget::Profile`] |
//! | `profile` | [`change_password`](JobBoardClient::change_password) | [`NavigationTarget::Profile`] |
//!
//! Read accessors used by the resource hooks live in `reads`.

mod auth;
mod jobs;
mod profile;
mod reads;

pub use jobs::{ApplyReceipt, PostingMode};

use crate::api::{ApiRequest, ApiResponse, Transport};
use crate::domain::error::{JobBoardError, Result};
use crate::domain::session::SessionUser;
use crate::session::SessionController;
use std::sync::Arc;
use tracing::Instrument;

/// Where the front end should go after a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Login,
    JobListing,
    Profile(String),
}

impl std::fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => f.write_str("/login"),
            Self::JobListing => f.write_str("/jobs"),
            Self::Profile(id) => write!(f, "/profile/{id}"),
        }
    }
}

/// Entry point to every remote operation.
///
/// Cheap to share: the session controller is reference counted and the
/// transport is expected to be (as `reqwest::Client` is).
#[derive(Debug, Clone)]
pub struct JobBoardClient<T> {
    transport: T,
    session: Arc<SessionController>,
}

impl<T: Transport> JobBoardClient<T> {
    pub const fn new(transport: T, session: Arc<SessionController>) -> Self {
        Self { transport, session }
    }

    #[must_use]
    pub const fn session(&self) -> &Arc<SessionController> {
        &self.session
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request` with the current token attached.
    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = request.with_bearer(self.session.token());
        let span = tracing::debug_span!(
            "dispatch",
            method = %request.method,
            path = %request.path,
            authenticated = request.bearer.is_some()
        );
        self.transport.send(request).instrument(span).await
    }

    /// Returns the signed-in user or an auth error naming `operation`.
    fn require_user(&self, operation: &str) -> Result<SessionUser> {
        self.session.current_user().ok_or_else(|| {
            tracing::debug!(operation = operation, "operation requires a signed-in user");
            JobBoardError::Auth(format!("You must be logged in to {operation}."))
        })
    }
}
