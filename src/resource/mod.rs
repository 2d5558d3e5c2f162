//! Resource fetch hooks.
//!
//! Read-only accessors that expose `{data, is_loading, error}` for a remote
//! resource keyed by id:
//!
//! - [`JobDetailHook`]: one posting, `GET /post/{id}`
//! - [`UserDetailHook`]: one user profile, `GET /user/{id}`
//! - [`JobListingHook`]: every posting, `GET /post`
//!
//! [`ResourceHook`] is the synchronous state; view state machines own one per
//! resource and settle it with results delivered by the runtime.
//! [`ResourceHandle`] wraps a hook for callers that want to drive a fetch
//! directly, from any number of tasks.

mod hook;

pub use hook::{FetchTicket, HookView, ResourceHook, ResourceState};

use crate::api::Transport;
use crate::client::JobBoardClient;
use crate::domain::error::Result;
use crate::domain::job::JobPosting;
use crate::domain::profile::UserProfile;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

pub type JobDetailHook = ResourceHook<JobPosting>;
pub type UserDetailHook = ResourceHook<UserProfile>;
pub type JobListingHook = ResourceHook<Vec<JobPosting>>;

/// Key under which the listing hook is activated.
pub const LISTING_KEY: &str = "all";

/// Loads a resource of type `R` by id.
#[async_trait]
pub trait Fetcher<R>: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<R>;
}

#[async_trait]
impl<T: Transport> Fetcher<JobPosting> for JobBoardClient<T> {
    async fn fetch(&self, id: &str) -> Result<JobPosting> {
        self.fetch_job(id).await
    }
}

#[async_trait]
impl<T: Transport> Fetcher<UserProfile> for JobBoardClient<T> {
    async fn fetch(&self, id: &str) -> Result<UserProfile> {
        self.fetch_user(id).await
    }
}

#[async_trait]
impl<T: Transport> Fetcher<Vec<JobPosting>> for JobBoardClient<T> {
    async fn fetch(&self, _id: &str) -> Result<Vec<JobPosting>> {
        self.list_jobs().await
    }
}

/// Shared hook that runs its own fetches.
///
/// The lock is only held to start and settle a fetch, never across the
/// request itself.
#[derive(Debug)]
pub struct ResourceHandle<R> {
    hook: Arc<Mutex<ResourceHook<R>>>,
}

impl<R> Clone for ResourceHandle<R> {
    fn clone(&self) -> Self {
        Self {
            hook: Arc::clone(&self.hook),
        }
    }
}

impl<R> Default for ResourceHandle<R> {
    fn default() -> Self {
        Self {
            hook: Arc::new(Mutex::new(ResourceHook::new())),
        }
    }
}

impl<R: Clone + Send> ResourceHandle<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ResourceHook<R>> {
        self.hook
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Activates the hook for `id` and, if that starts a fetch, performs it.
    ///
    /// Returns `true` if this call's result was applied.
    pub async fn load<F>(&self, id: Option<&str>, fetcher: &F) -> bool
    where
        F: Fetcher<R> + ?Sized,
    {
        let ticket = self.lock().activate(id);
        match ticket {
            Some(ticket) => self.run(ticket, fetcher).await,
            None => false,
        }
    }

    /// Refetches the current id, superseding any fetch in flight.
    pub async fn reload<F>(&self, fetcher: &F) -> bool
    where
        F: Fetcher<R> + ?Sized,
    {
        let ticket = self.lock().reload();
        match ticket {
            Some(ticket) => self.run(ticket, fetcher).await,
            None => false,
        }
    }

    async fn run<F>(&self, ticket: FetchTicket, fetcher: &F) -> bool
    where
        F: Fetcher<R> + ?Sized,
    {
        let result = fetcher.fetch(&ticket.id).await.map_err(|e| e.message());
        self.lock().settle(&ticket, result)
    }

    pub fn unmount(&self) {
        self.lock().unmount();
    }

    /// Copy of the current state.
    #[must_use]
    pub fn state(&self) -> ResourceState<R> {
        self.lock().state().clone()
    }

    #[must_use]
    pub fn data(&self) -> Option<R> {
        self.lock().data().cloned()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error().map(String::from)
    }
}
