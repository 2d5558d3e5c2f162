//! Read-only accessors backing the resource hooks.

use super::JobBoardClient;
use crate::api::{endpoints, ApiRequest, Transport};
use crate::domain::error::Result;
use crate::domain::job::JobPosting;
use crate::domain::profile::UserProfile;
use serde::Deserialize;

/// The listing endpoint answers with either a bare array or a wrapper.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Bare(Vec<JobPosting>),
    Wrapped { posts: Vec<JobPosting> },
}

impl<T: Transport> JobBoardClient<T> {
    /// Fetches one posting.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Remote`](crate::JobBoardError::Remote) on a
    /// non-success status and a network error on transport or decode failure.
    pub async fn fetch_job(&self, job_id: &str) -> Result<JobPosting> {
        let response = self
            .dispatch(ApiRequest::get(endpoints::post_detail(job_id)))
            .await?;
        if !response.is_success() {
            return Err(response.into_remote_error("Could not load job posting"));
        }
        response.json()
    }

    /// Fetches one user's public profile.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_job`](Self::fetch_job).
    pub async fn fetch_user(&self, user_id: &str) -> Result<UserProfile> {
        let response = self
            .dispatch(ApiRequest::get(endpoints::user_detail(user_id)))
            .await?;
        if !response.is_success() {
            return Err(response.into_remote_error("Could not load user"));
        }
        response.json()
    }

    /// Fetches every posting.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_job`](Self::fetch_job).
    pub async fn list_jobs(&self) -> Result<Vec<JobPosting>> {
        let response = self.dispatch(ApiRequest::get(endpoints::LIST_POSTS)).await?;
        if !response.is_success() {
            return Err(response.into_remote_error("Could not load job postings"));
        }
        Ok(match response.json::<Listing>()? {
            Listing::Bare(posts) | Listing::Wrapped { posts } => posts,
        })
    }
}
