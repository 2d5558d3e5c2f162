//! Domain layer for the job-board client.
//!
//! Core types shared by every other layer, independent of HTTP, persistence
//! and rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types, error kinds and result alias
//! - [`form`]: Submitted form data consumed by actions
//! - [`job`]: Job postings, positions and applicants
//! - [`profile`]: User profile projection
//! - [`roster`]: Applicants with optimistic entries
//! - [`session`]: Session token and user snapshot

pub mod error;
pub mod form;
pub mod job;
pub mod profile;
pub mod roster;
pub mod session;

pub use error::{ErrorKind, JobBoardError, Result};
pub use form::{FieldValue, FileUpload, FormSubmission};
pub use job::{Applicant, JobPosting, Position, PostedBy};
pub use profile::UserProfile;
pub use roster::{ApplicantRoster, ReconcileReport};
pub use session::{ProfilePatch, Session, SessionUser, APPLICANT_ROLE};

/// Resolves a record id sent as Mongo-style `_id`, plain `id`, or both.
/// `_id` wins when both are present.
fn record_id(mongo_id: Option<String>, id: Option<String>) -> std::result::Result<String, String> {
    mongo_id
        .or(id)
        .ok_or_else(|| "missing field `_id`".to_string())
}
