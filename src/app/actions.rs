//! Actions representing side effects to be executed by the view runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event.
//! Handlers stay synchronous and free of I/O; the runtime executes actions
//! against the [`JobBoardClient`](crate::client::JobBoardClient) and feeds
//! the outcomes back as events.

use crate::domain::roster::ApplicantRoster;
use crate::client::NavigationTarget;
use crate::resource::FetchTicket;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Loads the posting named by the ticket; answered with `JobSettled`.
    FetchJob(FetchTicket),

    /// Loads the poster's profile; answered with `PosterSettled`.
    FetchPoster(FetchTicket),

    /// Deletes the posting; answered with `DeleteSettled`.
    ///
    /// Only emitted after the confirmation step.
    DeleteJob { job_id: String },

    /// Applies the viewer to the posting; answered with `ApplySettled`.
    ApplyToJob {
        job_id: String,
        /// Roster at the time of the click, for the duplicate pre-check.
        roster: ApplicantRoster,
    },

    /// Leaves the view.
    Navigate(NavigationTarget),
}
