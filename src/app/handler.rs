//! Event handling and state transition logic for the job detail page.
//!
//! [`handle_event`] is the only place a [`JobDetailState`] changes. It is
//! synchronous: remote work is requested by returning [`Action`]s, and its
//! outcome comes back as a `*Settled` event. Because each event is processed
//! to completion before the next, a second `Apply` arriving while the first
//! is in flight always sees `is_applying` set and is ignored.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `Unmount`, `Refresh`, `SessionChanged`
//! - **User**: `Apply`, `RequestDelete`, `CancelDelete`, `ConfirmDelete`
//! - **Results**: `JobSettled`, `PosterSettled`, `ApplySettled`,
//!   `DeleteSettled`

use crate::domain::roster::ApplicantRoster;
use crate::app::state::JobDetailState;
use crate::app::Action;
use crate::client::NavigationTarget;
use crate::domain::error::Result;
use crate::domain::job::{Applicant, JobPosting};
use crate::domain::profile::UserProfile;
use crate::domain::session::SessionUser;
use crate::resource::FetchTicket;

/// Events from the user, the session, or completed remote calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The page is shown for `job_id`.
    Mount { job_id: String },

    /// The page is left; pending results are discarded.
    Unmount,

    /// Reloads the posting from the server.
    Refresh,

    /// The signed-in user changed.
    SessionChanged { viewer: Option<SessionUser> },

    /// Apply button pressed.
    Apply,

    /// Delete control pressed; opens the confirmation.
    RequestDelete,

    /// Confirmation dismissed.
    CancelDelete,

    /// Confirmation accepted.
    ConfirmDelete,

    JobSettled {
        ticket: FetchTicket,
        result: std::result::Result<JobPosting, String>,
    },

    PosterSettled {
        ticket: FetchTicket,
        result: std::result::Result<UserProfile, String>,
    },

    /// Outcome of an apply to `job_id`. Dropped if the page has moved on.
    ApplySettled {
        job_id: String,
        result: std::result::Result<Applicant, String>,
    },

    /// Outcome of a delete of `job_id`. Dropped if the page has moved on.
    DeleteSettled {
        job_id: String,
        result: std::result::Result<NavigationTarget, String>,
    },
}

/// Processes an event, mutates the page state, and returns whether the page
/// needs re-rendering plus the actions to execute.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for transitions that
/// consult fallible state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut JobDetailState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Mount { job_id } => {
            let mut actions = vec![];
            if let Some(ticket) = state.job.activate(Some(job_id)) {
                tracing::debug!(job_id = %job_id, "loading posting");
                state.roster = ApplicantRoster::new();
                state.poster.unmount();
                state.is_applying = false;
                state.is_deleting = false;
                state.delete_dialog_open = false;
                state.last_error = None;
                actions.push(Action::FetchJob(ticket));
            }
            Ok((!actions.is_empty(), actions))
        }
        Event::Unmount => {
            state.job.unmount();
            state.poster.unmount();
            state.roster = ApplicantRoster::new();
            state.is_applying = false;
            state.is_deleting = false;
            state.delete_dialog_open = false;
            state.last_error = None;
            Ok((false, vec![]))
        }
        Event::Refresh => Ok(state
            .job
            .reload()
            .map_or((false, vec![]), |ticket| (true, vec![Action::FetchJob(ticket)]))),
        Event::SessionChanged { viewer } => {
            if &state.viewer == viewer {
                return Ok((false, vec![]));
            }
            tracing::debug!(
                viewer = ?viewer.as_ref().map(|user| user.id.as_str()),
                "viewer changed"
            );
            state.viewer.clone_from(viewer);
            Ok((true, vec![]))
        }
        Event::Apply => {
            if state.is_applying {
                tracing::debug!("apply already in flight, ignoring");
                return Ok((false, vec![]));
            }
            if !state.can_apply() {
                tracing::debug!(
                    already_applied = state.already_applied(),
                    is_owner = state.is_owner(),
                    "viewer cannot apply"
                );
                return Ok((false, vec![]));
            }
            let Some(job_id) = state.job.id().map(String::from) else {
                return Ok((false, vec![]));
            };

            state.is_applying = true;
            state.last_error = None;
            Ok((
                true,
                vec![Action::ApplyToJob {
                    job_id,
                    roster: state.roster.clone(),
                }],
            ))
        }
        Event::ApplySettled { job_id, result } => {
            if state.job.id() != Some(job_id.as_str()) {
                tracing::debug!(job_id = %job_id, "apply result for another posting, dropping");
                return Ok((false, vec![]));
            }
            state.is_applying = false;
            match result {
                Ok(applicant) => {
                    if !state.roster.append_optimistic(applicant.clone()) {
                        tracing::debug!(user_id = %applicant.id, "applicant already in roster");
                    }
                }
                Err(message) => {
                    tracing::error!(error = %message, "error during job application");
                    state.last_error = Some(message.clone());
                }
            }
            Ok((true, vec![]))
        }
        Event::RequestDelete => {
            if !state.is_owner() || state.is_deleting {
                tracing::debug!("delete requested by non-owner or while deleting, ignoring");
                return Ok((false, vec![]));
            }
            state.delete_dialog_open = true;
            Ok((true, vec![]))
        }
        Event::CancelDelete => {
            let was_open = std::mem::replace(&mut state.delete_dialog_open, false);
            Ok((was_open, vec![]))
        }
        Event::ConfirmDelete => {
            if !state.delete_dialog_open {
                return Ok((false, vec![]));
            }
            state.delete_dialog_open = false;
            let Some(job_id) = state.job.id().map(String::from) else {
                return Ok((true, vec![]));
            };
            state.is_deleting = true;
            state.last_error = None;
            Ok((true, vec![Action::DeleteJob { job_id }]))
        }
        Event::DeleteSettled { job_id, result } => {
            if state.job.id() != Some(job_id.as_str()) {
                tracing::debug!(job_id = %job_id, "delete result for another posting, dropping");
                return Ok((false, vec![]));
            }
            state.is_deleting = false;
            match result {
                Ok(target) => Ok((false, vec![Action::Navigate(target.clone())])),
                Err(message) => {
                    tracing::error!(error = %message, "failed to delete");
                    state.last_error = Some(message.clone());
                    Ok((true, vec![]))
                }
            }
        }
        Event::JobSettled { ticket, result } => {
            if !state.job.settle(ticket, result.clone()) {
                return Ok((false, vec![]));
            }

            let mut actions = vec![];
            if let Ok(job) = result {
                let report = state.roster.reconcile(&job.applicants);
                if !report.rolled_back.is_empty() {
                    tracing::warn!(
                        rolled_back = ?report.rolled_back,
                        "server does not list optimistic applicants"
                    );
                }

                let poster_id = job.posted_by.as_ref().map(|owner| owner.id.as_str());
                if let Some(ticket) = state.poster.activate(poster_id) {
                    actions.push(Action::FetchPoster(ticket));
                }
            }
            Ok((true, actions))
        }
        Event::PosterSettled { ticket, result } => {
            if let Err(message) = result {
                tracing::debug!(error = %message, "poster profile unavailable");
            }
            Ok((state.poster.settle(ticket, result.clone()), vec![]))
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mount { .. } => "mount",
        Event::Unmount => "unmount",
        Event::Refresh => "refresh",
        Event::SessionChanged { .. } => "session_changed",
        Event::Apply => "apply",
        Event::RequestDelete => "request_delete",
        Event::CancelDelete => "cancel_delete",
        Event::ConfirmDelete => "confirm_delete",
        Event::JobSettled { .. } => "job_settled",
        Event::PosterSettled { .. } => "poster_settled",
        Event::ApplySettled { .. } => "apply_settled",
        Event::DeleteSettled { .. } => "delete_settled",
    }
}
