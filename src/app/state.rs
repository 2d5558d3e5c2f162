//! Job detail state and view model computation.
//!
//! [`JobDetailState`] holds everything the job detail page knows: the posting
//! and poster hooks, the applicant roster, the viewer, and the transient
//! flags for the apply and delete flows. It is mutated only by
//! [`handle_event`](crate::app::handle_event).
//!
//! # Derived state
//!
//! - `already_applied`: the viewer's id is in the roster, optimistic entries
//!   included
//! - `is_owner`: the viewer posted the job
//! - `can_apply`: the viewer is a job seeker, not the owner, and has not
//!   applied yet
//!
//! View models are computed on demand with
//! [`compute_viewmodel`](JobDetailState::compute_viewmodel).

use crate::domain::roster::ApplicantRoster;
use crate::domain::job::JobPosting;
use crate::domain::session::SessionUser;
use crate::resource::{JobDetailHook, ResourceState, UserDetailHook};
use crate::ui::viewmodel::{
    ApplyButton, ConfirmDialog, JobDetailView, JobDetailViewModel, OwnerControls, PosterInfo,
};

pub const APPLY_LABEL: &str = "Apply Now";
pub const APPLYING_LABEL: &str = "Applying...";
pub const DELETE_DIALOG_TITLE: &str = "Confirm Deletion";
pub const DELETE_DIALOG_MESSAGE: &str =
    "Are you sure you want to delete this job post? This action cannot be undone.";

/// State of one job detail page.
#[derive(Debug, Clone, Default)]
pub struct JobDetailState {
    /// The posting, keyed by the route's job id.
    pub job: JobDetailHook,

    /// The poster's profile, keyed by `postedBy.id` once the posting loads.
    pub poster: UserDetailHook,

    /// Applicants as the viewer currently sees them.
    pub roster: ApplicantRoster,

    /// Signed-in user, if any.
    pub viewer: Option<SessionUser>,

    /// Set while an apply request is in flight.
    pub is_applying: bool,

    /// Set while the delete confirmation is open.
    pub delete_dialog_open: bool,

    /// Set while a confirmed delete is in flight.
    pub is_deleting: bool,

    /// Message of the last failed action.
    pub last_error: Option<String>,
}

impl JobDetailState {
    #[must_use]
    pub fn new(viewer: Option<SessionUser>) -> Self {
        Self {
            viewer,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn posting(&self) -> Option<&JobPosting> {
        self.job.data()
    }

    fn viewer_id(&self) -> Option<&str> {
        self.viewer.as_ref().map(|user| user.id.as_str())
    }

    #[must_use]
    pub fn already_applied(&self) -> bool {
        self.viewer_id().is_some_and(|id| self.roster.contains(id))
    }

    #[must_use]
    pub fn is_owner(&self) -> bool {
        match (self.viewer_id(), self.posting()) {
            (Some(id), Some(job)) => job.is_posted_by(id),
            _ => false,
        }
    }

    #[must_use]
    pub fn can_apply(&self) -> bool {
        self.posting().is_some()
            && self.viewer.as_ref().is_some_and(SessionUser::is_applicant)
            && !self.is_owner()
            && !self.already_applied()
    }

    /// Computes the page view model.
    ///
    /// The apply button stays visible (disabled, "Applying...") while a
    /// request is in flight, even though the optimistic roster entry has not
    /// been appended yet.
    #[must_use]
    pub fn compute_viewmodel(&self) -> JobDetailView {
        let job = match self.job.state() {
            ResourceState::Ready(job) => job,
            ResourceState::Failed(message) => {
                return JobDetailView::Failed {
                    message: message.clone(),
                }
            }
            ResourceState::Idle | ResourceState::Loading => return JobDetailView::Loading,
        };

        let owner_controls = self.is_owner().then(|| OwnerControls {
            edit_link: format!("/jobs/edit/{}", job.id),
            delete_label: "Delete".to_string(),
        });

        let apply_button = if self.is_applying {
            Some(ApplyButton {
                label: APPLYING_LABEL.to_string(),
                disabled: true,
            })
        } else {
            self.can_apply().then(|| ApplyButton {
                label: APPLY_LABEL.to_string(),
                disabled: false,
            })
        };

        let confirm_dialog = self.delete_dialog_open.then(|| ConfirmDialog {
            title: DELETE_DIALOG_TITLE.to_string(),
            message: DELETE_DIALOG_MESSAGE.to_string(),
            confirm_label: "Delete".to_string(),
            cancel_label: "Cancel".to_string(),
        });

        JobDetailView::Ready(Box::new(JobDetailViewModel {
            job_id: job.id.clone(),
            title_line: format!("{} ({})", job.title, job.position.label()),
            company: job.company_name.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            applicants_line: format!("{} Applicants", self.roster.len()),
            posted_on: format!("Posted on: {}", format_posted_date(job)),
            poster: self.poster_info(job),
            owner_controls,
            apply_button,
            confirm_dialog,
            notice: self.last_error.clone(),
        }))
    }

    fn poster_info(&self, job: &JobPosting) -> PosterInfo {
        let owner = job.posted_by.as_ref();
        PosterInfo {
            name: owner.map(|owner| owner.name.clone()).unwrap_or_default(),
            profile_link: owner.map(|owner| format!("/profile/{}", owner.id)),
            avatar: self.poster.data().and_then(|profile| profile.image.clone()),
        }
    }
}

/// `"March 5, 2024"` style date, or `"unknown"` when the server sent none.
fn format_posted_date(job: &JobPosting) -> String {
    job.created_at.map_or_else(
        || "unknown".to_string(),
        |created| created.format("%B %-d, %Y").to_string(),
    )
}
