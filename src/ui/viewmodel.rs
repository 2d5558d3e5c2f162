//! View model types representing renderable UI state.
//!
//! View models are computed from view state (`JobDetailState`,
//! `JobListingState`, `ProfileState`) and consumed by the renderer. They
//! carry display-ready strings and flags only; every decision about what a
//! viewer may see or do has already been made.

/// Job detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobDetailView {
    /// Posting still loading (or not requested yet).
    Loading,
    /// Posting could not be loaded.
    Failed { message: String },
    Ready(Box<JobDetailViewModel>),
}

/// Loaded posting, as the viewer should see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailViewModel {
    pub job_id: String,
    /// `"{title} ({position label})"`.
    pub title_line: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    /// `"{n} Applicants"`.
    pub applicants_line: String,
    /// `"Posted on: {Month D, YYYY}"`.
    pub posted_on: String,
    pub poster: PosterInfo,
    /// Edit and delete controls; only present for the owner.
    pub owner_controls: Option<OwnerControls>,
    /// Apply button; only present when the viewer may apply.
    pub apply_button: Option<ApplyButton>,
    /// Delete confirmation, while open.
    pub confirm_dialog: Option<ConfirmDialog>,
    /// Last action failure to show inline.
    pub notice: Option<String>,
}

/// Who posted the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterInfo {
    pub name: String,
    /// Link to the poster's profile page.
    pub profile_link: Option<String>,
    /// Avatar image, once the poster's profile loaded successfully.
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerControls {
    pub edit_link: String,
    pub delete_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyButton {
    /// `"Apply Now"`, or `"Applying..."` while a request is in flight.
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

/// Job listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListingViewModel {
    pub items: Vec<ListingItem>,
    pub selected_index: usize,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Search query, when one is active.
    pub search_query: Option<String>,
    /// Shown instead of the items when there are none.
    pub empty_state: Option<EmptyState>,
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub position_label: String,
    pub applicants_line: String,
    pub is_selected: bool,
    /// Character ranges of `title` matched by the search query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    Loading,
    Failed { message: String },
    Ready(ProfileViewModel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileViewModel {
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub cv: Option<String>,
    /// Edit-profile and change-password links; only for the profile's owner.
    pub can_edit: bool,
}
