//! Presentation layer.
//!
//! ```text
//! Page state → compute_viewmodel → view model → render_* → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Plain-text renderers used by the CLI

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_job_detail, render_job_listing, render_profile};
pub use viewmodel::{
    ApplyButton, ConfirmDialog, EmptyState, JobDetailView, JobDetailViewModel,
    JobListingViewModel, ListingItem, OwnerControls, PosterInfo, ProfileView, ProfileViewModel,
};
