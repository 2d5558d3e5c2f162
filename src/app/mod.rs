//! View layer: page state, events, and actions.
//!
//! Each page keeps its state in a plain struct and derives a view model from
//! it on demand. The job detail page, which has user-triggered side effects,
//! follows a unidirectional flow:
//!
//! ```text
//! User Input → Event → handle_event → State Mutation → Actions → Client
//!                 ↑                                              ↓
//!                 └────────────── *Settled events ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Job detail events and state transitions
//! - [`listing`]: Job listing state with fuzzy search
//! - [`profile`]: Profile page state
//! - [`runtime`]: Executes job detail actions against a client
//! - [`state`]: Job detail state and view model computation
//!
//! # Example
//!
//! ```
//! use jobboard::app::{handle_event, Action, Event, JobDetailState};
//!
//! let mut state = JobDetailState::new(None);
//! let (rerender, actions) = handle_event(&mut state, &Event::Mount { job_id: "p1".into() })?;
//! assert!(rerender);
//! assert!(matches!(actions[0], Action::FetchJob(_)));
//! # Ok::<(), jobboard::JobBoardError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod listing;
pub mod profile;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use listing::JobListingState;
pub use profile::ProfileState;
pub use crate::domain::roster::{ApplicantRoster, ReconcileReport};
pub use runtime::JobDetailRuntime;
pub use state::JobDetailState;
