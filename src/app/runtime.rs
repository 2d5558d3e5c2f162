//! Drives the job detail page against a live client.
//!
//! The runtime feeds events to [`handle_event`], executes the returned
//! actions one at a time, and turns each outcome back into an event. Events
//! are processed strictly in order, so handler invariants (one apply in
//! flight, stale fetches dropped) hold without further locking.

use crate::api::Transport;
use crate::app::handler::{handle_event, Event};
use crate::app::state::JobDetailState;
use crate::app::Action;
use crate::client::{JobBoardClient, NavigationTarget};
use crate::domain::error::Result;
use crate::ui::viewmodel::JobDetailView;
use std::collections::VecDeque;

/// Job detail page bound to a client.
#[derive(Debug)]
pub struct JobDetailRuntime<T> {
    client: JobBoardClient<T>,
    state: JobDetailState,
    navigation: Option<NavigationTarget>,
}

impl<T: Transport> JobDetailRuntime<T> {
    #[must_use]
    pub fn new(client: JobBoardClient<T>) -> Self {
        let viewer = client.session().current_user();
        Self {
            client,
            state: JobDetailState::new(viewer),
            navigation: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &JobDetailState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> JobDetailView {
        self.state.compute_viewmodel()
    }

    /// Navigation requested by the last action, if any.
    pub fn take_navigation(&mut self) -> Option<NavigationTarget> {
        self.navigation.take()
    }

    /// Processes `event` and everything it triggers. Returns whether the
    /// page should be re-rendered.
    ///
    /// The viewer is refreshed from the session before the event is handled.
    ///
    /// # Errors
    ///
    /// Propagates handler errors.
    pub async fn dispatch(&mut self, event: Event) -> Result<bool> {
        let mut queue = VecDeque::from([
            Event::SessionChanged {
                viewer: self.client.session().current_user(),
            },
            event,
        ]);
        let mut rerender = false;

        while let Some(event) = queue.pop_front() {
            let (should_render, actions) = handle_event(&mut self.state, &event)?;
            tracing::debug!(
                action_count = actions.len(),
                should_render = should_render,
                "event handled"
            );
            rerender |= should_render;

            for action in actions {
                if let Some(next) = self.execute_action(action).await {
                    queue.push_back(next);
                }
            }
        }
        Ok(rerender)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn execute_action(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::FetchJob(ticket) => {
                let result = self.client.fetch_job(&ticket.id).await.map_err(|e| e.message());
                Some(Event::JobSettled { ticket, result })
            }
            Action::FetchPoster(ticket) => {
                let result = self.client.fetch_user(&ticket.id).await.map_err(|e| e.message());
                Some(Event::PosterSettled { ticket, result })
            }
            Action::ApplyToJob { job_id, roster } => {
                let result = self
                    .client
                    .apply_to_job(&job_id, &roster)
                    .await
                    .map(|receipt| receipt.applicant)
                    .map_err(|e| e.message());
                Some(Event::ApplySettled { job_id, result })
            }
            Action::DeleteJob { job_id } => {
                let result = self
                    .client
                    .delete_job_posting(&job_id)
                    .await
                    .map_err(|e| e.message());
                Some(Event::DeleteSettled { job_id, result })
            }
            Action::Navigate(target) => {
                tracing::debug!(target = %target, "navigating");
                self.navigation = Some(target);
                None
            }
        }
    }
}
