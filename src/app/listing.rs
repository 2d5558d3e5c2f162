//! Job listing state: fetched postings, search filter, selection.

use crate::domain::job::JobPosting;
use crate::resource::{FetchTicket, JobListingHook, ResourceState, LISTING_KEY};
use crate::ui::viewmodel::{EmptyState, JobListingViewModel, ListingItem};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// State of the job listing page.
#[derive(Debug, Clone, Default)]
pub struct JobListingState {
    pub jobs: JobListingHook,
    pub search_query: String,
    /// Postings passing the search filter, in server order.
    pub filtered: Vec<JobPosting>,
    pub selected_index: usize,
}

impl JobListingState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading the listing, unless it is already loaded or loading.
    pub fn mount(&mut self) -> Option<FetchTicket> {
        self.jobs.activate(Some(LISTING_KEY))
    }

    pub fn refresh(&mut self) -> Option<FetchTicket> {
        self.jobs.reload()
    }

    /// Applies a listing result. Returns `false` for stale tickets.
    pub fn settle(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<JobPosting>, String>,
    ) -> bool {
        if !self.jobs.settle(ticket, result) {
            return false;
        }
        self.apply_search_filter();
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.apply_search_filter();
    }

    pub fn move_selection_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_job(&self) -> Option<&JobPosting> {
        self.filtered.get(self.selected_index)
    }

    /// Filters postings by the search query.
    ///
    /// The query is split on whitespace; every token must fuzzy-match the
    /// posting's title or company name.
    pub fn apply_search_filter(&mut self) {
        let all = self.jobs.data().map_or(&[][..], Vec::as_slice);
        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_jobs = all.len(),
            query_len = self.search_query.len()
        )
        .entered();

        let tokens: Vec<String> = self
            .search_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        self.filtered = if tokens.is_empty() {
            all.to_vec()
        } else {
            let matcher = SkimMatcherV2::default();
            all.iter()
                .filter(|job| {
                    let haystack =
                        format!("{} {}", job.title, job.company_name).to_lowercase();
                    tokens
                        .iter()
                        .all(|token| matcher.fuzzy_match(&haystack, token).is_some())
                })
                .cloned()
                .collect()
        };

        if self.filtered.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered.len(), "search filter applied");
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> JobListingViewModel {
        let query = self.search_query.trim();
        let matcher = (!query.is_empty()).then(SkimMatcherV2::default);

        let items: Vec<ListingItem> = self
            .filtered
            .iter()
            .enumerate()
            .map(|(idx, job)| ListingItem {
                job_id: job.id.clone(),
                title: job.title.clone(),
                company: job.company_name.clone(),
                position_label: job.position.label(),
                applicants_line: format!("{} Applicants", job.applicants.len()),
                is_selected: idx == self.selected_index,
                highlight_ranges: matcher
                    .as_ref()
                    .map(|m| highlight_ranges(m, &job.title, query))
                    .unwrap_or_default(),
            })
            .collect();

        let error = match self.jobs.state() {
            ResourceState::Failed(message) => Some(message.clone()),
            _ => None,
        };
        let empty_state = (items.is_empty() && !self.jobs.is_loading() && error.is_none())
            .then(|| {
                if query.is_empty() {
                    EmptyState {
                        message: "No job postings yet".to_string(),
                        subtitle: "Create one to get started".to_string(),
                    }
                } else {
                    EmptyState {
                        message: "No matching jobs".to_string(),
                        subtitle: format!("Nothing matches \"{query}\""),
                    }
                }
            });

        JobListingViewModel {
            items,
            selected_index: self.selected_index,
            is_loading: self.jobs.is_loading(),
            error,
            search_query: (!query.is_empty()).then(|| query.to_string()),
            empty_state,
        }
    }
}

/// Coalesces the characters of `text` matched by any query token into
/// `(start, end)` ranges. Tokens that miss the text contribute nothing.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    let mut indices: Vec<usize> = query
        .split_whitespace()
        .filter_map(|token| matcher.fuzzy_indices(text, &token.to_lowercase()))
        .flat_map(|(_score, matched)| matched)
        .collect();
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::Position;

    fn job(id: &str, title: &str, company: &str, position: Position) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: title.to_string(),
            company_name: company.to_string(),
            position,
            description: String::new(),
            requirements: vec![],
            applicants: vec![],
            posted_by: None,
            created_at: None,
        }
    }

    fn loaded(jobs: Vec<JobPosting>) -> JobListingState {
        let mut state = JobListingState::new();
        let ticket = state.mount().unwrap();
        assert!(state.settle(&ticket, Ok(jobs)));
        state
    }

    #[test]
    fn shows_position_labels() {
        let state = loaded(vec![
            job("p1", "Engineer", "Acme", Position::Mid),
            job("p2", "Intern", "Globex", Position::Internship),
        ]);
        let vm = state.compute_viewmodel();
        assert_eq!(vm.items[0].position_label, "mid-level");
        assert_eq!(vm.items[1].position_label, "internship");
        assert_eq!(vm.items[0].applicants_line, "0 Applicants");
        assert!(vm.items[0].is_selected);
    }

    #[test]
    fn every_token_must_match_title_or_company() {
        let mut state = loaded(vec![
            job("p1", "Backend Engineer", "Acme", Position::Senior),
            job("p2", "Designer", "Acme", Position::Entry),
            job("p3", "Backend Engineer", "Globex", Position::Mid),
        ]);

        state.set_query("backend acme");
        let ids: Vec<&str> = state.filtered.iter().map(|job| job.id.as_str()).collect();
        assert_eq!(ids, vec!["p1"]);

        state.set_query("zzz");
        let vm = state.compute_viewmodel();
        assert!(vm.items.is_empty());
        assert_eq!(vm.empty_state.unwrap().message, "No matching jobs");
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut state = loaded(vec![
            job("p1", "A", "X", Position::Mid),
            job("p2", "B", "Y", Position::Mid),
        ]);
        state.move_selection_up();
        assert_eq!(state.selected_job().unwrap().id, "p2");
        state.move_selection_down();
        assert_eq!(state.selected_job().unwrap().id, "p1");

        state.selected_index = 1;
        state.set_query("A");
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn contiguous_matches_form_one_range() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges(&matcher, "engineer", "eng"), vec![(0, 3)]);
        assert!(highlight_ranges(&matcher, "engineer", "xyz").is_empty());
    }

    #[test]
    fn multi_token_query_highlights_each_matching_token() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(
            highlight_ranges(&matcher, "Backend Engineer", "back eng"),
            vec![(0, 4), (8, 11)]
        );
        // Company-only tokens filter but leave the title unmarked.
        assert_eq!(
            highlight_ranges(&matcher, "Backend Engineer", "eng acme"),
            vec![(8, 11)]
        );

        let mut state = loaded(vec![job("p1", "Backend Engineer", "Acme", Position::Mid)]);
        state.set_query("eng acme");
        let vm = state.compute_viewmodel();
        assert_eq!(vm.items.len(), 1);
        assert!(!vm.items[0].highlight_ranges.is_empty());
    }

    #[test]
    fn failed_listing_has_error_not_empty_state() {
        let mut state = JobListingState::new();
        let ticket = state.mount().unwrap();
        state.settle(&ticket, Err("Network error: refused".into()));
        let vm = state.compute_viewmodel();
        assert_eq!(vm.error.as_deref(), Some("Network error: refused"));
        assert!(vm.empty_state.is_none());
    }
}
