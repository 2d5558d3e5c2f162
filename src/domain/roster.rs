//! Applicant roster of a posting, as one viewer currently sees it.
//!
//! Entries appended after a successful apply are marked optimistic until the
//! next authoritative fetch of the posting either confirms them (the server
//! lists the applicant) or rolls them back.

use crate::domain::job::Applicant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Confirmed,
    Optimistic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub applicant: Applicant,
    pub state: EntryState,
}

/// Outcome of reconciling against a fetched posting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub confirmed: Vec<String>,
    pub rolled_back: Vec<String>,
}

impl ReconcileReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty() && self.rolled_back.is_empty()
    }
}

/// Applicants of one posting, at most one entry per user id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantRoster {
    entries: Vec<RosterEntry>,
}

impl ApplicantRoster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster of confirmed entries, dropping duplicate ids.
    #[must_use]
    pub fn from_server(applicants: &[Applicant]) -> Self {
        let mut roster = Self::new();
        for applicant in applicants {
            if !roster.contains(&applicant.id) {
                roster.entries.push(RosterEntry {
                    applicant: applicant.clone(),
                    state: EntryState::Confirmed,
                });
            }
        }
        roster
    }

    #[must_use]
    pub fn contains(&self, user_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.applicant.id == user_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.state == EntryState::Optimistic)
            .count()
    }

    /// Appends `applicant` as optimistic. Returns `false` if the id is
    /// already present.
    pub fn append_optimistic(&mut self, applicant: Applicant) -> bool {
        if self.contains(&applicant.id) {
            return false;
        }
        self.entries.push(RosterEntry {
            applicant,
            state: EntryState::Optimistic,
        });
        true
    }

    /// Removes an optimistic entry for `user_id`; confirmed entries stay.
    pub fn roll_back(&mut self, user_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            !(entry.applicant.id == user_id && entry.state == EntryState::Optimistic)
        });
        before != self.entries.len()
    }

    /// Replaces the roster with `authoritative`, reporting which optimistic
    /// entries the server confirmed and which it did not know about.
    pub fn reconcile(&mut self, authoritative: &[Applicant]) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for entry in &self.entries {
            if entry.state != EntryState::Optimistic {
                continue;
            }
            let id = entry.applicant.id.clone();
            if authoritative.iter().any(|applicant| applicant.id == id) {
                report.confirmed.push(id);
            } else {
                report.rolled_back.push(id);
            }
        }

        *self = Self::from_server(authoritative);
        if !report.is_empty() {
            tracing::debug!(
                confirmed = report.confirmed.len(),
                rolled_back = report.rolled_back.len(),
                "roster reconciled"
            );
        }
        report
    }
}
