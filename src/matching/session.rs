use std::time::Duration;

use tracing::{info, warn};

use crate::matching::criteria::{SearchCriteria, ValidationError};
use crate::matching::entity::Matchable;
use crate::matching::progress::ProgressSimulator;
use crate::matching::results::ResultStore;
use crate::matching::source::ResultSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Searching,
    Completed,
}

/// Outcome of a submit call. A submit while a search is already running is
/// an explicit no-op rather than a second competing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started,
    AlreadySearching,
}

/// What one tick of the session produced, for the composing controller to
/// fan out to hooks and the modal layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTick {
    Progress { percent: u8, message: String },
    Completed { count: usize },
}

/// One in-flight or completed search against a result source.
///
/// Only one search may be active per session; results are published into the
/// store exactly once, when the simulated progress timeline reaches 100%.
/// The session is advanced by explicit ticks and holds no timer handles.
#[derive(Debug)]
pub struct MatchSession<S: ResultSource> {
    source: S,
    status: SearchStatus,
    criteria: Option<SearchCriteria>,
    progress: ProgressSimulator,
    store: ResultStore<S::Entity>,
    min_score: u8,
    max_results: usize,
}

impl<S: ResultSource> MatchSession<S> {
    pub fn new(
        source: S,
        search_duration: Duration,
        messages: &[&str],
        min_score: u8,
        max_results: usize,
    ) -> Self {
        Self {
            source,
            status: SearchStatus::Idle,
            criteria: None,
            progress: ProgressSimulator::new(search_duration, messages),
            store: ResultStore::new(),
            min_score,
            max_results,
        }
    }

    /// Validate the criteria and start a search session. Clears any previous
    /// result set before the new timeline begins.
    pub fn submit(&mut self, criteria: SearchCriteria) -> Result<SubmitOutcome, ValidationError> {
        if self.status == SearchStatus::Searching {
            warn!(lane = %criteria.lane(), "submit ignored, search already in progress");
            return Ok(SubmitOutcome::AlreadySearching);
        }

        criteria.validate()?;

        self.store.clear();
        self.progress.start();
        self.status = SearchStatus::Searching;
        info!(
            lane = %criteria.lane(),
            equipment = %criteria.equipment_type,
            "search session started"
        );
        self.criteria = Some(criteria);

        Ok(SubmitOutcome::Started)
    }

    /// Advance the simulated timeline. Publishes results into the store on
    /// the completion tick and reports it exactly once.
    pub fn tick(&mut self, dt: Duration) -> Option<SessionTick> {
        if self.status != SearchStatus::Searching {
            return None;
        }

        let update = self.progress.tick(dt)?;
        if !update.just_completed {
            return Some(SessionTick::Progress {
                percent: update.percent,
                message: self.progress.message().to_string(),
            });
        }

        let criteria = self.criteria.as_ref()?;
        let mut matches = self.source.find_matches(criteria);
        matches.retain(|m| m.match_score() >= self.min_score);
        matches.sort_by(|a, b| b.match_score().cmp(&a.match_score()));
        matches.truncate(self.max_results);

        let count = matches.len();
        self.store.set_results(matches);
        self.status = SearchStatus::Completed;
        info!(count, lane = %criteria.lane(), "search session completed");

        Some(SessionTick::Completed { count })
    }

    /// Cancel any active timeline and drop all results and flags. Safe to
    /// call in any state.
    pub fn clear(&mut self) {
        self.progress.reset();
        self.store.clear();
        self.criteria = None;
        self.status = SearchStatus::Idle;
        info!("search session cleared");
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress.percent()
    }

    pub fn progress_message(&self) -> &str {
        self.progress.message()
    }

    pub fn criteria(&self) -> Option<&SearchCriteria> {
        self.criteria.as_ref()
    }

    pub fn store(&self) -> &ResultStore<S::Entity> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ResultStore<S::Entity> {
        &mut self.store
    }
}
