// Shared helpers for integration tests - recording doubles for the host
// callback and capability seams.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use matchflow::{
    ControllerConfig, MatchController, Matchable, MockCarrierSource, Notifier, SearchCriteria,
    SessionHooks,
};

/// Records every host callback so tests can assert on ordering and counts.
#[derive(Default)]
pub struct RecordingHooks {
    pub search_starts: Mutex<Vec<String>>,
    pub completions: Mutex<Vec<usize>>,
    pub saved_calls: Mutex<Vec<(String, String, u64)>>,
    pub contacted: Mutex<Vec<String>>,
    pub saved_toggles: Mutex<Vec<(String, bool)>>,
}

impl RecordingHooks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn completion_count(&self) -> usize {
        self.completions.lock().unwrap().len()
    }
}

impl<E: Matchable> SessionHooks<E> for RecordingHooks {
    fn on_search_start(&self, criteria: &SearchCriteria) {
        self.search_starts.lock().unwrap().push(criteria.lane());
    }

    fn on_search_complete(&self, results: &[E]) {
        self.completions.lock().unwrap().push(results.len());
    }

    fn on_save_call(&self, entity_id: &str, notes: &str, duration_seconds: u64) {
        self.saved_calls.lock().unwrap().push((
            entity_id.to_string(),
            notes.to_string(),
            duration_seconds,
        ));
    }

    fn on_contacted_changed(&self, entity_id: &str) {
        self.contacted.lock().unwrap().push(entity_id.to_string());
    }

    fn on_saved_toggled(&self, entity_id: &str, saved: bool) {
        self.saved_toggles
            .lock()
            .unwrap()
            .push((entity_id.to_string(), saved));
    }
}

/// Records toast messages.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Short timings so tests tick through whole flows quickly.
pub fn test_config() -> ControllerConfig {
    ControllerConfig {
        search_duration: Duration::from_secs(2),
        settle_delay: Duration::from_millis(500),
        pickup_delay: Duration::from_secs(1),
        min_score: 0,
        max_results: 10,
        ..ControllerConfig::carrier()
    }
}

pub fn carrier_controller(hooks: Arc<RecordingHooks>) -> MatchController<MockCarrierSource> {
    MatchController::new(MockCarrierSource, test_config()).with_hooks(hooks)
}

pub fn chicago_criteria() -> SearchCriteria {
    let mut c = SearchCriteria::new("Chicago, IL", "New York, NY", "Dry Van");
    c.min_rate = Some(2_500);
    c.pickup_date = chrono::NaiveDate::from_ymd_opt(2025, 5, 22);
    c
}

/// Advance the controller in fixed steps until `total` simulated time has
/// passed.
pub fn tick_for<S: matchflow::ResultSource>(
    controller: &mut MatchController<S>,
    total: Duration,
    step: Duration,
) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        controller.tick(step);
        elapsed += step;
    }
}
