use std::time::Duration;

/// Status lines shown while a carrier search is "running".
pub const CARRIER_SEARCH_MESSAGES: &[&str] = &[
    "Scanning carrier network...",
    "Checking lane history...",
    "Analyzing equipment availability...",
    "Scoring candidate carriers...",
    "Finalizing matches...",
];

/// Status lines shown while a load search is "running".
pub const LOAD_SEARCH_MESSAGES: &[&str] = &[
    "Scanning load boards...",
    "Matching lanes and equipment...",
    "Checking broker ratings...",
    "Scoring candidate loads...",
    "Finalizing matches...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Idle,
    Running,
    Completed,
}

/// What a single tick produced. `just_completed` is reported exactly once
/// per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub percent: u8,
    pub message_index: usize,
    pub just_completed: bool,
}

/// Drives a believable 0-100% timeline with no real work underneath.
///
/// The simulator is advanced by explicit `tick` calls carrying elapsed time,
/// so it owns no timer handle and teardown is a plain drop. Progress is
/// derived from accumulated time, which makes it monotone by construction.
#[derive(Debug)]
pub struct ProgressSimulator {
    total: Duration,
    messages: Vec<String>,
    elapsed: Duration,
    percent: u8,
    phase: ProgressPhase,
}

impl ProgressSimulator {
    pub fn new(total: Duration, messages: &[&str]) -> Self {
        Self {
            total,
            messages: messages.iter().map(|m| m.to_string()).collect(),
            elapsed: Duration::ZERO,
            percent: 0,
            phase: ProgressPhase::Idle,
        }
    }

    /// Zero progress and begin accepting ticks. Restarts cleanly from any
    /// phase, so a new search can never race a stale run.
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.percent = 0;
        self.phase = ProgressPhase::Running;
    }

    /// Cancel the run. Safe to call when not running.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.percent = 0;
        self.phase = ProgressPhase::Idle;
    }

    /// Advance simulated time. Returns `None` unless the simulator is
    /// running; after the completion tick it goes quiet again.
    pub fn tick(&mut self, dt: Duration) -> Option<ProgressUpdate> {
        if self.phase != ProgressPhase::Running {
            return None;
        }

        self.elapsed += dt;
        let pct = if self.total.is_zero() {
            100
        } else {
            ((self.elapsed.as_millis() * 100) / self.total.as_millis()).min(100) as u8
        };
        self.percent = self.percent.max(pct);

        let just_completed = self.percent == 100;
        if just_completed {
            self.phase = ProgressPhase::Completed;
        }

        Some(ProgressUpdate {
            percent: self.percent,
            message_index: self.message_index(),
            just_completed,
        })
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Index into the message list, advanced proportionally to progress and
    /// clamped to the last entry.
    pub fn message_index(&self) -> usize {
        if self.messages.is_empty() {
            return 0;
        }
        (self.percent as usize * self.messages.len()) / 101
    }

    pub fn message(&self) -> &str {
        self.messages
            .get(self.message_index())
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> ProgressSimulator {
        ProgressSimulator::new(Duration::from_secs(10), CARRIER_SEARCH_MESSAGES)
    }

    #[test]
    fn idle_simulator_ignores_ticks() {
        let mut s = sim();
        assert_eq!(s.tick(Duration::from_secs(1)), None);
        assert_eq!(s.percent(), 0);
    }

    #[test]
    fn progress_is_monotone_and_caps_at_100() {
        let mut s = sim();
        s.start();
        let mut last = 0;
        for _ in 0..40 {
            if let Some(update) = s.tick(Duration::from_millis(500)) {
                assert!(update.percent >= last);
                assert!(update.percent <= 100);
                last = update.percent;
            }
        }
        assert_eq!(s.percent(), 100);
    }

    #[test]
    fn completion_reported_exactly_once() {
        let mut s = sim();
        s.start();
        let mut completions = 0;
        for _ in 0..30 {
            if let Some(update) = s.tick(Duration::from_secs(1)) {
                if update.just_completed {
                    completions += 1;
                }
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(s.phase(), ProgressPhase::Completed);
    }

    #[test]
    fn reset_while_running_stops_further_updates() {
        let mut s = sim();
        s.start();
        s.tick(Duration::from_secs(2));
        s.reset();
        assert_eq!(s.tick(Duration::from_secs(5)), None);
        assert_eq!(s.percent(), 0);
        assert_eq!(s.phase(), ProgressPhase::Idle);
    }

    #[test]
    fn reset_when_idle_is_a_noop() {
        let mut s = sim();
        s.reset();
        assert_eq!(s.phase(), ProgressPhase::Idle);
    }

    #[test]
    fn messages_advance_with_progress_and_clamp() {
        let mut s = sim();
        s.start();
        assert_eq!(s.message(), "Scanning carrier network...");
        s.tick(Duration::from_secs(5));
        assert_eq!(s.message(), "Analyzing equipment availability...");
        s.tick(Duration::from_secs(60));
        assert_eq!(s.message(), "Finalizing matches...");
    }
}
