use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::config::MatchflowConfig;
use crate::contact::{CallInitiator, CallPhase, CallWorkflow, SimulatedCallInitiator};
use crate::hooks::{
    Notifier, NullHooks, NullNotifier, NullSoundPlayer, SessionHooks, SoundCue, SoundPlayer,
};
use crate::matching::{
    MatchSession, Matchable, ResultSource, SearchCriteria, SearchStatus, SessionTick,
    SubmitOutcome, ValidationError, CARRIER_SEARCH_MESSAGES, LOAD_SEARCH_MESSAGES,
};
use crate::modal::{ModalOrchestrator, ModalVisibility};

/// Timing and sizing knobs for one page-level controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub search_duration: Duration,
    pub settle_delay: Duration,
    pub pickup_delay: Duration,
    pub min_score: u8,
    pub max_results: usize,
    pub messages: &'static [&'static str],
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::carrier()
    }
}

impl ControllerConfig {
    pub fn carrier() -> Self {
        Self {
            search_duration: Duration::from_secs(10),
            settle_delay: Duration::from_secs(1),
            pickup_delay: Duration::from_millis(1_500),
            min_score: 60,
            max_results: 5,
            messages: CARRIER_SEARCH_MESSAGES,
        }
    }

    pub fn load() -> Self {
        Self {
            messages: LOAD_SEARCH_MESSAGES,
            ..Self::carrier()
        }
    }

    /// Apply the timing knobs from the loaded application config.
    pub fn with_settings(mut self, cfg: &MatchflowConfig) -> Self {
        self.search_duration = Duration::from_millis(cfg.search.duration_ms);
        self.settle_delay = Duration::from_millis(cfg.search.settle_delay_ms);
        self.pickup_delay = Duration::from_millis(cfg.call.pickup_delay_ms);
        self.min_score = cfg.search.min_score;
        self.max_results = cfg.search.max_results;
        self
    }
}

#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    InvalidCriteria(#[from] ValidationError),
    #[error("no match with id {0}")]
    UnknownEntity(String),
    #[error("match list is not open")]
    MatchListNotOpen,
    #[error("a call is already active")]
    CallAlreadyActive,
    #[error("no active call")]
    NoActiveCall,
    #[error("call initiation failed: {0}")]
    InitiationFailed(#[source] anyhow::Error),
}

/// Page-level composition of the search session, result store, call
/// workflow, and modal orchestrator for one role (carrier or load search).
///
/// The controller is the single tick source: every time-driven piece is
/// advanced from `tick`, so dropping the controller cancels everything at
/// once and no callback can fire against torn-down state.
pub struct MatchController<S: ResultSource> {
    session: MatchSession<S>,
    modal: ModalOrchestrator,
    call: Option<CallWorkflow>,
    hooks: Arc<dyn SessionHooks<S::Entity>>,
    notifier: Arc<dyn Notifier>,
    sounds: Arc<dyn SoundPlayer>,
    initiator: Box<dyn CallInitiator>,
    pickup_delay: Duration,
}

impl<S: ResultSource> MatchController<S> {
    pub fn new(source: S, cfg: ControllerConfig) -> Self {
        Self {
            session: MatchSession::new(
                source,
                cfg.search_duration,
                cfg.messages,
                cfg.min_score,
                cfg.max_results,
            ),
            modal: ModalOrchestrator::new(cfg.settle_delay),
            call: None,
            hooks: Arc::new(NullHooks),
            notifier: Arc::new(NullNotifier),
            sounds: Arc::new(NullSoundPlayer),
            initiator: Box::new(SimulatedCallInitiator),
            pickup_delay: cfg.pickup_delay,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn SessionHooks<S::Entity>>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_sound_player(mut self, sounds: Arc<dyn SoundPlayer>) -> Self {
        self.sounds = sounds;
        self
    }

    pub fn with_initiator(mut self, initiator: Box<dyn CallInitiator>) -> Self {
        self.initiator = initiator;
        self
    }

    /// Validate and start a search. A search already in progress makes this
    /// a no-op rather than a competing session.
    pub fn submit_search(&mut self, criteria: SearchCriteria) -> Result<SubmitOutcome, ControlError> {
        let outcome = self.session.submit(criteria)?;
        if outcome == SubmitOutcome::Started {
            if let Some(criteria) = self.session.criteria() {
                self.hooks.on_search_start(criteria);
            }
            self.modal.search_started();
        }
        Ok(outcome)
    }

    /// Advance every time-driven piece by `dt`. This is the only suspension
    /// point in the whole subsystem.
    pub fn tick(&mut self, dt: Duration) {
        // Modal first: the settle countdown starts on the tick after the
        // completion tick, never on the completion tick itself.
        self.modal.tick(dt);

        if let Some(SessionTick::Completed { count }) = self.session.tick(dt) {
            self.hooks.on_search_complete(self.session.store().results());
            let lane = self
                .session
                .criteria()
                .map(SearchCriteria::lane)
                .unwrap_or_default();
            if count > 0 {
                self.notifier
                    .notify(&format!("Found {count} matches for {lane}"));
            } else {
                self.notifier.notify(&format!("No matches found for {lane}"));
            }
            self.modal.search_completed(count > 0);
        }

        if let Some(call) = self.call.as_mut() {
            if call.tick(dt) == Some(CallPhase::Connected) {
                self.sounds.play(SoundCue::Connected);
            }
        }
    }

    /// Start the call sub-flow for a match-list row: places the (simulated)
    /// call and swaps the match list for the call detail modal.
    pub fn open_call(&mut self, entity_id: &str) -> Result<(), ControlError> {
        if self.call.is_some() {
            return Err(ControlError::CallAlreadyActive);
        }
        if self.modal.visible() != ModalVisibility::MatchList {
            return Err(ControlError::MatchListNotOpen);
        }
        let entity = self
            .session
            .store()
            .get(entity_id)
            .ok_or_else(|| ControlError::UnknownEntity(entity_id.to_string()))?;
        let phone = entity.contact().phone.clone();

        let handle = self
            .initiator
            .call(&phone)
            .map_err(ControlError::InitiationFailed)?;
        self.sounds.play(SoundCue::Ring);
        self.call = Some(CallWorkflow::open(
            entity_id,
            &phone,
            self.pickup_delay,
            handle.call_id,
        ));
        self.modal.call_selected();
        Ok(())
    }

    pub fn append_note(&mut self, text: &str) -> Result<(), ControlError> {
        let call = self.call.as_mut().ok_or(ControlError::NoActiveCall)?;
        call.append_note(text);
        Ok(())
    }

    pub fn toggle_mute(&mut self) -> Result<bool, ControlError> {
        let call = self.call.as_mut().ok_or(ControlError::NoActiveCall)?;
        Ok(call.toggle_mute())
    }

    pub fn hang_up(&mut self) -> Result<(), ControlError> {
        let call = self.call.as_mut().ok_or(ControlError::NoActiveCall)?;
        call.hang_up();
        Ok(())
    }

    /// Close the call modal. Flushes captured notes to the host exactly
    /// once, marks the entity contacted if the call ever connected, and
    /// returns the view to the match list.
    pub fn close_call(&mut self, flush: bool) -> Result<(), ControlError> {
        let mut call = self.call.take().ok_or(ControlError::NoActiveCall)?;
        let connected = call.ever_connected();
        let entity_id = call.entity_id().to_string();

        if let Some(report) = call.close(flush) {
            self.hooks
                .on_save_call(&report.entity_id, &report.notes, report.duration_seconds);
        }
        if connected && self.session.store_mut().mark_contacted(&entity_id) {
            self.hooks.on_contacted_changed(&entity_id);
        }

        self.sounds.play(SoundCue::HangUp);
        self.modal.call_closed();
        info!(entity_id = %entity_id, "call modal closed");
        Ok(())
    }

    pub fn mark_contacted(&mut self, entity_id: &str) -> Result<(), ControlError> {
        if self.session.store().get(entity_id).is_none() {
            return Err(ControlError::UnknownEntity(entity_id.to_string()));
        }
        if self.session.store_mut().mark_contacted(entity_id) {
            self.hooks.on_contacted_changed(entity_id);
        }
        Ok(())
    }

    pub fn toggle_saved(&mut self, entity_id: &str) -> Result<bool, ControlError> {
        if self.session.store().get(entity_id).is_none() {
            return Err(ControlError::UnknownEntity(entity_id.to_string()));
        }
        let saved = self.session.store_mut().toggle_saved(entity_id);
        self.hooks.on_saved_toggled(entity_id, saved);
        Ok(saved)
    }

    pub fn close_match_list(&mut self) {
        self.modal.match_list_closed();
    }

    /// Reset everything: active search, results, flags, call, and modals.
    pub fn clear_matches(&mut self) {
        self.session.clear();
        self.call = None;
        self.modal.reset();
    }

    pub fn visible_modal(&self) -> ModalVisibility {
        self.modal.visible()
    }

    pub fn search_status(&self) -> SearchStatus {
        self.session.status()
    }

    pub fn progress_percent(&self) -> u8 {
        self.session.progress_percent()
    }

    pub fn progress_message(&self) -> &str {
        self.session.progress_message()
    }

    pub fn results(&self) -> &[S::Entity] {
        self.session.store().results()
    }

    pub fn is_contacted(&self, entity_id: &str) -> bool {
        self.session.store().is_contacted(entity_id)
    }

    pub fn is_saved(&self, entity_id: &str) -> bool {
        self.session.store().is_saved(entity_id)
    }

    pub fn active_call(&self) -> Option<&CallWorkflow> {
        self.call.as_ref()
    }
}
