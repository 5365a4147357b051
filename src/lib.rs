// Matchflow Library - TMS Smart-Matching Session Engine
// This exposes the core components for testing and integration

pub mod config;
pub mod contact;
pub mod controller;
pub mod driver;
pub mod hooks;
pub mod matching;
pub mod modal;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{config, init_config, MatchflowConfig};
pub use contact::{
    CallHandle, CallInitiator, CallPhase, CallReport, CallWorkflow, SimulatedCallInitiator,
};
pub use controller::{ControlError, ControllerConfig, MatchController};
pub use driver::SearchDriver;
pub use hooks::{
    Notifier, NullHooks, NullNotifier, NullSoundPlayer, SessionHooks, SoundCue, SoundPlayer,
};
pub use matching::{
    CarrierMatch, ContactInfo, LoadMatch, MatchSession, Matchable, MockCarrierSource,
    MockLoadSource, ProgressPhase, ProgressSimulator, ResultSource, ResultStore, SearchCriteria,
    SearchStatus, SessionTick, SubmitOutcome, ValidationError, CARRIER_SEARCH_MESSAGES,
    LOAD_SEARCH_MESSAGES,
};
pub use modal::{ModalOrchestrator, ModalVisibility};
pub use telemetry::{create_search_span, generate_correlation_id, init_telemetry};
