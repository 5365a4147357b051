// Matching Module - Search Sessions Over A Result Source
//
// Covers the search half of the screen: criteria validation, the simulated
// progress timeline, the write-once result store with contacted/saved
// bookkeeping, and the mock sources a real backend would replace.

pub mod criteria;
pub mod entity;
pub mod progress;
pub mod results;
pub mod session;
pub mod source;

pub use criteria::{SearchCriteria, ValidationError};
pub use entity::{CarrierMatch, ContactInfo, LoadMatch, Matchable};
pub use progress::{
    ProgressPhase, ProgressSimulator, ProgressUpdate, CARRIER_SEARCH_MESSAGES,
    LOAD_SEARCH_MESSAGES,
};
pub use results::ResultStore;
pub use session::{MatchSession, SearchStatus, SessionTick, SubmitOutcome};
pub use source::{MockCarrierSource, MockLoadSource, ResultSource};
