// Host callback and capability seams - the session core never renders,
// toasts, or plays audio directly.

use crate::matching::criteria::SearchCriteria;
use crate::matching::entity::Matchable;

/// Callbacks the host page wires into a controller. All methods default to
/// no-ops so hosts implement only what they care about.
pub trait SessionHooks<E: Matchable> {
    fn on_search_start(&self, _criteria: &SearchCriteria) {}

    fn on_search_complete(&self, _results: &[E]) {}

    /// Notes captured during a call, flushed exactly once when the call
    /// modal closes.
    fn on_save_call(&self, _entity_id: &str, _notes: &str, _duration_seconds: u64) {}

    fn on_contacted_changed(&self, _entity_id: &str) {}

    fn on_saved_toggled(&self, _entity_id: &str, _saved: bool) {}
}

/// Hooks implementation that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHooks;

impl<E: Matchable> SessionHooks<E> for NullHooks {}

/// Toast-style notification surface.
pub trait Notifier {
    fn notify(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Ring,
    Connected,
    HangUp,
}

/// Audio cue surface for the call workflow.
pub trait SoundPlayer {
    fn play(&self, cue: SoundCue);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play(&self, _cue: SoundCue) {}
}
