use std::time::Duration;

use statig::prelude::*;

/// Simulated phone-call lifecycle. The machine itself never talks to a
/// telephony system; that seam is the `CallInitiator` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    Idle,
    Dialing,
    Connected,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
    Dial,
    Tick { dt: Duration },
    ToggleMute,
    HangUp,
}

/// Notes and duration handed back to the host when a call modal closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallReport {
    pub entity_id: String,
    pub notes: String,
    pub duration_seconds: u64,
}

pub struct CallMachine {
    entity_id: String,
    phone: String,
    pickup_delay: Duration,
    dial_elapsed: Duration,
    second_acc: Duration,
    elapsed_seconds: u64,
    muted: bool,
    connected_once: bool,
    phase: CallPhase,
}

impl CallMachine {
    pub fn new(entity_id: String, phone: String, pickup_delay: Duration) -> Self {
        Self {
            entity_id,
            phone,
            pickup_delay,
            dial_elapsed: Duration::ZERO,
            second_acc: Duration::ZERO,
            elapsed_seconds: 0,
            muted: false,
            connected_once: false,
            phase: CallPhase::Idle,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn ever_connected(&self) -> bool {
        self.connected_once
    }
}

#[state_machine(initial = "State::idle()")]
impl CallMachine {
    #[state]
    fn idle(&mut self, event: &CallEvent) -> Outcome<State> {
        match event {
            CallEvent::Dial => {
                self.phase = CallPhase::Dialing;
                tracing::info!(
                    entity_id = %self.entity_id,
                    phone = %self.phone,
                    "dialing"
                );
                Transition(State::dialing())
            }
            _ => Handled,
        }
    }

    #[state]
    fn dialing(&mut self, event: &CallEvent) -> Outcome<State> {
        match event {
            CallEvent::Tick { dt } => {
                self.dial_elapsed += *dt;
                if self.dial_elapsed >= self.pickup_delay {
                    self.phase = CallPhase::Connected;
                    self.connected_once = true;
                    tracing::info!(entity_id = %self.entity_id, "call connected");
                    Transition(State::connected())
                } else {
                    Handled
                }
            }
            CallEvent::HangUp => {
                self.phase = CallPhase::Ended;
                tracing::info!(entity_id = %self.entity_id, "call abandoned before pickup");
                Transition(State::ended())
            }
            _ => Handled,
        }
    }

    #[state]
    fn connected(&mut self, event: &CallEvent) -> Outcome<State> {
        match event {
            CallEvent::Tick { dt } => {
                // The elapsed counter advances in whole seconds, matching
                // the on-screen call timer.
                self.second_acc += *dt;
                while self.second_acc >= Duration::from_secs(1) {
                    self.second_acc -= Duration::from_secs(1);
                    self.elapsed_seconds += 1;
                }
                Handled
            }
            CallEvent::ToggleMute => {
                self.muted = !self.muted;
                Handled
            }
            CallEvent::HangUp => {
                self.phase = CallPhase::Ended;
                tracing::info!(
                    entity_id = %self.entity_id,
                    duration_seconds = %self.elapsed_seconds,
                    "call ended"
                );
                Transition(State::ended())
            }
            _ => Handled,
        }
    }

    #[state]
    fn ended(&mut self, event: &CallEvent) -> Outcome<State> {
        // Terminal: a closed call ignores ticks and user actions.
        match event {
            _ => Handled,
        }
    }
}

/// One active contact attempt against a matched entity: the call machine
/// plus note capture and the flush-once guard around the host callback.
pub struct CallWorkflow {
    machine: StateMachine<CallMachine>,
    call_id: String,
    notes: String,
    flushed: bool,
}

impl CallWorkflow {
    /// Enter the Dialing state for an entity. `call_id` comes from the
    /// `CallInitiator` that placed the (simulated) call.
    pub fn open(entity_id: &str, phone: &str, pickup_delay: Duration, call_id: String) -> Self {
        let mut machine =
            CallMachine::new(entity_id.to_string(), phone.to_string(), pickup_delay).state_machine();
        machine.handle(&CallEvent::Dial);
        Self {
            machine,
            call_id,
            notes: String::new(),
            flushed: false,
        }
    }

    /// Advance the dial timer or the elapsed counter. Returns the new phase
    /// when this tick crossed Dialing into Connected.
    pub fn tick(&mut self, dt: Duration) -> Option<CallPhase> {
        let before = self.machine.phase();
        self.machine.handle(&CallEvent::Tick { dt });
        let after = self.machine.phase();
        (before == CallPhase::Dialing && after == CallPhase::Connected).then_some(after)
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.machine.handle(&CallEvent::ToggleMute);
        self.machine.is_muted()
    }

    pub fn hang_up(&mut self) {
        self.machine.handle(&CallEvent::HangUp);
    }

    pub fn append_note(&mut self, text: &str) {
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(text);
    }

    /// Stop all timers and hand back the flush report, at most once. Notes
    /// are reported when non-empty or when the caller asks explicitly.
    pub fn close(&mut self, flush: bool) -> Option<CallReport> {
        self.machine.handle(&CallEvent::HangUp);

        if self.flushed || (!flush && self.notes.trim().is_empty()) {
            return None;
        }
        self.flushed = true;
        Some(CallReport {
            entity_id: self.machine.entity_id().to_string(),
            notes: self.notes.clone(),
            duration_seconds: self.machine.elapsed_seconds(),
        })
    }

    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    pub fn entity_id(&self) -> &str {
        self.machine.entity_id()
    }

    pub fn phase(&self) -> CallPhase {
        self.machine.phase()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.machine.elapsed_seconds()
    }

    pub fn is_muted(&self) -> bool {
        self.machine.is_muted()
    }

    pub fn ever_connected(&self) -> bool {
        self.machine.ever_connected()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}
