use std::time::Duration;

use statig::prelude::*;

/// Which modal the page is showing. At most one is visible at a time; the
/// match-list to call-detail handoff is a synchronous swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalVisibility {
    None,
    SearchLoader,
    MatchList,
    CallDetail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    SearchStarted,
    SearchCompleted { has_results: bool },
    Tick { dt: Duration },
    CallSelected,
    CallClosed,
    MatchListClosed,
    Reset,
}

pub struct ModalMachine {
    visible: ModalVisibility,
    settle_delay: Duration,
    settle_elapsed: Duration,
}

impl ModalMachine {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            visible: ModalVisibility::None,
            settle_delay,
            settle_elapsed: Duration::ZERO,
        }
    }

    pub fn visible(&self) -> ModalVisibility {
        self.visible
    }
}

#[state_machine(initial = "State::hidden()")]
impl ModalMachine {
    #[state]
    fn hidden(&mut self, event: &ModalEvent) -> Outcome<State> {
        match event {
            ModalEvent::SearchStarted => {
                self.visible = ModalVisibility::SearchLoader;
                tracing::debug!("showing search loader");
                Transition(State::loader())
            }
            _ => Handled,
        }
    }

    #[state]
    fn loader(&mut self, event: &ModalEvent) -> Outcome<State> {
        match event {
            ModalEvent::SearchCompleted { has_results: false } => {
                self.visible = ModalVisibility::None;
                tracing::debug!("search produced no results, hiding loader");
                Transition(State::hidden())
            }
            ModalEvent::SearchCompleted { has_results: true } => {
                if self.settle_delay.is_zero() {
                    self.visible = ModalVisibility::MatchList;
                    Transition(State::match_list())
                } else {
                    // The loader lingers briefly so the completion toast is
                    // noticed before the list swap.
                    self.settle_elapsed = Duration::ZERO;
                    Transition(State::settling())
                }
            }
            ModalEvent::Reset => {
                self.visible = ModalVisibility::None;
                Transition(State::hidden())
            }
            _ => Handled,
        }
    }

    #[state]
    fn settling(&mut self, event: &ModalEvent) -> Outcome<State> {
        match event {
            ModalEvent::Tick { dt } => {
                self.settle_elapsed += *dt;
                if self.settle_elapsed >= self.settle_delay {
                    self.visible = ModalVisibility::MatchList;
                    tracing::debug!("loader handed off to match list");
                    Transition(State::match_list())
                } else {
                    Handled
                }
            }
            ModalEvent::Reset => {
                self.visible = ModalVisibility::None;
                Transition(State::hidden())
            }
            _ => Handled,
        }
    }

    #[state]
    fn match_list(&mut self, event: &ModalEvent) -> Outcome<State> {
        match event {
            ModalEvent::CallSelected => {
                self.visible = ModalVisibility::CallDetail;
                tracing::debug!("match list swapped for call detail");
                Transition(State::call_detail())
            }
            ModalEvent::MatchListClosed => {
                self.visible = ModalVisibility::None;
                Transition(State::hidden())
            }
            ModalEvent::SearchStarted => {
                self.visible = ModalVisibility::SearchLoader;
                Transition(State::loader())
            }
            ModalEvent::Reset => {
                self.visible = ModalVisibility::None;
                Transition(State::hidden())
            }
            _ => Handled,
        }
    }

    #[state]
    fn call_detail(&mut self, event: &ModalEvent) -> Outcome<State> {
        match event {
            ModalEvent::CallClosed => {
                self.visible = ModalVisibility::MatchList;
                Transition(State::match_list())
            }
            ModalEvent::Reset => {
                self.visible = ModalVisibility::None;
                Transition(State::hidden())
            }
            _ => Handled,
        }
    }
}

/// Single source of truth for modal visibility and handoff sequencing.
pub struct ModalOrchestrator {
    machine: StateMachine<ModalMachine>,
}

impl ModalOrchestrator {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            machine: ModalMachine::new(settle_delay).state_machine(),
        }
    }

    pub fn search_started(&mut self) {
        self.machine.handle(&ModalEvent::SearchStarted);
    }

    pub fn search_completed(&mut self, has_results: bool) {
        self.machine.handle(&ModalEvent::SearchCompleted { has_results });
    }

    /// Advance the loader settle countdown; returns the new visibility when
    /// this tick performed the loader to match-list handoff.
    pub fn tick(&mut self, dt: Duration) -> Option<ModalVisibility> {
        let before = self.machine.visible();
        self.machine.handle(&ModalEvent::Tick { dt });
        let after = self.machine.visible();
        (before != after).then_some(after)
    }

    pub fn call_selected(&mut self) {
        self.machine.handle(&ModalEvent::CallSelected);
    }

    pub fn call_closed(&mut self) {
        self.machine.handle(&ModalEvent::CallClosed);
    }

    pub fn match_list_closed(&mut self) {
        self.machine.handle(&ModalEvent::MatchListClosed);
    }

    pub fn reset(&mut self) {
        self.machine.handle(&ModalEvent::Reset);
    }

    pub fn visible(&self) -> ModalVisibility {
        self.machine.visible()
    }
}
