use std::time::Duration;

use anyhow::{bail, Result};
use tokio::time;

use crate::controller::MatchController;
use crate::matching::{ResultSource, SearchStatus};
use crate::modal::ModalVisibility;

/// Pumps wall-clock ticks into a controller until the active search has
/// published its results and the loader has handed off.
///
/// The core is entirely tick-driven; this is the only place real timers
/// exist, so tests that want simulated time skip the driver and call
/// `MatchController::tick` directly (or run the driver under a paused
/// tokio runtime).
pub struct SearchDriver {
    tick_interval: Duration,
}

impl SearchDriver {
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    /// Drive the controller in real time, reporting progress changes to
    /// `on_progress`. Returns the number of published results.
    pub async fn drive<S, F>(
        &self,
        controller: &mut MatchController<S>,
        mut on_progress: F,
    ) -> Result<usize>
    where
        S: ResultSource,
        F: FnMut(u8, &str),
    {
        if controller.search_status() != SearchStatus::Searching {
            bail!("no search in progress");
        }

        let mut interval = time::interval(self.tick_interval);
        // The first interval tick fires immediately; consume it so every
        // controller tick corresponds to one elapsed interval.
        interval.tick().await;

        let mut last_percent = 0;
        let mut last_message = String::new();
        loop {
            interval.tick().await;
            controller.tick(self.tick_interval);

            let percent = controller.progress_percent();
            let message = controller.progress_message();
            if percent != last_percent || message != last_message {
                on_progress(percent, message);
                last_percent = percent;
                last_message = message.to_string();
            }

            if controller.search_status() == SearchStatus::Completed
                && controller.visible_modal() != ModalVisibility::SearchLoader
            {
                break;
            }
        }

        Ok(controller.results().len())
    }
}
