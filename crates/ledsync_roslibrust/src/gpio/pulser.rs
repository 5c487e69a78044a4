use std::sync::{Arc, Mutex};
use std::time::Duration;

use ledsync_core::error::{CoreError, Domain, ErrorKind, Result};
use ledsync_core::pulse::{Channel, PulseController};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::info;

use super::OutputLine;
use crate::error::{lock_or_recover, log_core_error};

/// Tokio-backed pulse controller over one output line per channel.
///
/// Each pulse drives the line HIGH and spawns a reset task that drives it
/// LOW after the requested duration. A newer pulse on the same channel
/// aborts the pending reset and bumps the channel generation; a reset task
/// whose generation is stale leaves the line alone, so the last request
/// always decides when the line drops.
pub struct TimedPulser<L: OutputLine> {
    slots: [Arc<Slot<L>>; 2],
    runtime: Handle,
}

struct Slot<L> {
    line: L,
    state: Mutex<SlotState>,
}

#[derive(Default)]
struct SlotState {
    generation: u64,
    reset: Option<JoinHandle<()>>,
}

impl<L: OutputLine> TimedPulser<L> {
    /// Build a pulser on the current tokio runtime.
    pub fn new(intermediate: L, final_line: L) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            CoreError::fatal()
                .domain(Domain::Pulse)
                .kind(ErrorKind::InvalidState)
                .msgf(format_args!("pulse timers need a tokio runtime: {e}"))
                .build()
        })?;
        Ok(Self::with_handle(intermediate, final_line, runtime))
    }

    pub fn with_handle(intermediate: L, final_line: L, runtime: Handle) -> Self {
        Self {
            slots: [Arc::new(Slot::new(intermediate)), Arc::new(Slot::new(final_line))],
            runtime,
        }
    }

    pub fn line(&self, channel: Channel) -> &L {
        &self.slots[channel.index()].line
    }

    /// True while a reset is scheduled for `channel`.
    pub fn is_pending(&self, channel: Channel) -> bool {
        let state = lock_or_recover(&self.slots[channel.index()].state, "pulse channel");
        state.reset.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel every pending reset and drive all lines LOW.
    ///
    /// Returns the first line error; the remaining lines are still driven.
    pub fn shutdown(&self) -> Result<()> {
        let mut first_err = None;

        for slot in &self.slots {
            let mut state = lock_or_recover(&slot.state, "pulse channel");
            state.generation = state.generation.wrapping_add(1);
            if let Some(pending) = state.reset.take() {
                pending.abort();
            }
            if let Err(err) = slot.line.set_level(false) {
                first_err.get_or_insert(err);
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<L: OutputLine> PulseController for TimedPulser<L> {
    fn pulse(&self, channel: Channel, duration: Duration) -> Result<()> {
        let slot = &self.slots[channel.index()];
        let mut state = lock_or_recover(&slot.state, "pulse channel");

        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        if let Some(pending) = state.reset.take() {
            pending.abort();
        }

        // Schedule the reset even if driving HIGH failed, so the line ends LOW.
        let result = slot.line.set_level(true);

        let task_slot = Arc::clone(slot);
        state.reset = Some(self.runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            task_slot.reset_if_current(generation, duration);
        }));

        result
    }
}

impl<L: OutputLine> Slot<L> {
    fn new(line: L) -> Self {
        Self {
            line,
            state: Mutex::new(SlotState::default()),
        }
    }

    fn reset_if_current(&self, generation: u64, duration: Duration) {
        let mut state = lock_or_recover(&self.state, "pulse channel");
        if state.generation != generation {
            return;
        }
        state.reset = None;

        match self.line.set_level(false) {
            Ok(()) => info!(
                "reset GPIO {} to LOW after {:.2} seconds",
                self.line.offset(),
                duration.as_secs_f64()
            ),
            Err(err) => log_core_error(err),
        }
    }
}
