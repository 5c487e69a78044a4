use std::sync::{Arc, Mutex};
use std::time::Duration;

use ledsync_core::config::NodeParams;
use ledsync_core::error::{CoreError, Domain, ErrorKind, Result};
use ledsync_core::pulse::{Channel, PulseController};
use ledsync_core::sequence::{LedId, ObserveReport, SequenceMatcher, TargetUpdate};
use tracing::{debug, info, warn};

use super::dtos::{Detections, SequenceAnnouncement};
use crate::error::{lock_or_recover, log_core_error};

/// Matcher progress snapshot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Progress {
    pub cursor: usize,
    pub len: usize,
}

/// Adapter-side LED synchronizer node.
///
/// Responsibilities:
/// - Hold the matcher behind one lock so announcements and detection
///   batches never interleave
/// - Turn match events into pulses on the injected controller
/// - Log like the ROS node it replaces (INFO on progress, WARN on noise)
pub struct LedSyncNode {
    name: String,
    params: NodeParams,
    pulse_duration: Duration,
    matcher: Mutex<SequenceMatcher>,
    pulser: Arc<dyn PulseController>,
}

impl LedSyncNode {
    /// Create a node with an empty target sequence.
    pub fn new(
        name: impl Into<String>,
        params: NodeParams,
        pulser: Arc<dyn PulseController>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::error()
                .domain(Domain::Config)
                .kind(ErrorKind::InvalidArgument)
                .msg("node name must not be empty")
                .build());
        }

        params.validate()?;
        let pulse_duration = params.pulse_duration()?;

        Ok(Self {
            name,
            params,
            pulse_duration,
            matcher: Mutex::new(SequenceMatcher::new()),
            pulser,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pulse_duration(&self) -> Duration {
        self.pulse_duration
    }

    pub fn progress(&self) -> Progress {
        let matcher = lock_or_recover(&self.matcher, "sequence matcher");
        Progress {
            cursor: matcher.cursor(),
            len: matcher.len(),
        }
    }

    /// Handle a `/active_leds` announcement.
    pub fn handle_sequence(&self, msg: SequenceAnnouncement) -> TargetUpdate {
        let mut matcher = lock_or_recover(&self.matcher, "sequence matcher");

        let update = matcher.set_target_sequence(&msg.leds);
        match update {
            TargetUpdate::Unchanged => {
                debug!("received /active_leds message but LEDs have not changed, no update");
            }
            TargetUpdate::Replaced { len } => {
                info!(
                    "received /active_leds message with mode: {} and {len} LEDs",
                    msg.mode
                );
                info!("active LEDs updated: {:?}", matcher.target());
                info!("reset sequence cursor due to active LEDs update");
            }
        }
        update
    }

    /// Handle a `/success` detection message.
    ///
    /// Never fails: mismatches are logged and dropped, pulse failures are logged.
    pub fn handle_detections(&self, msg: Detections) -> ObserveReport {
        let batch = msg.into_batch();
        info!("received /success message with {} LEDs", batch.len());

        if batch.is_empty() {
            warn!("received empty LED list in /success");
            return ObserveReport::default();
        }

        let mut matcher = lock_or_recover(&self.matcher, "sequence matcher");
        let report = matcher.observe(&batch);

        for mismatch in &report.mismatches {
            warn!(
                "detected LED {} does not match expected LED {}, ignoring",
                mismatch.value, mismatch.expected
            );
        }

        // Pulse while still holding the lock so pulse order follows match order.
        for event in &report.matches {
            info!("correctly detected expected LED: {}", event.value);
            self.dispatch(event.channel(), event.value);
        }

        if report.exhausted() {
            info!("all active LEDs have been processed");
            debug!("{} trailing detections left unprocessed", report.skipped);
        }

        report
    }

    fn dispatch(&self, channel: Channel, led: LedId) {
        let line = self.params.line_for(channel);
        match channel {
            Channel::Intermediate => info!(
                "detected intermediate LED: {led}, setting GPIO {line} HIGH"
            ),
            Channel::Final => info!(
                "detected last LED in active LEDs, setting GPIO {line} HIGH for {:.2} seconds",
                self.pulse_duration.as_secs_f64()
            ),
        }

        if let Err(err) = self.pulser.pulse(channel, self.pulse_duration) {
            log_core_error(err);
        }
    }
}
