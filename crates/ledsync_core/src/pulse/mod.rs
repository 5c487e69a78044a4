//! ledsync_core::pulse
//!
//! Contract between the matcher and whatever drives the output lines.
//! Implementations live in the adapter crate (tokio timers + GPIO); tests use
//! recording doubles.

use std::time::Duration;

use crate::error::Result;

/// Logical output channel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Channel {
    /// Pulsed on every match that does not complete the sequence.
    Intermediate,
    /// Pulsed once per completed sequence.
    Final,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Intermediate, Channel::Final];

    /// Compact index for per-channel tables.
    pub const fn index(self) -> usize {
        match self {
            Channel::Intermediate => 0,
            Channel::Final => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Channel::Intermediate => "intermediate",
            Channel::Final => "final",
        }
    }
}

/// Drives a channel active for `duration`, then back to inactive.
///
/// Required semantics:
/// - `pulse` returns without waiting for the deactivation
/// - a new pulse on a channel whose previous pulse is still pending cancels
///   that deactivation and rearms it (last request wins, no queueing)
/// - channels are independent of each other
pub trait PulseController: Send + Sync {
    fn pulse(&self, channel: Channel, duration: Duration) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_indices_are_distinct() {
        assert_eq!(Channel::Intermediate.index(), 0);
        assert_eq!(Channel::Final.index(), 1);
        assert_eq!(Channel::ALL.len(), 2);
    }
}
