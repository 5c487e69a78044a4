//! ledsync_roslibrust
//!
//! ROS-facing adapter layer for the LED sequence synchronizer.
//! Wires rosbridge subscriptions and GPIO outputs to the matcher,
//! while keeping matching semantics in `ledsync_core`.

pub mod error;

pub mod gpio;
pub mod node;
pub mod transport;

// Re-export core types that adapter users will commonly need
pub use ledsync_core::config::NodeParams;
pub use ledsync_core::error::{CoreError, Result};
pub use ledsync_core::pulse::{Channel, PulseController};
pub use ledsync_core::sequence::{LedId, ObserveReport, TargetUpdate};
