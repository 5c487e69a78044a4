//! roslibrust subscription adapters
//!
//! This module wires rosbridge subscriptions to the node handlers.
//! It contains **no ROS message types**; downstream crates supply them
//! through the conversion traits.

mod subscriptions;
pub use subscriptions::{IntoDetections, IntoSequenceAnnouncement};
#[cfg(feature = "roslibrust")]
pub use subscriptions::{run_detection_subscriber, run_sequence_subscriber};
