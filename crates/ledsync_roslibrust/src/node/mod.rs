//! ledsync_roslibrust::node
//!
//! Transport-agnostic node façade: owns the lock-guarded matcher and the
//! injected pulse controller. The transport layer maps real ROS messages
//! into the DTOs below and calls the handlers.

pub mod dtos;

mod sync_node;
pub use sync_node::{LedSyncNode, Progress};
