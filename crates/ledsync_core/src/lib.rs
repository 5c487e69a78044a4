//! ledsync_core: ROS-agnostic core for the LED sequence synchronizer.
//!
//! Design goals:
//! - Pure, testable logic (no ROS or GPIO deps).
//! - Explicit types; no macro wizardry.
//! - Small, stable public API surface.

pub mod error;

/// Node parameters (pulse timing, line offsets) and their validation.
pub mod config;

/// Expected-sequence matcher.
pub mod sequence;

/// Pulse channels + the controller contract the adapter implements.
pub mod pulse;
