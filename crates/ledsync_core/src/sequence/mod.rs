//! ledsync_core::sequence
//!
//! Pure (ROS-agnostic) matching of observed LED ids against an announced
//! target sequence. This module contains **no** transport or GPIO code.
//!
//! Key ideas:
//! - The target is replaced wholesale; an identical announcement is a no-op
//! - A cursor advances only on an exact match of the expected id
//! - Each match is classified intermediate or final; the adapter turns that into a pulse

mod event;
mod matcher;

pub use event::{MatchEvent, Mismatch, ObserveReport, TargetUpdate};
pub use matcher::{LedId, SequenceMatcher};
