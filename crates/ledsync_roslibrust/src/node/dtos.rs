//! Minimal inbound message DTOs.
//!
//! These mirror `random_point_classifier/msg/ActiveLeds` and
//! `random_point_classifier/msg/SuccessDetectionsTwo` without depending on
//! generated message code.

use ledsync_core::sequence::LedId;

/// `/active_leds`: the sequence to follow next.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SequenceAnnouncement {
    /// Opaque label from the announcer; logged only.
    pub mode: String,
    pub leds: Vec<LedId>,
}

/// `/success`: LEDs detected by the right and left cameras.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Detections {
    pub right: Vec<LedId>,
    pub left: Vec<LedId>,
}

impl Detections {
    /// One ordered batch: right detections first, then left.
    pub fn into_batch(self) -> Vec<LedId> {
        let mut batch = self.right;
        batch.extend(self.left);
        batch
    }
}
