use ledsync_roslibrust::node::dtos::{Detections, SequenceAnnouncement};
use ledsync_roslibrust::transport::roslibrust::{IntoDetections, IntoSequenceAnnouncement};

use crate::random_point_classifier::{ActiveLeds, SuccessDetectionsTwo};

impl IntoSequenceAnnouncement for ActiveLeds {
    fn into_announcement(self) -> SequenceAnnouncement {
        SequenceAnnouncement {
            mode: self.mode,
            leds: self.leds,
        }
    }
}

impl IntoDetections for SuccessDetectionsTwo {
    fn into_detections(self) -> Detections {
        Detections {
            right: self.led_numbers_right,
            left: self.led_numbers_left,
        }
    }
}
