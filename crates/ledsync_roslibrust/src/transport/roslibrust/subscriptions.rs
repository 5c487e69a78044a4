use crate::node::dtos::{Detections, SequenceAnnouncement};

#[cfg(feature = "roslibrust")]
use std::sync::Arc;

#[cfg(feature = "roslibrust")]
use crate::node::LedSyncNode;
#[cfg(feature = "roslibrust")]
use ledsync_core::error::{CoreError, Domain, ErrorKind, Payload, Result};
#[cfg(feature = "roslibrust")]
use tracing::info;

/// Downstream provides the concrete `/active_leds` message type.
/// This keeps ledsync_* crates independent of generated message code.
pub trait IntoSequenceAnnouncement: Sized + Send + Sync + 'static {
    fn into_announcement(self) -> SequenceAnnouncement;
}

/// Downstream provides the concrete `/success` message type.
pub trait IntoDetections: Sized + Send + Sync + 'static {
    fn into_detections(self) -> Detections;
}

/// Subscribe to sequence announcements and feed them to `node` forever.
#[cfg(feature = "roslibrust")]
pub async fn run_sequence_subscriber<M>(
    client: ::roslibrust::rosbridge::ClientHandle,
    topic: String,
    node: Arc<LedSyncNode>,
) -> Result<()>
where
    M: ::roslibrust::RosMessageType + IntoSequenceAnnouncement,
{
    let sub = client
        .subscribe::<M>(&topic)
        .await
        .map_err(|e| subscribe_error(&topic, e))?;
    info!("subscribed to {topic}");

    loop {
        let msg = sub.next().await;
        node.handle_sequence(msg.into_announcement());
    }
}

/// Subscribe to detection batches and feed them to `node` forever.
#[cfg(feature = "roslibrust")]
pub async fn run_detection_subscriber<M>(
    client: ::roslibrust::rosbridge::ClientHandle,
    topic: String,
    node: Arc<LedSyncNode>,
) -> Result<()>
where
    M: ::roslibrust::RosMessageType + IntoDetections,
{
    let sub = client
        .subscribe::<M>(&topic)
        .await
        .map_err(|e| subscribe_error(&topic, e))?;
    info!("subscribed to {topic}");

    loop {
        let msg = sub.next().await;
        node.handle_detections(msg.into_detections());
    }
}

#[cfg(feature = "roslibrust")]
fn subscribe_error(topic: &str, err: ::roslibrust::Error) -> CoreError {
    CoreError::fatal()
        .domain(Domain::Transport)
        .kind(ErrorKind::Transport)
        .msgf(format_args!("failed to subscribe to {topic}: {err}"))
        .payload(Payload::Context {
            key: "topic",
            value: topic.to_string().into(),
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SuccessTwo {
        led_numbers_right: Vec<i32>,
        led_numbers_left: Vec<i32>,
    }

    impl IntoDetections for SuccessTwo {
        fn into_detections(self) -> Detections {
            Detections {
                right: self.led_numbers_right,
                left: self.led_numbers_left,
            }
        }
    }

    #[test]
    fn converted_message_keeps_camera_order() {
        let msg = SuccessTwo {
            led_numbers_right: vec![9],
            led_numbers_left: vec![8, 7],
        };
        assert_eq!(msg.into_detections().into_batch(), vec![9, 8, 7]);
    }
}
