use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use roslibrust::rosbridge::ClientHandle;
use tracing::{error, info};

use ledsync_gpio_node::config::Config;
use ledsync_gpio_node::random_point_classifier::{ActiveLeds, SuccessDetectionsTwo};
use ledsync_roslibrust::gpio::{GpioChip, TimedPulser};
use ledsync_roslibrust::node::LedSyncNode;
use ledsync_roslibrust::transport::roslibrust::{
    run_detection_subscriber, run_sequence_subscriber,
};
use ledsync_roslibrust::Channel;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_args().context("load parameters")?;
    config.log();

    let mut chip = GpioChip::open(&config.gpio_chip).context("initialize GPIO")?;
    let intermediate = chip
        .request_output(config.params.line_for(Channel::Intermediate))
        .context("initialize intermediate GPIO line")?;
    let final_line = chip
        .request_output(config.params.line_for(Channel::Final))
        .context("initialize final GPIO line")?;

    let pulser = Arc::new(TimedPulser::new(intermediate, final_line)?);
    // Lines are requested LOW; make the starting state explicit anyway.
    pulser.shutdown().context("drive GPIO lines LOW")?;

    let node = Arc::new(LedSyncNode::new(
        config.node_name.clone(),
        config.params,
        pulser.clone(),
    )?);

    let ros = ClientHandle::new(&config.bridge_url)
        .await
        .with_context(|| format!("connect to rosbridge at {}", config.bridge_url))?;

    let mut sequence_task = tokio::spawn(run_sequence_subscriber::<ActiveLeds>(
        ros.clone(),
        config.active_leds_topic.clone(),
        Arc::clone(&node),
    ));
    let mut detection_task = tokio::spawn(run_detection_subscriber::<SuccessDetectionsTwo>(
        ros.clone(),
        config.success_topic.clone(),
        Arc::clone(&node),
    ));

    info!(
        "{} node initialized and subscribed to {} and {}",
        node.name(),
        config.active_leds_topic,
        config.success_topic
    );

    let outcome = tokio::select! {
        signal = tokio::signal::ctrl_c() => signal.context("wait for ctrl-c"),
        joined = &mut sequence_task => subscriber_exit(config.active_leds_topic.as_str(), joined),
        joined = &mut detection_task => subscriber_exit(config.success_topic.as_str(), joined),
    };

    sequence_task.abort();
    detection_task.abort();

    if let Err(err) = pulser.shutdown() {
        error!("failed to reset GPIO lines on shutdown: {err}");
    }
    info!("{} node shutting down", node.name());

    outcome
}

fn subscriber_exit(
    topic: &str,
    joined: std::result::Result<ledsync_roslibrust::Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    match joined {
        Ok(Ok(())) => Err(anyhow!("subscription to {topic} ended")),
        Ok(Err(err)) => Err(err).with_context(|| format!("subscription to {topic}")),
        Err(err) => Err(err).with_context(|| format!("subscriber task for {topic}")),
    }
}
