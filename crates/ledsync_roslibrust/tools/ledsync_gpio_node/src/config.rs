use std::env;
use std::str::FromStr;

use ledsync_core::config::{NodeParams, PARAM_FINAL_LINE, PARAM_GPIO_DELAY, PARAM_INTERMEDIATE_LINE};
use ledsync_core::error::{CoreError, Result as CoreResult};
use ledsync_roslibrust::gpio::DEFAULT_CHIP_PATH;
use tracing::{info, warn};

pub const DEFAULT_NODE_NAME: &str = "gpio_norbi";
pub const DEFAULT_BRIDGE_URL: &str = "ws://localhost:9090";
pub const DEFAULT_ACTIVE_LEDS_TOPIC: &str = "/active_leds";
pub const DEFAULT_SUCCESS_TOPIC: &str = "/success";

pub const ENV_NODE_NAME: &str = "LEDSYNC_NODE_NAME";
pub const ENV_BRIDGE_URL: &str = "LEDSYNC_BRIDGE_URL";
pub const ENV_GPIO_CHIP: &str = "LEDSYNC_GPIO_CHIP";
pub const ENV_GPIO_DELAY: &str = "LEDSYNC_GPIO_DELAY";
pub const ENV_GPIO_LINE_INTERMEDIATE: &str = "LEDSYNC_GPIO_LINE_INTERMEDIATE";
pub const ENV_GPIO_LINE_FINAL: &str = "LEDSYNC_GPIO_LINE_FINAL";
pub const ENV_ACTIVE_LEDS_TOPIC: &str = "LEDSYNC_ACTIVE_LEDS_TOPIC";
pub const ENV_SUCCESS_TOPIC: &str = "LEDSYNC_SUCCESS_TOPIC";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub node_name: String,
    pub bridge_url: String,
    pub gpio_chip: String,
    pub active_leds_topic: String,
    pub success_topic: String,
    pub params: NodeParams,
}

impl Config {
    pub fn from_args() -> CoreResult<Self> {
        Self::from_args_iter(env::args())
    }

    /// Parse `--flag value` / `--flag=value` arguments on top of environment
    /// overrides and defaults. The first item is the program name.
    pub fn from_args_iter<I, S>(iter: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut node_name = env_or(ENV_NODE_NAME, DEFAULT_NODE_NAME);
        let mut bridge_url = env_or(ENV_BRIDGE_URL, DEFAULT_BRIDGE_URL);
        let mut gpio_chip = env_or(ENV_GPIO_CHIP, DEFAULT_CHIP_PATH);
        let mut active_leds_topic = env_or(ENV_ACTIVE_LEDS_TOPIC, DEFAULT_ACTIVE_LEDS_TOPIC);
        let mut success_topic = env_or(ENV_SUCCESS_TOPIC, DEFAULT_SUCCESS_TOPIC);

        let mut params = NodeParams::default();
        if let Ok(value) = env::var(ENV_GPIO_DELAY) {
            params.gpio_delay = parse_param(PARAM_GPIO_DELAY, &value)?;
        }
        if let Ok(value) = env::var(ENV_GPIO_LINE_INTERMEDIATE) {
            params.intermediate_line = parse_param(PARAM_INTERMEDIATE_LINE, &value)?;
        }
        if let Ok(value) = env::var(ENV_GPIO_LINE_FINAL) {
            params.final_line = parse_param(PARAM_FINAL_LINE, &value)?;
        }

        let mut args = iter.into_iter();
        let _ = args.next();
        let mut in_ros_args = false;
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();

            if arg == ROS_ARGS {
                in_ros_args = true;
                continue;
            }
            if in_ros_args {
                match arg {
                    ROS_ARGS_END => in_ros_args = false,
                    "-p" | "--param" | "-r" | "--remap" => {
                        let Some(value) = args.next() else {
                            return Err(CoreError::invalid_param(
                                "ros_args",
                                format!("{arg} requires a name:=value argument"),
                            ));
                        };
                        let value = value.as_ref();
                        if matches!(arg, "-p" | "--param") {
                            apply_ros_param(&mut params, value)?;
                        } else if let Some(name) = value.strip_prefix("__node:=") {
                            node_name = name.to_string();
                        } else {
                            warn!("ignoring ROS remapping {value}");
                        }
                    }
                    _ => warn!("ignoring ROS argument {arg}"),
                }
                continue;
            }

            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
                _ => (arg, None),
            };

            if matches!(flag, "-h" | "--help") {
                print_usage();
                std::process::exit(0);
            }

            if !is_known_flag(flag) {
                continue;
            }

            let Some(value) = inline.or_else(|| args.next().map(|v| v.as_ref().to_string()))
            else {
                return Err(CoreError::invalid_param(
                    flag_param(flag),
                    format!("{flag} requires a value"),
                ));
            };

            match flag {
                "--node-name" => node_name = value,
                "--bridge-url" => bridge_url = value,
                "--gpio-chip" => gpio_chip = value,
                "--active-leds-topic" => active_leds_topic = value,
                "--success-topic" => success_topic = value,
                "--gpio-delay" => params.gpio_delay = parse_param(PARAM_GPIO_DELAY, &value)?,
                "--gpio-line-intermediate" => {
                    params.intermediate_line = parse_param(PARAM_INTERMEDIATE_LINE, &value)?
                }
                "--gpio-line-final" => {
                    params.final_line = parse_param(PARAM_FINAL_LINE, &value)?
                }
                _ => {}
            }
        }

        params.validate()?;

        Ok(Self {
            node_name,
            bridge_url,
            gpio_chip,
            active_leds_topic,
            success_topic,
            params,
        })
    }

    /// Log the effective parameters at startup.
    pub fn log(&self) {
        info!("parameters:");
        info!("  node_name: {}", self.node_name);
        info!("  bridge_url: {}", self.bridge_url);
        info!("  gpio_chip: {}", self.gpio_chip);
        info!("  gpio_delay: {:.2} seconds", self.params.gpio_delay);
        info!(
            "  {PARAM_INTERMEDIATE_LINE} (intermediate): {}",
            self.params.intermediate_line
        );
        info!("  {PARAM_FINAL_LINE} (final): {}", self.params.final_line);
        info!("  active_leds_topic: {}", self.active_leds_topic);
        info!("  success_topic: {}", self.success_topic);
    }
}

const ROS_ARGS: &str = "--ros-args";
const ROS_ARGS_END: &str = "--";

const KNOWN_FLAGS: [&str; 8] = [
    "--node-name",
    "--bridge-url",
    "--gpio-chip",
    "--gpio-delay",
    "--gpio-line-intermediate",
    "--gpio-line-final",
    "--active-leds-topic",
    "--success-topic",
];

fn is_known_flag(flag: &str) -> bool {
    KNOWN_FLAGS.contains(&flag)
}

fn flag_param(flag: &str) -> &'static str {
    match flag {
        "--gpio-delay" => PARAM_GPIO_DELAY,
        "--gpio-line-intermediate" => PARAM_INTERMEDIATE_LINE,
        "--gpio-line-final" => PARAM_FINAL_LINE,
        "--node-name" => "node_name",
        "--bridge-url" => "bridge_url",
        "--gpio-chip" => "gpio_chip",
        "--active-leds-topic" => "active_leds_topic",
        "--success-topic" => "success_topic",
        _ => "unknown",
    }
}

/// Apply one `name:=value` ROS parameter override.
///
/// Parameters this node does not declare are logged and skipped.
fn apply_ros_param(params: &mut NodeParams, assignment: &str) -> CoreResult<()> {
    let Some((name, value)) = assignment.split_once(":=") else {
        return Err(CoreError::invalid_param(
            "ros_args",
            format!("expected name:=value, got {assignment:?}"),
        ));
    };

    match name {
        PARAM_GPIO_DELAY => params.gpio_delay = parse_param(PARAM_GPIO_DELAY, value)?,
        PARAM_INTERMEDIATE_LINE => {
            params.intermediate_line = parse_param(PARAM_INTERMEDIATE_LINE, value)?
        }
        PARAM_FINAL_LINE => params.final_line = parse_param(PARAM_FINAL_LINE, value)?,
        _ => warn!("ignoring unknown ROS parameter {name}"),
    }
    Ok(())
}

fn print_usage() {
    println!(
        "ledsync_gpio_node [--node-name <name>] [--bridge-url ws://host:port] \
         [--gpio-chip /dev/gpiochipN] [--gpio-delay <seconds>] \
         [--gpio-line-intermediate <offset>] [--gpio-line-final <offset>] \
         [--active-leds-topic <topic>] [--success-topic <topic>] \
         [--ros-args -p gpio_delay:=<s> -p gpio_line_85:=<n> -p gpio_line_144:=<n> --]"
    );
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_param<T>(name: &'static str, value: &str) -> CoreResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| CoreError::invalid_param(name, format!("invalid {name} {value:?}: {e}")))
}
