//! Node parameters shared by every transport.
//!
//! Parameter names match the ROS parameters of the `gpio_norbi` node
//! (`gpio_delay`, `gpio_line_85`, `gpio_line_144`), so launch files passing
//! `--ros-args -p name:=value` keep working.

use std::time::Duration;

use crate::error::{CoreError, Result};
use crate::pulse::Channel;

pub const DEFAULT_GPIO_DELAY_SECS: f64 = 0.2;
pub const DEFAULT_INTERMEDIATE_LINE: u32 = 85;
pub const DEFAULT_FINAL_LINE: u32 = 144;

pub const PARAM_GPIO_DELAY: &str = "gpio_delay";
/// Named after the default line offset of each channel.
pub const PARAM_INTERMEDIATE_LINE: &str = "gpio_line_85";
pub const PARAM_FINAL_LINE: &str = "gpio_line_144";

/// Pulse timing and the line offset bound to each channel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NodeParams {
    /// Pulse length in seconds.
    pub gpio_delay: f64,
    pub intermediate_line: u32,
    pub final_line: u32,
}

impl Default for NodeParams {
    fn default() -> Self {
        Self {
            gpio_delay: DEFAULT_GPIO_DELAY_SECS,
            intermediate_line: DEFAULT_INTERMEDIATE_LINE,
            final_line: DEFAULT_FINAL_LINE,
        }
    }
}

impl NodeParams {
    /// Check values that would make the node misbehave at runtime.
    pub fn validate(&self) -> Result<()> {
        self.pulse_duration()?;

        if self.intermediate_line == self.final_line {
            return Err(CoreError::invalid_param(
                PARAM_FINAL_LINE,
                format!(
                    "intermediate and final channels share GPIO line {}",
                    self.final_line
                ),
            ));
        }

        Ok(())
    }

    /// `gpio_delay` as a `Duration`.
    pub fn pulse_duration(&self) -> Result<Duration> {
        if !self.gpio_delay.is_finite() || self.gpio_delay <= 0.0 {
            return Err(CoreError::invalid_param(
                PARAM_GPIO_DELAY,
                format!(
                    "gpio_delay must be a positive number of seconds, got {}",
                    self.gpio_delay
                ),
            ));
        }
        Duration::try_from_secs_f64(self.gpio_delay)
            .map_err(|e| CoreError::invalid_param(PARAM_GPIO_DELAY, e.to_string()))
    }

    /// Line offset bound to `channel`.
    pub const fn line_for(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Intermediate => self.intermediate_line,
            Channel::Final => self.final_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Domain, Payload};

    #[test]
    fn defaults_match_deployed_parameters() {
        let params = NodeParams::default();
        assert_eq!(params.pulse_duration().unwrap(), Duration::from_millis(200));
        assert_eq!(params.line_for(Channel::Intermediate), 85);
        assert_eq!(params.line_for(Channel::Final), 144);
        params.validate().unwrap();
    }

    #[test]
    fn non_positive_or_nan_delay_is_rejected() {
        for delay in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let params = NodeParams {
                gpio_delay: delay,
                ..NodeParams::default()
            };
            let err = params.validate().unwrap_err();
            assert_eq!(err.domain, Domain::Config);
            assert_eq!(
                err.payload,
                Payload::Context {
                    key: "param",
                    value: PARAM_GPIO_DELAY.into()
                }
            );
        }
    }

    #[test]
    fn shared_line_is_rejected() {
        let params = NodeParams {
            intermediate_line: 7,
            final_line: 7,
            ..NodeParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.message.contains("share GPIO line 7"));
    }
}
