use gpio_cdev::{Chip, LineHandle, LineRequestFlags};
use ledsync_core::error::{CoreError, Domain, ErrorKind, Payload, Result};
use tracing::{debug, info};

use crate::error::log_core_error;

/// Consumer label shown by `gpioinfo` for lines held by this node.
pub const GPIO_CONSUMER: &str = "gpio_norbi";

pub const DEFAULT_CHIP_PATH: &str = "/dev/gpiochip0";

/// A single output line the pulser can drive.
pub trait OutputLine: Send + Sync + 'static {
    /// Line offset on its chip (for logs).
    fn offset(&self) -> u32;

    fn set_level(&self, high: bool) -> Result<()>;
}

/// An open GPIO character device.
pub struct GpioChip {
    chip: Chip,
    path: String,
}

impl GpioChip {
    pub fn open(path: &str) -> Result<Self> {
        let chip = Chip::new(path).map_err(|e| {
            CoreError::fatal()
                .domain(Domain::Gpio)
                .kind(ErrorKind::Unavailable)
                .msgf(format_args!("failed to open GPIO chip {path}: {e}"))
                .payload(Payload::Context {
                    key: "chip",
                    value: path.to_string().into(),
                })
                .build()
        })?;

        Ok(Self {
            chip,
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request `offset` as an output, initially LOW.
    pub fn request_output(&mut self, offset: u32) -> Result<GpioOutput> {
        let line = self.chip.get_line(offset).map_err(|e| {
            CoreError::fatal()
                .domain(Domain::Gpio)
                .kind(ErrorKind::Unavailable)
                .msgf(format_args!("failed to get GPIO line {offset}: {e}"))
                .payload(Payload::Line { offset })
                .build()
        })?;

        let handle = line
            .request(LineRequestFlags::OUTPUT, 0, GPIO_CONSUMER)
            .map_err(|e| {
                CoreError::fatal()
                    .domain(Domain::Gpio)
                    .kind(ErrorKind::Hardware)
                    .msgf(format_args!(
                        "failed to request GPIO line {offset} as output: {e}"
                    ))
                    .payload(Payload::Line { offset })
                    .build()
            })?;

        info!("GPIO line {offset} initialized as output");
        Ok(GpioOutput { offset, handle })
    }
}

/// Requested output line. Driven LOW and released on drop.
pub struct GpioOutput {
    offset: u32,
    handle: LineHandle,
}

impl OutputLine for GpioOutput {
    fn offset(&self) -> u32 {
        self.offset
    }

    fn set_level(&self, high: bool) -> Result<()> {
        self.handle
            .set_value(u8::from(high))
            .map_err(|e| CoreError::line_write(self.offset, high, e))?;
        debug!(
            "set GPIO line {} to {}",
            self.offset,
            if high { "HIGH" } else { "LOW" }
        );
        Ok(())
    }
}

impl Drop for GpioOutput {
    fn drop(&mut self) {
        if let Err(err) = self.set_level(false) {
            log_core_error(err);
        }
    }
}
