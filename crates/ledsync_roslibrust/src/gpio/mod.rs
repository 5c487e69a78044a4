//! ledsync_roslibrust::gpio
//!
//! Output side of the node: GPIO character-device lines and the tokio timer
//! logic that turns a pulse request into HIGH-now / LOW-later.

mod line;
pub use line::{GpioChip, GpioOutput, OutputLine, DEFAULT_CHIP_PATH, GPIO_CONSUMER};

mod pulser;
pub use pulser::TimedPulser;
