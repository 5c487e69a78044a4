//! ledsync_gpio_node
//!
//! Executable glue: parameters, generated `random_point_classifier`
//! messages and their mapping onto the adapter DTOs.

include!(concat!(env!("OUT_DIR"), "/messages.rs"));

pub mod config;
mod convert;
