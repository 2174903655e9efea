//! RP2040-specific HAL for the LED wall receiver
//!
//! This crate provides RP2040 implementations of the shared `ledwall-hal`
//! traits:
//!
//! - GPIO wrappers
//! - Single-read parallel data port on GPIO 0-7
//! - Blocking SPI shifter for the panel data lines

#![no_std]

pub mod gpio;
pub mod parallel;
pub mod spi;

pub use gpio::{RpInput, RpOutput};
pub use parallel::SioDataPort;
pub use spi::{embassy_config, BlockingShifter};
