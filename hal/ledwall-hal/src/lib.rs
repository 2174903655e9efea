//! ledwall Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits shared by the panel
//! drivers and the chip-specific HALs. Both ends of the frame pipeline only
//! ever need a handful of primitives: single pins, an 8-line parallel input
//! port, a write-only serial shifter, and a calibrated busy wait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledwall-drivers / ledwall-firmware     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledwall-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ ledwall-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::ParallelInput`] - 8 data lines sampled in one read
//! - [`spi::SpiWrite`] - Write-only SPI used as a panel shifter
//! - [`delay::SpinDelay`] - Calibrated busy wait

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use delay::SpinDelay;
pub use gpio::{InputPin, OutputPin, ParallelInput};
pub use spi::SpiWrite;
