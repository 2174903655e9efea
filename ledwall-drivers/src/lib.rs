//! Board driver implementations
//!
//! This crate provides concrete implementations of the device traits
//! defined in ledwall-core on top of the ledwall-hal primitives:
//!
//! - Panel chain output (SPI shifter plus row-select, latch and enable pins)
//! - Handshake bus input (parallel data port plus request/acknowledge pins)

#![no_std]
#![deny(unsafe_code)]

pub mod link;
pub mod panel;

pub use link::GpioLink;
pub use panel::{DataPolarity, GpioPanel, PanelPins};
