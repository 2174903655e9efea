//! Board-agnostic core of the LED wall receiver
//!
//! This crate contains everything on the microcontroller side that does not
//! depend on a specific board:
//!
//! - Frame ring shared between the foreground loop and the scan interrupt
//! - Handshake receiver state machine
//! - Scan engine driving the panel chain
//! - Device traits the board drivers implement

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod receiver;
pub mod ring;
pub mod scan;
pub mod traits;

pub use receiver::{HandshakeReceiver, ReceiverEvent, ReceiverState};
pub use ring::{FrameRing, RingConsumer, RingIndex, RingProducer};
pub use scan::{RowGroup, ScanEngine};
