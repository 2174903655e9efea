//! Companion computer end of the LED wall
//!
//! Bit-bangs frames to the wall's microcontroller over the parallel
//! handshake bus, using the Raspberry Pi GPIO block mapped through
//! `/dev/gpiomem`.
//!
//! ```no_run
//! use ledwall_protocol::PanelGrid;
//! use ledwall_sender::Transmitter;
//!
//! # fn main() -> Result<(), ledwall_sender::TransmitError> {
//! let grid = PanelGrid::new(2, 1)?;
//! let mut transmitter = Transmitter::open(grid)?;
//!
//! let mut frame = vec![0u8; grid.frame_len()];
//! frame[0] = 128; // half brightness
//! transmitter.send(&frame)?;
//! # Ok(())
//! # }
//! ```
//!
//! Register access goes through [`GpioRegisters`], so the transmitter runs
//! unchanged against an in-memory window in tests.

pub mod error;
pub mod gpiomem;
pub mod pacing;
pub mod pins;
pub mod registers;
pub mod source;
pub mod transmitter;

pub use error::{SourceError, TransmitError};
pub use gpiomem::GpioMem;
pub use pacing::Pacing;
pub use pins::{BusPins, ByteMasks};
pub use registers::GpioRegisters;
pub use source::FrameSource;
pub use transmitter::Transmitter;
