//! Parallel Handshake Frame Protocol
//!
//! This crate defines everything both ends of the parallel bus must agree on:
//! the panel grid geometry and frame length, the physical byte order of a
//! frame, and the toggle-parity handshake rules.
//!
//! # Frame Layout
//!
//! ```text
//! ┌──────┬──────────────────────────────────────────────┬───────┐
//! │ DUTY │ PAYLOAD (64 bytes per panel, scan order)     │ DUMMY │
//! │ 1B   │ 4 row-groups × panels × 4 columns × 4 rows   │ 1B    │
//! └──────┴──────────────────────────────────────────────┴───────┘
//! ```
//!
//! The dummy byte only exists on the wire. It returns the request line to
//! its idle level so the next frame starts on a rising request.
//!
//! # Handshake
//!
//! There is no shared clock. The transmitter toggles *request* once per byte
//! and the receiver mirrors it on *acknowledge* once the byte is sampled. The
//! level for byte `n` is fixed by its parity, so either side can stall for
//! any length of time without losing sync.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod grid;
pub mod handshake;
pub mod mapping;

pub use frame::{Frame, FrameError};
pub use grid::{frame_len, GridError, PanelGrid, MAX_PANELS, PANEL_BYTES};
pub use handshake::{
    ack_level, byte_pending, request_level, stalled, ticks_since, RING_SLOTS, STALL_TICKS,
};
pub use mapping::{frame_offset, TransmitOrder};
