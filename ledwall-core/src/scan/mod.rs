//! Panel scan-out
//!
//! A fixed-period interrupt calls [`ScanEngine::tick`]. Each 256-tick sweep
//! shifts one row-group of the displayed frame, latches it, selects its rows
//! and opens a lit window sized by the frame's duty byte. Four sweeps make
//! one refresh.

pub mod engine;
pub mod row_group;
pub mod window;

pub use engine::ScanEngine;
pub use row_group::RowGroup;
pub use window::{blank_tick, lit_ticks};

/// Target refresh rate of the whole wall
pub const REFRESH_HZ: u32 = 100;

/// Scan ticks in one row-group sweep (the 8-bit counter's full turn)
pub const SWEEP_TICKS: u32 = 256;

/// Scan tick period giving [`REFRESH_HZ`] over four sweeps (~9.77 µs)
pub const TICK_PERIOD_NS: u32 = 1_000_000_000 / (REFRESH_HZ * SWEEP_TICKS * 4);
