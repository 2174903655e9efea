//! Board wiring and wall geometry
//!
//! Everything here is fixed at build time. The frame length sizes the ring
//! slots statically, so changing the wall means rebuilding the firmware.
//!
//! Pin assignment lives in `main.rs`, where the peripherals are taken:
//!
//! | GPIO  | Function                                   |
//! |-------|--------------------------------------------|
//! | 0-7   | handshake data, bit `n` on GPIO `n`        |
//! | 8     | request from the transmitter (pulled down) |
//! | 9     | acknowledge to the transmitter             |
//! | 10/11 | row-select A/B                             |
//! | 12    | latch                                      |
//! | 13    | output enable                              |
//! | 18/19 | SPI0 clock/data to the panel chain         |
//!
//! The data bus must stay on GPIO 0-7 in bit order: the receiver samples it
//! with a single SIO register read.

use embassy_time::Duration;
use ledwall_drivers::DataPolarity;
use ledwall_hal::spi::SpiConfig;
use ledwall_protocol::{frame_len, PanelGrid};

/// Panels across the wall
pub const PANELS_WIDE: u8 = 2;

/// Panels down the wall
pub const PANELS_HIGH: u8 = 1;

/// Validated wall geometry, rejected at compile time if out of range
pub const GRID: PanelGrid = match PanelGrid::new(PANELS_WIDE, PANELS_HIGH) {
    Ok(grid) => grid,
    Err(_) => panic!("wall geometry out of range"),
};

/// Frame length including the duty byte
pub const FRAME_LEN: usize = frame_len(PANELS_WIDE as usize, PANELS_HIGH as usize);

/// Scan tick period (~100 Hz refresh over four 256-tick sweeps)
///
/// embassy-time counts at 1 MHz, so the 9765 ns period rounds up to 10 us
/// and the wall actually refreshes at about 97.7 Hz.
pub const SCAN_TICK: Duration = Duration::from_nanos(ledwall_core::scan::TICK_PERIOD_NS as u64);

/// Logical pixel bytes are inverted on the way to the panel
pub const DATA_POLARITY: DataPolarity = DataPolarity::ActiveLow;

/// Output enable drives high to light the panel
pub const OE_INVERTED: bool = false;

/// Panel SPI settings
pub const PANEL_SPI: SpiConfig = SpiConfig {
    frequency: 8_000_000,
    polarity: ledwall_hal::spi::Polarity::IdleLow,
    phase: ledwall_hal::spi::Phase::CaptureOnFirstTransition,
};

// The scan shifts one byte per tick, so the shifter must drain within a tick
const _: () = assert!(PANEL_SPI.byte_time_ns() < ledwall_core::scan::TICK_PERIOD_NS);
